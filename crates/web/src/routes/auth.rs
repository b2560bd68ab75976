//! Login and logout handlers.
//!
//! Logging in exchanges credentials for a REST API token and stores it in the
//! `token` cookie. Logging out expires that cookie. There is no server-side
//! session to create or destroy.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::api::{ApiError, status_text};
use crate::cookies::{self, ROOT_PATH, TOKEN_COOKIE};
use crate::filters;
use crate::middleware::OptionalToken;
use crate::routes::page_status;
use crate::state::AppState;

/// Page shown after a successful login.
pub const AFTER_LOGIN: &str = "/";

/// Page shown after logging out.
pub const AFTER_LOGOUT: &str = "/login";

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub authenticated: bool,
    pub error: Option<String>,
    /// Email to pre-fill after a failed attempt
    pub email: String,
}

/// Display the login page.
pub async fn login_page(token: OptionalToken) -> impl IntoResponse {
    LoginTemplate {
        authenticated: token.is_authenticated(),
        error: None,
        email: String::new(),
    }
}

/// Handle login form submission.
///
/// On success the token cookie is set and the visitor lands on the listings.
/// On failure the form is shown again with the reason.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.api().login(&form.email, &form.password).await {
        Ok(token) => {
            tracing::info!("Login succeeded");
            (
                [(SET_COOKIE, cookies::set(TOKEN_COOKIE, token.expose(), ROOT_PATH))],
                Redirect::to(AFTER_LOGIN),
            )
                .into_response()
        }
        Err(e) => {
            let error = match &e {
                ApiError::Status { status, .. } => {
                    tracing::warn!(status = %status, "Login rejected");
                    format!(
                        "Login failed: {}. Please check your credentials.",
                        status_text(*status)
                    )
                }
                other => {
                    tracing::error!(error = %other, "Login request failed");
                    other.user_message()
                }
            };

            (
                page_status(&e),
                LoginTemplate {
                    authenticated: false,
                    error: Some(error),
                    email: form.email,
                },
            )
                .into_response()
        }
    }
}

/// Handle logout by expiring the token cookie.
pub async fn logout() -> Response {
    (
        [(SET_COOKIE, cookies::clear(TOKEN_COOKIE, ROOT_PATH))],
        Redirect::to(AFTER_LOGOUT),
    )
        .into_response()
}
