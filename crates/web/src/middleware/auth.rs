//! Token extractors.
//!
//! The visitor is authenticated iff the request carries a non-empty `token`
//! cookie. Nothing is remembered server-side: every request re-derives the
//! state from the cookie. Whether the token is still valid is only known to
//! the REST API.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::AccessToken;
use crate::cookies::{self, TOKEN_COOKIE};

/// Where visitors without a token are sent.
pub const UNAUTHENTICATED_REDIRECT: &str = "/";

/// Read the bearer token from the request cookies.
fn token_from_parts(parts: &Parts) -> Option<AccessToken> {
    cookies::get_from_headers(&parts.headers, TOKEN_COOKIE).and_then(AccessToken::new)
}

/// Extractor that requires a token.
///
/// Without one, the visitor is redirected to the listings page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireToken(token): RequireToken) -> impl IntoResponse {
///     state.api().create_review(&token, &review).await
/// }
/// ```
pub struct RequireToken(pub AccessToken);

/// Error returned when a token is required but the visitor has none.
pub enum AuthRejection {
    /// Redirect to the listings page.
    RedirectToListings,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToListings => Redirect::to(UNAUTHENTICATED_REDIRECT).into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireToken
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        token_from_parts(parts).map(Self).ok_or_else(|| {
            tracing::debug!(path = %parts.uri.path(), "No token, redirecting to listings");
            AuthRejection::RedirectToListings
        })
    }
}

/// Extractor that optionally gets the token.
///
/// Unlike `RequireToken`, this does not reject anonymous visitors.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalToken(token): OptionalToken) -> impl IntoResponse {
///     state.api().list_places(token.as_ref()).await
/// }
/// ```
pub struct OptionalToken(pub Option<AccessToken>);

impl OptionalToken {
    /// Whether the visitor has a token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for OptionalToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(token_from_parts(parts)))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode, header::COOKIE};

    use super::*;

    fn parts(cookie: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/add_review?id=p1");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_optional_token_present() {
        let mut parts = parts(Some("theme=dark; token=abc"));
        let OptionalToken(token) = OptionalToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(token.unwrap().expose(), "abc");
    }

    #[tokio::test]
    async fn test_optional_token_treats_empty_cookie_as_absent() {
        let mut parts = parts(Some("token="));
        let token = OptionalToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(!token.is_authenticated());
    }

    #[tokio::test]
    async fn test_require_token_redirects_to_listings() {
        let mut parts = parts(None);
        let Err(rejection) = RequireToken::from_request_parts(&mut parts, &()).await else {
            panic!("expected a rejection without a token");
        };

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], UNAUTHENTICATED_REDIRECT);
    }
}
