//! Integration tests for the HBnB web front end.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hbnb-integration-tests
//! ```
//!
//! Each test starts its own fake REST API and its own front end on ephemeral
//! ports, so tests run in parallel and need no external services.
//!
//! # Fake API data
//!
//! | id  | title        | price | detail payload          |
//! |-----|--------------|-------|-------------------------|
//! | `1` | Alpine Cabin | 10    | object, one 3-star review |
//! | `2` | Beach House  | 100   | one-element list, no reviews |
//! | `3` | (none)       |       | empty list              |
//!
//! Any other id answers 404. Login accepts only [`VALID_EMAIL`] /
//! [`VALID_PASSWORD`] and issues [`TOKEN`].

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use reqwest::{Client, redirect::Policy};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use hbnb_web::config::{ApiConfig, SentryConfig, WebConfig};
use hbnb_web::state::AppState;

/// Email accepted by the fake API.
pub const VALID_EMAIL: &str = "ada@example.com";

/// Password accepted by the fake API.
pub const VALID_PASSWORD: &str = "secret";

/// Token issued on a successful login.
pub const TOKEN: &str = "tok-123";

/// Review text the fake API refuses as a duplicate.
pub const DUPLICATE_REVIEW: &str = "duplicate";

/// `Cookie` header value of a logged-in visitor.
#[must_use]
pub fn token_cookie() -> String {
    format!("token={TOKEN}")
}

// =============================================================================
// Fake REST API
// =============================================================================

/// In-process stand-in for the HBnB REST API.
///
/// Records what the front end sends so tests can assert on it.
#[derive(Clone, Default)]
pub struct FakeApi {
    recorded: Arc<Recorded>,
}

#[derive(Default)]
struct Recorded {
    authorizations: Mutex<Vec<Option<String>>>,
    reviews: Mutex<Vec<Value>>,
}

impl FakeApi {
    /// `Authorization` header of every places and reviews request, in order.
    pub async fn authorizations(&self) -> Vec<Option<String>> {
        self.recorded.authorizations.lock().await.clone()
    }

    /// JSON bodies of every review submission, in order.
    pub async fn submitted_reviews(&self) -> Vec<Value> {
        self.recorded.reviews.lock().await.clone()
    }

    async fn record_authorization(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.recorded.authorizations.lock().await.push(value.clone());
        value
    }

    fn router(self) -> Router {
        Router::new()
            .route("/api/v1/auth/login", post(login))
            .route("/api/v1/places/", get(list_places))
            .route("/api/v1/places/{id}", get(get_place))
            .route("/api/v1/reviews/", post(create_review))
            .with_state(self)
    }
}

fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == VALID_EMAIL && body["password"] == VALID_PASSWORD {
        (StatusCode::OK, Json(json!({ "access_token": TOKEN })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
    }
}

async fn list_places(State(api): State<FakeApi>, headers: HeaderMap) -> Json<Value> {
    api.record_authorization(&headers).await;
    Json(json!([
        { "id": "1", "title": "Alpine Cabin", "price": 10.0 },
        { "id": "2", "title": "Beach House", "price": 100 },
    ]))
}

async fn get_place(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    api.record_authorization(&headers).await;

    match id.as_str() {
        "1" => (
            StatusCode::OK,
            Json(json!({
                "id": "1",
                "title": "Alpine Cabin",
                "description": "Quiet cabin above the valley",
                "owner": { "first_name": "Grace", "last_name": "Hopper" },
                "amenities": [{ "id": "a1", "name": "Wi-Fi" }, { "id": "a2", "name": "Fireplace" }],
                "reviews": [{ "id": "r1", "text": "Cosy and warm", "rating": 3, "user_name": "Bob" }],
            })),
        ),
        "2" => (
            StatusCode::OK,
            Json(json!([{
                "id": "2",
                "title": "Beach House",
                "owner": { "first_name": "Alan", "last_name": "Turing" },
                "amenities": [],
                "reviews": [],
            }])),
        ),
        "3" => (StatusCode::OK, Json(json!([]))),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Place not found" })),
        ),
    }
}

async fn create_review(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorization = api.record_authorization(&headers).await;
    api.recorded.reviews.lock().await.push(body.clone());

    if authorization != Some(bearer()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "Missing Authorization Header" })),
        );
    }
    if body["text"] == DUPLICATE_REVIEW {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "You have already reviewed this place." })),
        );
    }
    if !body["rating"].as_u64().is_some_and(|r| (1..=5).contains(&r)) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Rating must be between 1 and 5" })),
        );
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "id": "r2",
            "text": body["text"],
            "rating": body["rating"],
            "place_id": body["place_id"],
            "user": { "id": "u1", "first_name": "Ada" },
        })),
    )
}

// =============================================================================
// Test context
// =============================================================================

/// Serve a router on an ephemeral local port.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server error");
    });

    addr
}

/// A local address with nothing listening on it.
async fn closed_port_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    listener.local_addr().expect("Listener has no address")
}

/// A running front end wired to a running fake API.
pub struct TestContext {
    /// Client that never follows redirects and keeps no cookies.
    pub client: Client,
    pub base_url: String,
    pub api: FakeApi,
}

impl TestContext {
    /// Start the fake API and a front end pointed at it.
    ///
    /// # Panics
    ///
    /// Panics if either server cannot start.
    pub async fn new() -> Self {
        let api = FakeApi::default();
        let api_addr = spawn(api.clone().router()).await;
        Self::start(api_addr, api).await
    }

    /// Start a front end whose REST API refuses every connection.
    ///
    /// # Panics
    ///
    /// Panics if the front end cannot start.
    pub async fn with_unreachable_api() -> Self {
        Self::start(closed_port_addr().await, FakeApi::default()).await
    }

    async fn start(api_addr: SocketAddr, api: FakeApi) -> Self {
        let config = WebConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            api: ApiConfig::new(
                &format!("http://{api_addr}/api/v1"),
                Duration::from_secs(5),
            )
            .expect("Invalid fake API URL"),
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../web/static").into(),
            sentry: SentryConfig::default(),
        };
        let state = AppState::new(config).expect("Failed to build app state");
        let web_addr = spawn(hbnb_web::app(state)).await;

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{web_addr}"),
            api,
        }
    }

    /// Absolute URL of a front end path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a page, optionally with a `Cookie` header.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        request.send().await.expect("Request failed")
    }

    /// POST a form, optionally with a `Cookie` header.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self.client.post(self.url(path)).form(form);
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        request.send().await.expect("Request failed")
    }
}

/// All `Set-Cookie` header values of a response.
#[must_use]
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
