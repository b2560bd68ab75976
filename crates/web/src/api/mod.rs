//! HBnB REST API client.
//!
//! # Architecture
//!
//! - One `reqwest::Client` connection pool shared by every request handler
//! - One typed schema per endpoint (see [`types`])
//! - The bearer token is attached only when the visitor has one, so anonymous
//!   browsing of listings and places keeps working
//! - No caching and no retries: every page load hits the API once per call
//!
//! # Endpoints
//!
//! ```text
//! POST {api}/auth/login      {email, password}         -> {access_token}
//! GET  {api}/places/                                    -> [PlaceSummary]
//! GET  {api}/places/{id}                                -> PlaceDetail | [PlaceDetail]
//! POST {api}/reviews/        {text, rating, place_id}   -> Review
//! ```

pub mod types;

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use hbnb_core::PlaceId;

use crate::config::ApiConfig;

pub use types::{
    AccessToken, Amenity, Credentials, ErrorBody, LoginResponse, NewReview, Owner, PlaceDetail,
    PlaceDetailPayload, PlaceSummary, Review,
};

const LOGIN_PATH: &str = "auth/login";
const PLACES_PATH: &str = "places/";
const REVIEWS_PATH: &str = "reviews/";

/// Longest slice of an upstream body copied into logs.
const LOGGED_BODY_LIMIT: usize = 500;

/// Errors that can occur when talking to the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status {
        status: StatusCode,
        /// Message from the error body, or the status text.
        message: String,
    },

    /// The response body did not match the expected schema.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API answered successfully but without the requested resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An endpoint URL could not be built.
    #[error("Invalid endpoint: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Message suitable for showing to the visitor.
    ///
    /// For a status error this is the API's own message (or the status text).
    /// Transport and schema details are never exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::NotFound(_) => "Not found".to_string(),
            Self::Http(_) | Self::Parse(_) | Self::Url(_) => {
                "The service is unavailable, please try again later".to_string()
            }
        }
    }

    /// Whether the API rejected the request (as opposed to being unreachable).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::NotFound(_))
    }
}

/// Human-readable text for a status code, e.g. "Unauthorized".
#[must_use]
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), str::to_string)
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the HBnB REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new REST API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised (e.g. the
    /// TLS backend fails to load).
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Root every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn place_endpoint(&self, id: &PlaceId) -> Result<Url, ApiError> {
        self.endpoint(&format!("{PLACES_PATH}{}", urlencoding::encode(id.as_str())))
    }

    /// Attach `Authorization: Bearer <token>` only when a token is present.
    fn authorize(request: RequestBuilder, token: Option<&AccessToken>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    /// Send a request and decode a JSON success body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %body.chars().take(LOGGED_BODY_LIMIT).collect::<String>(),
                "REST API returned non-success status"
            );

            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| status_text(status));

            return Err(ApiError::Status { status, message });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(LOGGED_BODY_LIMIT).collect::<String>(),
                "Failed to parse REST API response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the API rejects the credentials, and
    /// `ApiError::NotFound` if it answers with an empty token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint(LOGIN_PATH)?)
            .json(&Credentials { email, password });

        let response: LoginResponse = self.send(request).await?;
        debug!("Login accepted");

        AccessToken::new(response.access_token)
            .ok_or_else(|| ApiError::NotFound("access token in login response".to_string()))
    }

    // =========================================================================
    // Places
    // =========================================================================

    /// List every place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a place list.
    #[instrument(skip(self, token), fields(authenticated = token.is_some()))]
    pub async fn list_places(
        &self,
        token: Option<&AccessToken>,
    ) -> Result<Vec<PlaceSummary>, ApiError> {
        let request = Self::authorize(self.inner.client.get(self.endpoint(PLACES_PATH)?), token);
        let places: Vec<PlaceSummary> = self.send(request).await?;
        debug!(count = places.len(), "Fetched places");
        Ok(places)
    }

    /// Fetch one place with its owner, amenities, and reviews.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with 404 for an unknown place,
    /// `ApiError::NotFound` for an empty list payload, or any transport error.
    #[instrument(skip(self, token), fields(place_id = %id, authenticated = token.is_some()))]
    pub async fn get_place(
        &self,
        token: Option<&AccessToken>,
        id: &PlaceId,
    ) -> Result<PlaceDetail, ApiError> {
        let request = Self::authorize(self.inner.client.get(self.place_endpoint(id)?), token);
        let payload: PlaceDetailPayload = self.send(request).await?;

        payload
            .into_place()
            .ok_or_else(|| ApiError::NotFound(format!("Place not found: {id}")))
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Submit a review on behalf of the token's owner.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the API refuses the review (bad input,
    /// duplicate review, own place, expired token).
    #[instrument(skip(self, token, review), fields(place_id = %review.place_id, rating = %review.rating))]
    pub async fn create_review(
        &self,
        token: &AccessToken,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        let request = Self::authorize(
            self.inner.client.post(self.endpoint(REVIEWS_PATH)?).json(review),
            Some(token),
        );

        let created: Review = self.send(request).await?;
        debug!("Review created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client(base: &str) -> ApiClient {
        let config = ApiConfig::new(base, Duration::from_secs(1)).unwrap();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoints_stay_under_api_root() {
        let api = client("http://localhost:5000/api/v1");
        assert_eq!(
            api.endpoint(PLACES_PATH).unwrap().as_str(),
            "http://localhost:5000/api/v1/places/"
        );
        assert_eq!(
            api.endpoint(LOGIN_PATH).unwrap().as_str(),
            "http://localhost:5000/api/v1/auth/login"
        );
        assert_eq!(
            api.endpoint(REVIEWS_PATH).unwrap().as_str(),
            "http://localhost:5000/api/v1/reviews/"
        );
    }

    #[test]
    fn test_place_endpoint_encodes_id() {
        let api = client("http://localhost:5000/api/v1/");
        assert_eq!(
            api.place_endpoint(&PlaceId::from("3fa85f64-5717")).unwrap().as_str(),
            "http://localhost:5000/api/v1/places/3fa85f64-5717"
        );
        assert_eq!(
            api.place_endpoint(&PlaceId::from("a/b?c")).unwrap().as_str(),
            "http://localhost:5000/api/v1/places/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(StatusCode::UNAUTHORIZED), "Unauthorized");
        assert_eq!(status_text(StatusCode::from_u16(599).unwrap()), "599");
    }

    #[test]
    fn test_user_message_hides_internals() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "You have already reviewed this place.".to_string(),
        };
        assert_eq!(err.user_message(), "You have already reviewed this place.");
        assert!(err.is_rejection());

        let err = ApiError::Url(url::ParseError::EmptyHost);
        assert!(!err.user_message().contains("host"));
        assert!(!err.is_rejection());
    }
}
