//! HTTP route handlers for the web front end.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Listings, optional ?max_price=<n>
//! GET  /place?id=<id>     - Place details and reviews
//! GET  /add_review?id=    - Review form (requires token)
//! POST /add_review?id=    - Review submit (requires token)
//! GET  /login             - Login page
//! POST /login             - Login action, sets the token cookie
//! POST /logout            - Clears the token cookie
//! ```
//!
//! The place id travels between pages in the `id` query parameter.

pub mod auth;
pub mod places;
pub mod reviews;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

use hbnb_core::PlaceId;

use crate::api::ApiError;
use crate::error::AppError;
use crate::state::AppState;

/// Query string carrying a place id between pages.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceQuery {
    pub id: Option<String>,
}

impl PlaceQuery {
    /// The place id, or a 400 when it is missing or blank.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if no usable id was given.
    pub fn place_id(&self) -> Result<PlaceId, AppError> {
        self.id
            .as_deref()
            .and_then(|raw| PlaceId::parse(raw).ok())
            .ok_or_else(|| {
                tracing::warn!("Missing place ID");
                AppError::BadRequest("Missing place ID".to_string())
            })
    }
}

/// Link to the details page of a place.
#[must_use]
pub fn place_href(id: &PlaceId) -> String {
    format!("/place?id={}", urlencoding::encode(id.as_str()))
}

/// Link to the review form of a place.
#[must_use]
pub fn add_review_href(id: &PlaceId) -> String {
    format!("/add_review?id={}", urlencoding::encode(id.as_str()))
}

/// One-shot notices carried to the next page in the `flash` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    ReviewSubmitted,
}

impl Flash {
    /// Cookie value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReviewSubmitted => "review_submitted",
        }
    }

    /// Parse a cookie value. Unknown values are ignored.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "review_submitted" => Some(Self::ReviewSubmitted),
            _ => None,
        }
    }

    /// Text shown to the visitor.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ReviewSubmitted => "Review submitted successfully!",
        }
    }
}

/// Status for a page re-rendered after a failed API call.
///
/// Client errors from the API are passed through; anything else means the
/// API itself is at fault.
#[must_use]
pub fn page_status(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Status { status, .. } if status.is_client_error() => *status,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(places::index))
        .route("/place", get(places::show))
        .route(
            "/add_review",
            get(reviews::new_review).post(reviews::create),
        )
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_query_requires_id() {
        assert!(PlaceQuery::default().place_id().is_err());

        let blank = PlaceQuery {
            id: Some("  ".to_string()),
        };
        assert!(blank.place_id().is_err());

        let given = PlaceQuery {
            id: Some("p-1".to_string()),
        };
        assert_eq!(given.place_id().unwrap(), PlaceId::from("p-1"));
    }

    #[test]
    fn test_hrefs_preserve_uuid_ids() {
        let id = PlaceId::from("3fa85f64-5717-4562-b3fc-2c963f66afa6");
        assert_eq!(
            place_href(&id),
            "/place?id=3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
        assert_eq!(
            add_review_href(&id),
            "/add_review?id=3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
    }

    #[test]
    fn test_hrefs_encode_reserved_characters() {
        assert_eq!(place_href(&PlaceId::from("a&b")), "/place?id=a%26b");
    }

    #[test]
    fn test_flash_round_trip() {
        let flash = Flash::ReviewSubmitted;
        assert_eq!(Flash::parse(flash.as_str()), Some(flash));
        assert_eq!(Flash::parse("something_else"), None);
    }

    #[test]
    fn test_page_status() {
        let rejected = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(page_status(&rejected), StatusCode::UNAUTHORIZED);

        let broken = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(page_status(&broken), StatusCode::BAD_GATEWAY);
    }
}
