//! Wire types for the HBnB REST API.
//!
//! One schema per endpoint. Fields the pages never read are not modelled,
//! and serde ignores them.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use hbnb_core::{AmenityId, PlaceId, Price, Rating, ReviewId, UserId};

// =============================================================================
// Auth
// =============================================================================

/// Body of `POST /auth/login`.
#[derive(Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful response of `POST /auth/login`.
#[derive(Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Bearer token issued by the REST API.
///
/// The raw value is only reachable through [`AccessToken::expose`], and the
/// `Debug` output is redacted.
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a raw token. Returns `None` for an empty or blank token, which the
    /// site treats the same as no token at all.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(SecretString::from(raw)))
        }
    }

    /// The raw token, for the `Authorization` header or the cookie.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

// =============================================================================
// Places
// =============================================================================

/// One entry of `GET /places/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaceSummary {
    pub id: PlaceId,
    pub title: String,
    pub price: Price,
}

/// Body of `GET /places/{id}`.
///
/// The detail endpoint does not always echo the price, so it is optional here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaceDetail {
    pub id: PlaceId,
    pub title: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// The place detail endpoint returns either the place itself or, on some
/// deployments, a one-element array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PlaceDetailPayload {
    Single(Box<PlaceDetail>),
    List(Vec<PlaceDetail>),
}

impl PlaceDetailPayload {
    /// The place, or the first element of a list payload.
    #[must_use]
    pub fn into_place(self) -> Option<PlaceDetail> {
        match self {
            Self::Single(place) => Some(*place),
            Self::List(places) => places.into_iter().next(),
        }
    }
}

/// Owner of a place, as nested in the detail payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Owner {
    /// "First Last", without stray spaces when a part is missing.
    #[must_use]
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Amenity of a place.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Amenity {
    #[serde(default)]
    pub id: Option<AmenityId>,
    pub name: String,
}

// =============================================================================
// Reviews
// =============================================================================

/// A review, as nested in a place or returned by `POST /reviews/`.
///
/// API versions disagree on how the author is referenced: a `user_name`, a
/// nested `user` object, or a bare `user_id`. All three are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: Option<ReviewId>,
    pub text: String,
    pub rating: Rating,
    #[serde(default)]
    pub place_id: Option<PlaceId>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    user: Option<ReviewUser>,
    #[serde(default)]
    user_id: Option<UserId>,
}

/// Author reference nested in a created review.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ReviewUser {
    #[serde(default)]
    id: Option<UserId>,
    #[serde(default)]
    first_name: Option<String>,
}

impl Review {
    /// Label shown above the review.
    ///
    /// Prefers a display name, falls back to the author's id.
    #[must_use]
    pub fn author_label(&self) -> String {
        let name = self
            .user_name
            .as_deref()
            .or_else(|| self.user.as_ref().and_then(|u| u.first_name.as_deref()))
            .map(str::trim)
            .filter(|name| !name.is_empty());

        if let Some(name) = name {
            return name.to_owned();
        }

        self.user_id
            .as_ref()
            .or_else(|| self.user.as_ref().and_then(|u| u.id.as_ref()))
            .map_or_else(|| "Anonymous".to_owned(), ToString::to_string)
    }
}

/// Body of `POST /reviews/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    pub text: String,
    pub rating: Rating,
    pub place_id: PlaceId,
}

// =============================================================================
// Errors
// =============================================================================

/// Error body returned by the REST API on failure.
///
/// Flask-RESTX aborts use `message`; hand-written handlers use `error`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The first non-empty message, if any.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message
            .into_iter()
            .chain(self.error)
            .find(|message| !message.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn review(value: serde_json::Value) -> Review {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_place_summary_list() {
        let places: Vec<PlaceSummary> = serde_json::from_value(json!([
            {"id": "1", "title": "A", "price": 10, "latitude": 1.5},
            {"id": "2", "title": "B", "price": 100.0}
        ]))
        .unwrap();

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].id.as_str(), "1");
        assert_eq!(places[1].price.to_string(), "100 Gils");
    }

    #[test]
    fn test_detail_payload_single_object() {
        let payload: PlaceDetailPayload = serde_json::from_value(json!({
            "id": "p1",
            "title": "Loft",
            "description": "Bright",
            "owner": {"id": "u1", "first_name": "Ada", "last_name": "Lovelace"},
            "amenities": [{"id": "a1", "name": "Wifi"}],
            "reviews": [{"id": "r1", "text": "Great", "rating": 4, "user_id": "u2"}]
        }))
        .unwrap();

        let place = payload.into_place().unwrap();
        assert_eq!(place.title, "Loft");
        assert_eq!(place.price, None);
        assert_eq!(place.owner.full_name(), "Ada Lovelace");
        assert_eq!(place.amenities[0].name, "Wifi");
        assert_eq!(place.reviews[0].rating, Rating::new(4));
    }

    #[test]
    fn test_detail_payload_list_uses_first() {
        let payload: PlaceDetailPayload = serde_json::from_value(json!([
            {"id": "p1", "title": "First", "price": 20},
            {"id": "p2", "title": "Second", "price": 30}
        ]))
        .unwrap();

        let place = payload.into_place().unwrap();
        assert_eq!(place.id.as_str(), "p1");
        assert!(place.reviews.is_empty());
        assert!(place.amenities.is_empty());
    }

    #[test]
    fn test_detail_payload_empty_list() {
        let payload: PlaceDetailPayload = serde_json::from_value(json!([])).unwrap();
        assert!(payload.into_place().is_none());
    }

    #[test]
    fn test_author_label_prefers_names() {
        let by_name = review(json!({"text": "t", "rating": 5, "user_name": "Grace"}));
        assert_eq!(by_name.author_label(), "Grace");

        let nested = review(json!({
            "text": "t",
            "rating": 5,
            "user": {"id": "u7", "first_name": "Alan"}
        }));
        assert_eq!(nested.author_label(), "Alan");
    }

    #[test]
    fn test_author_label_falls_back_to_id() {
        let by_id = review(json!({"text": "t", "rating": 2, "user_id": "u9"}));
        assert_eq!(by_id.author_label(), "u9");

        let nested_id = review(json!({"text": "t", "rating": 2, "user": {"id": "u3"}}));
        assert_eq!(nested_id.author_label(), "u3");

        let nobody = review(json!({"text": "t", "rating": 2}));
        assert_eq!(nobody.author_label(), "Anonymous");
    }

    #[test]
    fn test_owner_full_name_with_missing_part() {
        let owner = Owner {
            first_name: "Ada".to_string(),
            last_name: String::new(),
        };
        assert_eq!(owner.full_name(), "Ada");
    }

    #[test]
    fn test_new_review_body() {
        let body = NewReview {
            text: "Lovely".to_string(),
            rating: Rating::new(3),
            place_id: PlaceId::from("p1"),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"text": "Lovely", "rating": 3, "place_id": "p1"})
        );
    }

    #[test]
    fn test_error_body_message_precedence() {
        let both: ErrorBody =
            serde_json::from_value(json!({"message": "Bad rating", "error": "x"})).unwrap();
        assert_eq!(both.into_message().as_deref(), Some("Bad rating"));

        let error_only: ErrorBody =
            serde_json::from_value(json!({"error": "Place not found"})).unwrap();
        assert_eq!(error_only.into_message().as_deref(), Some("Place not found"));

        assert_eq!(ErrorBody::default().into_message(), None);
    }

    #[test]
    fn test_access_token_rejects_blank() {
        assert!(AccessToken::new("").is_none());
        assert!(AccessToken::new("  ").is_none());
        assert_eq!(AccessToken::new("abc").unwrap().expose(), "abc");
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret").unwrap();
        assert!(!format!("{token:?}").contains("super-secret"));
    }
}
