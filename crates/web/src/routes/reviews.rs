//! Review form handlers.
//!
//! Both routes require a token. A successful submission redirects back to the
//! place page with a one-shot notice in the `flash` cookie.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use hbnb_core::{PlaceId, Rating};

use crate::api::NewReview;
use crate::cookies::{self, FLASH_COOKIE, ROOT_PATH};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireToken;
use crate::routes::{Flash, PlaceQuery, add_review_href, page_status, place_href};
use crate::state::AppState;

/// Rating preselected on a fresh form.
const DEFAULT_RATING: u8 = 5;

/// Review form data.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub rating: String,
}

impl ReviewForm {
    fn rating(&self) -> Option<Rating> {
        self.rating.trim().parse::<u8>().ok().map(Rating::new)
    }
}

/// One entry of the rating `<select>`.
pub struct RatingOptionView {
    pub value: u8,
    pub selected: bool,
}

fn rating_options(selected: Option<u8>) -> Vec<RatingOptionView> {
    (1..=Rating::MAX)
        .map(|value| RatingOptionView {
            value,
            selected: Some(value) == selected,
        })
        .collect()
}

/// Review form template.
#[derive(Template, WebTemplate)]
#[template(path = "add_review.html")]
pub struct AddReviewTemplate {
    pub authenticated: bool,
    pub place_title: Option<String>,
    pub place_href: String,
    pub form_action: String,
    /// Text entered so far, kept across a failed submission
    pub text: String,
    pub rating_options: Vec<RatingOptionView>,
    pub error: Option<String>,
}

impl AddReviewTemplate {
    fn new(id: &PlaceId, place_title: Option<String>) -> Self {
        Self {
            authenticated: true,
            place_title,
            place_href: place_href(id),
            form_action: add_review_href(id),
            text: String::new(),
            rating_options: rating_options(Some(DEFAULT_RATING)),
            error: None,
        }
    }

    fn with_failure(mut self, form: ReviewForm, error: String) -> Self {
        self.rating_options = rating_options(form.rating().map(|r| r.value()));
        self.text = form.review;
        self.error = Some(error);
        self
    }
}

/// Display the review form for a place.
///
/// The place title is a nicety: when it cannot be fetched the form is still
/// shown.
pub async fn new_review(
    State(state): State<AppState>,
    RequireToken(token): RequireToken,
    Query(query): Query<PlaceQuery>,
) -> Result<AddReviewTemplate> {
    let id = query.place_id()?;

    let place_title = match state.api().get_place(Some(&token), &id).await {
        Ok(place) => Some(place.title),
        Err(e) => {
            tracing::warn!(place_id = %id, error = %e, "Failed to fetch place for review form");
            None
        }
    };

    Ok(AddReviewTemplate::new(&id, place_title))
}

/// Submit a review.
///
/// On success the visitor is redirected to the place page, which clears the
/// form. On failure the form is shown again with the entered text.
pub async fn create(
    State(state): State<AppState>,
    RequireToken(token): RequireToken,
    Query(query): Query<PlaceQuery>,
    Form(form): Form<ReviewForm>,
) -> Result<Response> {
    let id = query.place_id()?;

    let Some(rating) = form.rating() else {
        tracing::warn!(place_id = %id, rating = %form.rating, "Invalid rating submitted");
        let page = AddReviewTemplate::new(&id, None).with_failure(
            form,
            "Failed to submit review: Please choose a rating between 1 and 5.".to_string(),
        );
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    };

    let review = NewReview {
        text: form.review.clone(),
        rating,
        place_id: id.clone(),
    };

    match state.api().create_review(&token, &review).await {
        Ok(_) => {
            tracing::info!(place_id = %id, rating = %rating, "Review submitted");
            Ok((
                [(
                    SET_COOKIE,
                    cookies::set(FLASH_COOKIE, Flash::ReviewSubmitted.as_str(), ROOT_PATH),
                )],
                Redirect::to(&place_href(&id)),
            )
                .into_response())
        }
        Err(e) if e.is_rejection() => {
            tracing::warn!(place_id = %id, error = %e, "Review rejected");
            let error = format!("Failed to submit review: {}", e.user_message());
            let page = AddReviewTemplate::new(&id, None).with_failure(form, error);
            Ok((page_status(&e), page).into_response())
        }
        Err(e) => {
            tracing::error!(place_id = %id, error = %e, "Review submission failed");
            let page = AddReviewTemplate::new(&id, None).with_failure(
                form,
                "An error occurred while submitting your review.".to_string(),
            );
            Ok((page_status(&e), page).into_response())
        }
    }
}
