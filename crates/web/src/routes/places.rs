//! Listing and place detail handlers.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::{PlaceDetail, PlaceSummary, Review};
use crate::cookies::{self, FLASH_COOKIE, ROOT_PATH};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalToken;
use crate::routes::{Flash, PlaceQuery, add_review_href, place_href};
use crate::state::AppState;

/// Price ceilings offered by the listings filter, besides "All".
pub const PRICE_FILTER_OPTIONS: [u32; 3] = [10, 50, 100];

// =============================================================================
// Price filter
// =============================================================================

/// Query parameters of the listings page.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub max_price: Option<String>,
}

/// Maximum nightly price a place may have to be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceFilter {
    #[default]
    All,
    AtMost(Decimal),
}

impl PriceFilter {
    /// Parse the `max_price` query value.
    ///
    /// Missing, empty, `All`, or unparseable values mean no filter.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::All;
        };
        if raw.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        Decimal::from_str(raw).map_or_else(
            |_| {
                tracing::debug!(max_price = %raw, "Ignoring unparseable price filter");
                Self::All
            },
            Self::AtMost,
        )
    }

    /// Whether a place passes the filter. The ceiling is inclusive.
    #[must_use]
    pub fn matches(&self, place: &PlaceSummary) -> bool {
        match self {
            Self::All => true,
            Self::AtMost(max) => place.price.is_at_most(*max),
        }
    }

    /// The places that pass the filter, in their original order.
    pub fn apply<'a>(
        &'a self,
        places: &'a [PlaceSummary],
    ) -> impl Iterator<Item = &'a PlaceSummary> + 'a {
        places.iter().filter(|place| self.matches(place))
    }

    /// Options for the filter `<select>`, with the current one selected.
    fn options(self) -> Vec<FilterOptionView> {
        let mut options: Vec<FilterOptionView> = PRICE_FILTER_OPTIONS
            .iter()
            .map(|ceiling| FilterOptionView {
                value: ceiling.to_string(),
                label: ceiling.to_string(),
                selected: self == Self::AtMost(Decimal::from(*ceiling)),
            })
            .collect();

        options.push(FilterOptionView {
            value: String::new(),
            label: "All".to_string(),
            selected: self == Self::All,
        });

        options
    }
}

// =============================================================================
// View models
// =============================================================================

/// One entry of the price filter.
pub struct FilterOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Place card on the listings page.
pub struct PlaceCardView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub detail_href: String,
}

impl From<&PlaceSummary> for PlaceCardView {
    fn from(place: &PlaceSummary) -> Self {
        Self {
            id: place.id.to_string(),
            title: place.title.clone(),
            price: place.price.to_string(),
            detail_href: place_href(&place.id),
        }
    }
}

/// Place display data for the details page.
pub struct PlaceView {
    pub title: String,
    pub host: String,
    pub price: Option<String>,
    pub description: Option<String>,
    pub amenities: Vec<String>,
    pub reviews: Vec<ReviewView>,
}

impl From<PlaceDetail> for PlaceView {
    fn from(place: PlaceDetail) -> Self {
        Self {
            host: place.owner.full_name(),
            price: place.price.map(|price| price.to_string()),
            description: place.description.filter(|d| !d.trim().is_empty()),
            amenities: place.amenities.into_iter().map(|a| a.name).collect(),
            reviews: place.reviews.iter().map(ReviewView::from).collect(),
            title: place.title,
        }
    }
}

/// Review card on the details page.
pub struct ReviewView {
    pub author: String,
    pub stars: String,
    pub text: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            author: review.author_label(),
            stars: review.rating.stars(),
            text: review.text.clone(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Listings page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub authenticated: bool,
    pub places: Vec<PlaceCardView>,
    pub filter_options: Vec<FilterOptionView>,
}

/// Place details page template.
#[derive(Template, WebTemplate)]
#[template(path = "place.html")]
pub struct PlaceTemplate {
    pub authenticated: bool,
    pub place: PlaceView,
    /// Present only for visitors with a token
    pub add_review_href: Option<String>,
    pub notice: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the listings, filtered by `max_price`.
///
/// The filter runs on the typed place list, never on rendered text.
pub async fn index(
    State(state): State<AppState>,
    token: OptionalToken,
    Query(query): Query<ListingQuery>,
) -> Result<IndexTemplate> {
    let places = state.api().list_places(token.0.as_ref()).await?;
    let filter = PriceFilter::parse(query.max_price.as_deref());

    Ok(IndexTemplate {
        authenticated: token.is_authenticated(),
        places: filter.apply(&places).map(PlaceCardView::from).collect(),
        filter_options: filter.options(),
    })
}

/// Display one place with its amenities and reviews.
///
/// A pending flash notice is shown once and its cookie expired.
pub async fn show(
    State(state): State<AppState>,
    token: OptionalToken,
    headers: HeaderMap,
    Query(query): Query<PlaceQuery>,
) -> Result<Response> {
    let id = query.place_id()?;
    let place = state.api().get_place(token.0.as_ref(), &id).await?;

    let flash = cookies::get_from_headers(&headers, FLASH_COOKIE);
    let template = PlaceTemplate {
        authenticated: token.is_authenticated(),
        place: PlaceView::from(place),
        add_review_href: token.0.as_ref().map(|_| add_review_href(&id)),
        notice: flash
            .as_deref()
            .and_then(Flash::parse)
            .map(|flash| flash.message().to_string()),
    };

    if flash.is_some() {
        Ok((
            [(SET_COOKIE, cookies::clear(FLASH_COOKIE, ROOT_PATH))],
            template,
        )
            .into_response())
    } else {
        Ok(template.into_response())
    }
}
