//! Nightly price of a place.
//!
//! The REST API sends prices as bare JSON numbers (`10`, `49.5`). They are
//! held as `Decimal` so filtering compares exact values, and rendered with
//! the site's currency suffix.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency suffix appended when a price is displayed.
pub const CURRENCY_SUFFIX: &str = "Gils";

/// A price per night.
///
/// Displays as an integer-ish number followed by the currency suffix:
///
/// ```
/// use hbnb_core::Price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(Price::new(Decimal::new(1000, 2)).to_string(), "10 Gils");
/// assert_eq!(Price::new(Decimal::new(495, 1)).to_string(), "49.5 Gils");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The amount without currency.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is at most `max`.
    #[must_use]
    pub fn is_at_most(&self, max: Decimal) -> bool {
        self.0 <= max
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_SUFFIX}", self.0.normalize())
    }
}
