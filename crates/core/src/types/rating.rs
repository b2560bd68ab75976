//! Review rating and its star rendering.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Glyph for an earned star.
pub const FILLED_STAR: char = '★';

/// Glyph for a missing star.
pub const EMPTY_STAR: char = '☆';

/// A review rating, nominally 1 to 5.
///
/// The range is not enforced: the REST API owns validation, and a value
/// received from it is displayed as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Number of stars in a full rating.
    pub const MAX: u8 = 5;

    /// Create a rating.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// The raw rating value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Render as filled stars followed by empty stars.
    ///
    /// A rating above [`Rating::MAX`] yields that many filled stars and no
    /// empty ones.
    ///
    /// ```
    /// use hbnb_core::Rating;
    ///
    /// assert_eq!(Rating::new(3).stars(), "★★★☆☆");
    /// ```
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX.saturating_sub(self.0));
        let mut stars = String::with_capacity((filled + empty) * FILLED_STAR.len_utf8());
        stars.extend(std::iter::repeat_n(FILLED_STAR, filled));
        stars.extend(std::iter::repeat_n(EMPTY_STAR, empty));
        stars
    }
}

impl From<u8> for Rating {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
