//! Newtype IDs for type-safe entity references.
//!
//! The HBnB REST API identifies every entity with an opaque string (a UUID in
//! practice). Use the `define_id!` macro to create wrappers that prevent
//! accidentally passing a user ID where a place ID is expected.

use thiserror::Error;

/// Errors that can occur when parsing an ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The input is empty or only whitespace.
    #[error("id cannot be empty")]
    Empty,
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()` that rejects blank input, plus `as_str()`
/// - `Display`, `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use hbnb_core::define_id;
/// define_id!(PlaceId);
/// define_id!(UserId);
///
/// let place_id = PlaceId::from("a1");
/// let user_id = UserId::from("a1");
///
/// // These are different types, so this won't compile:
/// // let _: PlaceId = user_id;
/// assert_eq!(place_id.as_str(), user_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an ID, rejecting empty or whitespace-only input.
            ///
            /// Accepted input is kept byte for byte, surrounding whitespace
            /// included, so the id sent upstream is the one received.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Empty` if the input is blank.
            pub fn parse(raw: &str) -> ::core::result::Result<Self, $crate::IdError> {
                if raw.trim().is_empty() {
                    return Err($crate::IdError::Empty);
                }
                Ok(Self(raw.to_owned()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(PlaceId);
define_id!(UserId);
define_id!(ReviewId);
define_id!(AmenityId);
