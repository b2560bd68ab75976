//! HBnB Core - Shared types library.
//!
//! This crate provides the value types used by the HBnB web front end:
//! - `web` - Server-rendered pages backed by the HBnB REST API
//! - `integration-tests` - Black-box tests against a fake REST API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no templates.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
