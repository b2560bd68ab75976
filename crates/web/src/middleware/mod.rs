//! HTTP middleware stack for the web front end.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one transaction per request)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the span, echoed in the response)
//! 4. Security headers (CSP, framing, caching)
//!
//! Authentication is not a layer: handlers pull the token out of the cookie
//! with the [`OptionalToken`] and [`RequireToken`] extractors.

pub mod auth;
pub mod request_id;
pub mod security_headers;

pub use auth::{AuthRejection, OptionalToken, RequireToken};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
