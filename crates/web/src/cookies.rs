//! Flat `name=value` cookie store.
//!
//! Reads the browser's `Cookie` header and builds `Set-Cookie` values. The
//! format is deliberately minimal: values are neither encoded nor decoded, so
//! a value containing `;` or `=` does not survive a round trip.

use axum::http::{HeaderMap, header::COOKIE};
use cookie::Cookie;
use cookie::time::OffsetDateTime;

/// Cookie holding the REST API bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Cookie holding a one-shot notice shown on the next page.
pub const FLASH_COOKIE: &str = "flash";

/// Path attached to every cookie this site writes.
pub const ROOT_PATH: &str = "/";

/// Look up `name` in a flat cookie string such as `a=1; token=abc`.
///
/// Entries are split on `;`, trimmed, and split on their first `=`.
/// Returns `None` when no entry has that name.
#[must_use]
pub fn get<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .filter_map(|entry| entry.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Look up `name` across every `Cookie` header of a request.
#[must_use]
pub fn get_from_headers(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .find_map(|value| {
            // Non-ASCII bytes in a neighbouring cookie must not hide this one
            get(&String::from_utf8_lossy(value.as_bytes()), name).map(str::to_owned)
        })
}

/// Build a session `Set-Cookie` value: `name=value; Path=path`.
///
/// No expiry or security attributes are added.
#[must_use]
pub fn set(name: &str, value: &str, path: &str) -> String {
    Cookie::build((name, value)).path(path).build().to_string()
}

/// Build a `Set-Cookie` value that removes `name` by expiring it.
#[must_use]
pub fn clear(name: &str, path: &str) -> String {
    Cookie::build((name, ""))
        .path(path)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
        .to_string()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    /// The `name=value` pair a browser sends back for a `Set-Cookie` value.
    fn echoed(set_cookie: &str) -> &str {
        set_cookie.split(';').next().unwrap_or_default()
    }

    #[test]
    fn test_round_trip() {
        let header = set("token", "abc", ROOT_PATH);
        assert_eq!(header, "token=abc; Path=/");
        assert_eq!(get(echoed(&header), "token"), Some("abc"));
    }

    #[test]
    fn test_missing_cookie() {
        assert_eq!(get("token=abc", "missing"), None);
        assert_eq!(get("", "missing"), None);
    }

    #[test]
    fn test_get_trims_and_splits_on_first_equals() {
        let header = "theme=dark;  token=a=b ; lang=fr";
        assert_eq!(get(header, "token"), Some("a=b"));
        assert_eq!(get(header, "lang"), Some("fr"));
        assert_eq!(get(header, "theme"), Some("dark"));
    }

    #[test]
    fn test_get_requires_exact_name() {
        assert_eq!(get("xtoken=abc; tokens=def", "token"), None);
    }

    #[test]
    fn test_get_skips_entries_without_value() {
        assert_eq!(get("flag; token=abc", "token"), Some("abc"));
    }

    #[test]
    fn test_clear_expires_in_the_past() {
        let header = clear("token", ROOT_PATH);
        assert!(header.starts_with("token=;"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_get_from_headers_scans_all_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("token=abc"));

        assert_eq!(get_from_headers(&headers, "token").as_deref(), Some("abc"));
        assert_eq!(get_from_headers(&headers, "missing"), None);
    }

    #[test]
    fn test_get_from_headers_tolerates_non_ascii_neighbour() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_bytes("lang=café; token=abc".as_bytes()).unwrap(),
        );

        assert_eq!(get_from_headers(&headers, "token").as_deref(), Some("abc"));
        assert_eq!(get_from_headers(&headers, "lang").as_deref(), Some("café"));
    }
}
