//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the public path of the fingerprinted stylesheet.
///
/// The hash is computed at build time from `static/css/main.css`. Without a
/// hash the unversioned file is served.
///
/// Usage in templates: `{{ ""|stylesheet_href }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn stylesheet_href(
    _value: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(stylesheet_path(env!("CSS_HASH")))
}

fn stylesheet_path(hash: &str) -> String {
    if hash.is_empty() {
        "/static/css/main.css".to_string()
    } else {
        format!("/static/css/derived/main.{hash}.css")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_path_with_hash() {
        assert_eq!(
            stylesheet_path("1a2b3c4d"),
            "/static/css/derived/main.1a2b3c4d.css"
        );
    }

    #[test]
    fn test_stylesheet_path_without_hash() {
        assert_eq!(stylesheet_path(""), "/static/css/main.css");
    }
}
