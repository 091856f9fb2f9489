//! URL normalization and validation for submitted links.
//!
//! Normalization is deliberately light: surrounding whitespace is trimmed and
//! `https://` is prepended when no http(s) scheme is present. The rest of the
//! string is stored exactly as submitted; parsing is only used to reject
//! malformed input.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed, got '{0}'")]
    UnsupportedProtocol(String),

    #[error("URL has no host")]
    MissingHost,
}

const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Normalizes a raw user-supplied URL.
///
/// # Rules
///
/// 1. Leading and trailing whitespace is removed; empty input is rejected
/// 2. Input starting with `http://` or `https://` (any case) is kept as-is
/// 3. Input with another explicit scheme (`ftp://...`) is rejected
/// 4. Anything else gets `https://` prepended
/// 5. The result must parse as an absolute http(s) URL with a host
///
/// # Errors
///
/// See [`UrlNormalizationError`] for the possible rejections.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com");
/// assert!(normalize_url("not a url").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let normalized = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if let Some(scheme) = explicit_scheme(trimmed) {
        return Err(UrlNormalizationError::UnsupportedProtocol(
            scheme.to_ascii_lowercase(),
        ));
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    };

    let parsed =
        Url::parse(&normalized).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlNormalizationError::UnsupportedProtocol(other.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    Ok(normalized)
}

fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Returns the scheme of an input shaped like `scheme://...`.
fn explicit_scheme(input: &str) -> Option<&str> {
    let (scheme, _) = input.split_once("://")?;
    let mut chars = scheme.chars();

    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    (starts_alpha && rest_valid).then_some(scheme)
}
