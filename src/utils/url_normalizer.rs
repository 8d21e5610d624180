//! Canonical URL form for stored originals.
//!
//! Duplicate detection compares stored URLs by equality, so trivially
//! different spellings of the same address must collapse to one form before
//! they reach the store.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("invalid URL: {0}")]
    InvalidFormat(String),

    #[error("only http and https URLs can be shortened")]
    UnsupportedScheme,
}

/// Normalizes a URL to its canonical form.
///
/// Rules: scheme must be `http` or `https` (anything else, including
/// `javascript:` and `data:`, is rejected); the host is lowercased; default
/// ports (80/443) are dropped; the fragment is dropped. Path casing and
/// query parameters are preserved untouched.
///
/// # Errors
///
/// [`UrlNormalizationError::InvalidFormat`] when the input does not parse as
/// an absolute URL, [`UrlNormalizationError::UnsupportedScheme`] for
/// non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url = Url::parse(input.trim())
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedScheme);
    }

    if let Some(host) = url.host_str() {
        let lowered = host.to_ascii_lowercase();
        if lowered != host {
            url.set_host(Some(&lowered))
                .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;
        }
    }

    url.set_fragment(None);

    let default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if default_port && url.set_port(None).is_err() {
        return Err(UrlNormalizationError::InvalidFormat(
            "cannot strip default port".to_string(),
        ));
    }

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_is_lowercased() {
        assert_eq!(
            normalize_url("https://EXAMPLE.Com/Path").unwrap(),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_path_case_preserved() {
        assert_eq!(
            normalize_url("https://example.com/CaseSensitive").unwrap(),
            "https://example.com/CaseSensitive"
        );
    }

    #[test]
    fn test_default_ports_removed() {
        assert_eq!(
            normalize_url("http://example.com:80/a").unwrap(),
            "http://example.com/a"
        );
        assert_eq!(
            normalize_url("https://example.com:443/a").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_custom_port_kept() {
        assert_eq!(
            normalize_url("http://example.com:8080/a").unwrap(),
            "http://example.com:8080/a"
        );
    }

    #[test]
    fn test_fragment_stripped_query_kept() {
        assert_eq!(
            normalize_url("https://example.com/p?q=1#frag").unwrap(),
            "https://example.com/p?q=1"
        );
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(
            normalize_url("  https://example.com  ").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_relative_url_rejected() {
        assert!(matches!(
            normalize_url("example.com/page"),
            Err(UrlNormalizationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(normalize_url("").is_err());
    }

    #[test]
    fn test_dangerous_schemes_rejected() {
        for input in [
            "javascript:alert(1)",
            "data:text/plain,hi",
            "file:///etc/passwd",
            "ftp://example.com/f",
        ] {
            assert!(
                matches!(
                    normalize_url(input),
                    Err(UrlNormalizationError::UnsupportedScheme)
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_equivalent_spellings_collapse() {
        let a = normalize_url("HTTPS://Example.COM:443/page#x").unwrap();
        let b = normalize_url("https://example.com/page").unwrap();
        assert_eq!(a, b);
    }
}
