//! URL canonicalization for requests entering the router.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a request URL relative to the application scope.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Resolve `/path` and `./path` against `scope`
/// 3. Default scheme to https:// for bare hosts
/// 4. Lowercase the host
/// 5. Remove fragment (#...)
/// 6. Keep query string intact (do not reorder)
pub fn canonicalize(scope: &url::Url, input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let resolved = if trimmed.starts_with('/') || trimmed.starts_with("./") || trimmed.starts_with("../") {
        scope.join(trimmed)
    } else if trimmed.contains("://") {
        url::Url::parse(trimmed)
    } else {
        url::Url::parse(&format!("https://{trimmed}"))
    };
    let mut parsed = resolved.map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str().map(str::to_lowercase) {
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> url::Url {
        url::Url::parse("http://localhost:8080/").unwrap()
    }

    #[test]
    fn test_canonicalize_absolute_path_uses_scope() {
        let url = canonicalize(&scope(), "/about.html").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/about.html");
    }

    #[test]
    fn test_canonicalize_relative_path_uses_scope() {
        let scope = url::Url::parse("https://app.example/inspect/").unwrap();
        let url = canonicalize(&scope, "./index.html").unwrap();
        assert_eq!(url.as_str(), "https://app.example/inspect/index.html");
    }

    #[test]
    fn test_canonicalize_default_scheme() {
        let url = canonicalize(&scope(), "example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_canonicalize_lowercase_host() {
        let url = canonicalize(&scope(), "https://CDNJS.Cloudflare.COM/ajax").unwrap();
        assert_eq!(url.host_str(), Some("cdnjs.cloudflare.com"));
    }

    #[test]
    fn test_canonicalize_remove_fragment_preserve_query() {
        let url = canonicalize(&scope(), "/db/sync?since=42#x").unwrap();
        assert_eq!(url.path(), "/db/sync");
        assert_eq!(url.query(), Some("since=42"));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_canonicalize_unsupported_scheme() {
        let result = canonicalize(&scope(), "file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(matches!(canonicalize(&scope(), ""), Err(UrlError::Empty)));
        assert!(matches!(canonicalize(&scope(), "   "), Err(UrlError::Empty)));
    }
}
