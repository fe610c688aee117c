use crate::{UrlError, UrlResult};
use url::Url;

/// Returns true if the string parses as an absolute HTTP(S) URL
pub fn is_url(target: &str) -> bool {
    Url::parse(target)
        .map(|url| url.scheme() == "http" || url.scheme() == "https")
        .unwrap_or(false)
}

/// Normalizes a remote audit target into an absolute URL
///
/// A missing scheme defaults to `https`. The path, query and case of the
/// target are left alone so the page that gets audited is the page that was
/// asked for.
///
/// # Arguments
///
/// * `target` - A URL or bare domain
///
/// # Returns
///
/// * `Ok(Url)` - Absolute HTTP(S) URL
/// * `Err(UrlError)` - The target cannot be turned into one
///
/// # Examples
///
/// ```
/// use cipwe::url::normalize_target;
///
/// let url = normalize_target("example.com/about").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn normalize_target(target: &str) -> UrlResult<Url> {
    let with_scheme = with_default_scheme(target);

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Prefixes `https://` unless the target already names an HTTP(S) scheme
///
/// Unlike [`normalize_target`] the result is not re-serialized, so
/// `example.com` becomes `https://example.com` without a trailing slash.
pub fn with_default_scheme(target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("https://{}", target)
    }
}

/// Returns `scheme://host[:port]` for a URL, without a trailing slash
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Builds the URL of a well-known file at the site origin
///
/// # Examples
///
/// ```
/// use cipwe::url::{auxiliary_url, normalize_target};
///
/// let page = normalize_target("https://example.com:8443/blog/post?id=1").unwrap();
/// assert_eq!(auxiliary_url(&page, "robots.txt"), "https://example.com:8443/robots.txt");
/// ```
pub fn auxiliary_url(url: &Url, file_name: &str) -> String {
    format!("{}/{}", origin_of(url), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_scheme() {
        let url = normalize_target("example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_keeps_http_scheme() {
        let url = normalize_target("http://localhost:3000/").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.port(), Some(3000));
    }

    #[test]
    fn test_keeps_path_and_query() {
        let url = normalize_target("https://example.com/a/b?x=1").unwrap();
        assert_eq!(url.path(), "/a/b");
        assert_eq!(url.query(), Some("x=1"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(normalize_target("https://").is_err());
        assert!(normalize_target("exa mple.com").is_err());
    }

    #[test]
    fn test_with_default_scheme_keeps_input_shape() {
        assert_eq!(with_default_scheme("example.com"), "https://example.com");
        assert_eq!(with_default_scheme("http://example.com/a"), "http://example.com/a");
        assert_eq!(with_default_scheme("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com"));
        assert!(is_url("http://127.0.0.1:8080/x"));
        assert!(!is_url("example.com"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("./dist"));
    }

    #[test]
    fn test_origin_of_drops_path() {
        let url = Url::parse("http://127.0.0.1:4000/deep/page.html").unwrap();
        assert_eq!(origin_of(&url), "http://127.0.0.1:4000");
    }

    #[test]
    fn test_auxiliary_url() {
        let url = Url::parse("https://example.com/blog/").unwrap();
        assert_eq!(auxiliary_url(&url, "llms.txt"), "https://example.com/llms.txt");
    }
}
