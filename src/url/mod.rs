//! Target handling for audits
//!
//! This module decides whether an audit target is a remote site or a local
//! directory, and turns remote targets into absolute URLs.

mod normalize;

use std::path::{Path, PathBuf};
use url::Url;

pub use normalize::{auxiliary_url, is_url, normalize_target, origin_of, with_default_scheme};

use crate::UrlResult;

/// Where the content for an audit comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A deployed site, already normalized to an absolute URL
    Remote(Url),
    /// A directory on disk holding built HTML
    Local(PathBuf),
}

impl Target {
    /// Returns true if the target will be fetched over the network
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Classifies a raw audit target
///
/// # Detection Rules
///
/// | Input | Result |
/// |-------|--------|
/// | `http://` or `https://` URL | Remote |
/// | Contains `.`, no `/`, not an existing directory (`example.com`) | Remote, `https` added |
/// | Anything else (`.`, `./dist`, `/srv/site`) | Local |
///
/// # Arguments
///
/// * `target` - The target string as given by the user
///
/// # Returns
///
/// * `Ok(Target)` - The classified target
/// * `Err(UrlError)` - The target looked remote but is not a valid URL
///
/// # Examples
///
/// ```
/// use cipwe::url::{resolve_target, Target};
///
/// let target = resolve_target("example.com").unwrap();
/// assert!(matches!(target, Target::Remote(ref url) if url.as_str() == "https://example.com/"));
/// ```
pub fn resolve_target(target: &str) -> UrlResult<Target> {
    let target = target.trim();

    if is_url(target) || looks_like_domain(target) {
        return normalize_target(target).map(Target::Remote);
    }

    Ok(Target::Local(PathBuf::from(target)))
}

/// A bare host such as `example.com`, as opposed to `.` or `./site`
fn looks_like_domain(target: &str) -> bool {
    target.contains('.')
        && !target.contains('/')
        && !target.contains('\\')
        && !target.chars().all(|c| c == '.')
        && !Path::new(target).is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_is_remote() {
        let target = resolve_target("https://example.com/docs").unwrap();
        assert_eq!(
            target,
            Target::Remote(Url::parse("https://example.com/docs").unwrap())
        );
    }

    #[test]
    fn test_bare_domain_is_remote_https() {
        let target = resolve_target("example.com").unwrap();
        assert!(target.is_remote());
        if let Target::Remote(url) = target {
            assert_eq!(url.scheme(), "https");
            assert_eq!(url.host_str(), Some("example.com"));
        }
    }

    #[test]
    fn test_current_dir_is_local() {
        assert_eq!(resolve_target(".").unwrap(), Target::Local(PathBuf::from(".")));
    }

    #[test]
    fn test_relative_path_is_local() {
        assert_eq!(
            resolve_target("./dist").unwrap(),
            Target::Local(PathBuf::from("./dist"))
        );
    }

    #[test]
    fn test_dotted_path_with_separator_is_local() {
        assert_eq!(
            resolve_target("sites/example.com").unwrap(),
            Target::Local(PathBuf::from("sites/example.com"))
        );
    }
}
