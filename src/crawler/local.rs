//! Local directory source
//!
//! Resolves a project directory on disk into the same inputs a remote crawl
//! produces: one HTML document plus optional auxiliary files.

use crate::AuditError;
use std::fs;
use std::path::{Path, PathBuf};

/// Build output directories probed for `index.html`, in order
const BUILD_DIRS: &[&str] = &["dist", "build", "out", "public", ".next", "_site", ".output/public"];

/// Subdirectory probed for auxiliary files when they are missing at the root
const PUBLIC_DIR: &str = "public";

/// Finds and reads the HTML document of a local project
///
/// # Lookup Order
///
/// 1. `index.html` at the root
/// 2. The first `*.html` / `*.htm` file at the root, by name
/// 3. `index.html` inside each build output directory
///
/// # Arguments
///
/// * `dir` - The project directory
///
/// # Returns
///
/// * `Ok(String)` - Contents of the first HTML file found
/// * `Err(AuditError::LocalNotFound)` - No candidate exists; lists what was searched
///
/// Invalid UTF-8 is replaced rather than rejected, as for remote pages.
pub fn read_local_html(dir: &Path) -> Result<String, AuditError> {
    let path = find_local_html(dir)?;
    tracing::debug!("Using local HTML file {}", path.display());
    read_lossy(&path).map_err(AuditError::from)
}

fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Resolves the path of the HTML document without reading it
pub fn find_local_html(dir: &Path) -> Result<PathBuf, AuditError> {
    let mut searched = Vec::new();

    let index = dir.join("index.html");
    if index.is_file() {
        return Ok(index);
    }
    searched.push(index.display().to_string());

    if let Some(html) = first_html_file(dir)? {
        return Ok(html);
    }
    searched.push(dir.join("*.html").display().to_string());

    for build_dir in BUILD_DIRS {
        let candidate = dir.join(build_dir).join("index.html");
        if candidate.is_file() {
            return Ok(candidate);
        }
        searched.push(candidate.display().to_string());
    }

    Err(AuditError::LocalNotFound {
        path: dir.to_path_buf(),
        searched,
    })
}

fn first_html_file(dir: &Path) -> Result<Option<PathBuf>, AuditError> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_html_file(path))
        .collect();
    candidates.sort();

    Ok(candidates.into_iter().next())
}

fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

/// Reads an auxiliary file from the root, falling back to `public/`
///
/// Absence is a normal outcome. A file that exists but cannot be read is
/// logged and also treated as absent.
pub fn read_local_file(dir: &Path, file_name: &str) -> Option<String> {
    [dir.join(file_name), dir.join(PUBLIC_DIR).join(file_name)]
        .into_iter()
        .filter(|path| path.is_file())
        .find_map(|path| match read_lossy(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, relative: &str, content: &str) {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_root_index_preferred() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", "<html>root</html>");
        write(&dir, "about.html", "<html>about</html>");
        write(&dir, "dist/index.html", "<html>dist</html>");

        assert_eq!(read_local_html(dir.path()).unwrap(), "<html>root</html>");
    }

    #[test]
    fn test_any_root_html_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "page.htm", "<html>htm</html>");
        write(&dir, "dist/index.html", "<html>dist</html>");

        assert_eq!(read_local_html(dir.path()).unwrap(), "<html>htm</html>");
    }

    #[test]
    fn test_build_dir_index() {
        let dir = TempDir::new().unwrap();
        write(&dir, "dist/index.html", "<html>dist</html>");

        assert_eq!(read_local_html(dir.path()).unwrap(), "<html>dist</html>");
    }

    #[test]
    fn test_non_utf8_page_is_decoded_lossily() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), b"<html><h1>Caf\xe9</h1></html>").unwrap();
        fs::write(dir.path().join("llms.txt"), b"# Caf\xe9").unwrap();

        let html = read_local_html(dir.path()).unwrap();
        assert_eq!(html, "<html><h1>Caf\u{FFFD}</h1></html>");
        assert_eq!(read_local_file(dir.path(), "llms.txt").as_deref(), Some("# Caf\u{FFFD}"));
    }

    #[test]
    fn test_build_dir_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "public/index.html", "<html>public</html>");
        write(&dir, "build/index.html", "<html>build</html>");

        assert_eq!(read_local_html(dir.path()).unwrap(), "<html>build</html>");
    }

    #[test]
    fn test_no_html_lists_searched_paths() {
        let dir = TempDir::new().unwrap();
        write(&dir, "README.md", "# nothing here");

        let err = read_local_html(dir.path()).unwrap_err();
        match err {
            AuditError::LocalNotFound { path, searched } => {
                assert_eq!(path, dir.path());
                assert!(searched.iter().any(|s| s.ends_with("index.html")));
                assert!(searched.iter().any(|s| s.contains("dist")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let err = read_local_html(Path::new("/definitely/not/a/real/dir")).unwrap_err();
        assert!(matches!(err, AuditError::LocalNotFound { .. }));
    }

    #[test]
    fn test_auxiliary_file_root_then_public() {
        let dir = TempDir::new().unwrap();
        write(&dir, "robots.txt", "User-agent: *");
        write(&dir, "public/robots.txt", "shadowed");
        write(&dir, "public/llms.txt", "# Site");

        assert_eq!(read_local_file(dir.path(), "robots.txt").as_deref(), Some("User-agent: *"));
        assert_eq!(read_local_file(dir.path(), "llms.txt").as_deref(), Some("# Site"));
        assert_eq!(read_local_file(dir.path(), "sitemap.xml"), None);
    }
}
