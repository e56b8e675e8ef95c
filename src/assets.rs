//! Asset root resolution and file reading.
//!
//! Maps request paths to files under the configured asset root. Lookups are
//! contained to the root: traversal components are rejected before the
//! filesystem is touched, and the resolved path is canonicalized and checked
//! against the canonicalized root so a symlink inside the root cannot reach
//! outside it.

use std::path::{Component, Path, PathBuf};

use mime_guess::Mime;
use tokio::fs;

use crate::config::INDEX_FILE;

/// Read-only handle to the directory holding the built front-end.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the file a request path points at, with its inferred content type.
    ///
    /// Returns `None` when the path does not name a readable file inside the
    /// root, for any reason: traversal components, a missing file, a
    /// directory, or a read error. Callers treat all of these as "no such
    /// asset" and fall back to the entry document.
    pub async fn read(&self, request_path: &str) -> Option<(Vec<u8>, Mime)> {
        let path = self.resolve(request_path)?;
        if !path.is_file() {
            return None;
        }
        let content = fs::read(&path).await.ok()?;
        let mime = mime_guess::from_path(&path).first_or_octet_stream();
        Some((content, mime))
    }

    /// Read the entry document.
    ///
    /// Errors carry the underlying I/O kind so callers can tell an absent
    /// document from an unreadable one.
    pub async fn read_index(&self) -> std::io::Result<Vec<u8>> {
        fs::read(self.root.join(INDEX_FILE)).await
    }

    /// Resolve a request path to a file path contained in the asset root.
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = request_path.trim_start_matches('/');

        // Only plain segments survive; `..`, roots, and drive prefixes
        // reject the lookup outright.
        let mut clean = PathBuf::new();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(segment) => clean.push(segment),
                Component::CurDir => {}
                _ => return None,
            }
        }
        if clean.as_os_str().is_empty() {
            return None;
        }

        let candidate = self.root.join(clean);

        // Canonicalize both sides; the resolved path must stay under the root.
        let root = self.root.canonicalize().ok()?;
        let resolved = candidate.canonicalize().ok()?;
        if !resolved.starts_with(&root) {
            tracing::warn!(path = %request_path, "Blocked path escaping the asset root");
            return None;
        }

        Some(resolved)
    }
}
