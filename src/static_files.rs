//! Static front-end file serving
//!
//! Files are served from one root directory. A request path is first
//! resolved lexically (so `..` can never climb above the root, whether or
//! not the target exists) and then canonicalized and checked again against
//! the canonical root, which catches symlinks pointing outside it.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// File served for `/`
pub const INDEX_FILE: &str = "index.html";

/// Why an asset could not be served
#[derive(Error, Debug)]
pub enum StaticError {
    /// The path resolves outside the static root.
    #[error("path escapes the static root")]
    Forbidden,

    /// Nothing servable exists at the path.
    #[error("asset not found")]
    NotFound,

    /// Reading an existing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A file ready to be sent
#[derive(Debug)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    /// Serves files from `root`, which must exist.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = std::fs::canonicalize(root)?;
        Ok(Self { root })
    }

    /// Canonical static root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a URL path to a candidate file under the root without touching the disk.
    pub fn map_path(&self, url_path: &str) -> Result<PathBuf, StaticError> {
        let decoded = urlencoding::decode(url_path).map_err(|_| StaticError::NotFound)?;
        let relative = match decoded.trim_start_matches('/') {
            "" => INDEX_FILE,
            other => other,
        };

        let mut resolved = self.root.clone();
        let mut depth = 0usize;
        for comp in Path::new(relative).components() {
            match comp {
                Component::Normal(segment) => {
                    resolved.push(segment);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if depth == 0 {
                        return Err(StaticError::Forbidden);
                    }
                    resolved.pop();
                    depth -= 1;
                }
                Component::RootDir | Component::Prefix(_) => return Err(StaticError::Forbidden),
            }
        }
        Ok(resolved)
    }

    /// Loads the asset for `url_path`.
    pub async fn load(&self, url_path: &str) -> Result<Asset, StaticError> {
        let candidate = self.map_path(url_path)?;

        // Missing files, bad names and non-directory parents all land here.
        let resolved = tokio::fs::canonicalize(&candidate)
            .await
            .map_err(|_| StaticError::NotFound)?;

        if !resolved.starts_with(&self.root) {
            warn!(path = %url_path, "Rejected static path outside root");
            return Err(StaticError::Forbidden);
        }

        let metadata = tokio::fs::metadata(&resolved)
            .await
            .map_err(|_| StaticError::NotFound)?;
        if !metadata.is_file() {
            return Err(StaticError::NotFound);
        }

        let bytes = tokio::fs::read(&resolved).await?;
        Ok(Asset {
            bytes,
            content_type: content_type(&resolved),
        })
    }
}

/// Content type by file extension, `application/octet-stream` when unknown.
pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "json" => "application/json; charset=utf-8",
        _ => "application/octet-stream",
    }
}
