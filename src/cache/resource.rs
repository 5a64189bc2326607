//! Resource loading
//!
//! Resolves request paths under the document root and reads content and
//! metadata fresh on every request.

use hyper::body::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

use crate::http::mime;

/// Failure to produce a resource for a request path
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("resource not found: {0}")]
    NotFound(PathBuf),

    #[error("path escapes document root: {0}")]
    Escaped(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResourceError {
    /// Whether the failure should be reported as 404 rather than 500
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Escaped(_))
    }

    fn from_io(path: &Path, source: io::Error) -> Self {
        // Paths through a regular file or with unusable names are missing, not a server fault
        if matches!(
            source.kind(),
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidInput
        ) {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// A file snapshot taken for a single request
#[derive(Debug, Clone)]
pub struct Resource {
    pub content: Bytes,
    pub modified: SystemTime,
    pub content_type: &'static str,
}

impl Resource {
    pub fn new(content: impl Into<Bytes>, modified: SystemTime, content_type: &'static str) -> Self {
        Self {
            content: content.into(),
            modified,
            content_type,
        }
    }

    /// Load the resource that `url_path` names under `root`
    pub async fn load(root: &Path, url_path: &str) -> Result<Self, ResourceError> {
        let file_path = resolve(root, url_path).await?;

        let metadata = fs::metadata(&file_path)
            .await
            .map_err(|e| ResourceError::from_io(&file_path, e))?;
        if !metadata.is_file() {
            return Err(ResourceError::NotFound(file_path));
        }
        let modified = metadata
            .modified()
            .map_err(|e| ResourceError::from_io(&file_path, e))?;

        let content = fs::read(&file_path)
            .await
            .map_err(|e| ResourceError::from_io(&file_path, e))?;

        // The requested name decides the type, even when it is a symlink to another extension
        let content_type =
            mime::get_content_type(Path::new(url_path).extension().and_then(|e| e.to_str()));

        Ok(Self::new(content, modified, content_type))
    }
}

/// Map a URL path to a file under `root`, rejecting anything outside it
async fn resolve(root: &Path, url_path: &str) -> Result<PathBuf, ResourceError> {
    let relative = url_path.trim_start_matches('/');
    let candidate = root.join(relative);

    let root_canonical = fs::canonicalize(root)
        .await
        .map_err(|e| ResourceError::from_io(root, e))?;
    let canonical = fs::canonicalize(&candidate)
        .await
        .map_err(|e| ResourceError::from_io(&candidate, e))?;

    if !canonical.starts_with(&root_canonical) {
        return Err(ResourceError::Escaped(url_path.to_string()));
    }
    Ok(canonical)
}
