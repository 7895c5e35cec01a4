//! Cover image storage on the local filesystem.
//!
//! Files are written under a single directory with server-generated names
//! and served back by the `/covers` static route.

use std::io;
use std::path::{Path, PathBuf};

use gamezone_core::game::{is_safe_cover_name, stored_cover_name};

#[derive(Debug, Clone)]
pub struct CoverStorage {
    root: PathBuf,
}

impl CoverStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` under a fresh name derived from `original_name` and
    /// return the stored name.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;
        let stored = stored_cover_name(original_name);
        tokio::fs::write(self.root.join(&stored), data).await?;
        tracing::debug!(stored = %stored, bytes = data.len(), "Stored cover image");
        Ok(stored)
    }

    /// Remove a stored cover. Missing files and unsafe names are ignored;
    /// other failures are logged and swallowed since the database row is
    /// already authoritative.
    pub async fn remove(&self, name: &str) {
        if !is_safe_cover_name(name) {
            tracing::warn!(cover = %name, "Refusing to remove cover with unsafe name");
            return;
        }
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => tracing::debug!(cover = %name, "Removed cover image"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(cover = %name, error = %e, "Failed to remove cover image"),
        }
    }
}
