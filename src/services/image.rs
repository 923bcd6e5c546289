//! On-disk cover image cache.
//!
//! Files are named `<md5 of the URL>.png`, so the same cover is downloaded
//! once no matter which record points at it, and caches written by earlier
//! versions of the app stay valid. Every failure is logged and reported as a
//! cache miss.

use anyhow::{Context, Result};
use md5::{Digest, Md5};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

pub struct ImageCache {
    dir: PathBuf,
    max_age: Duration,
    client: Client,
}

#[derive(Debug, Default)]
pub struct CleanupStats {
    pub files_deleted: usize,
    pub bytes_freed: u64,
    pub errors: usize,
}

impl ImageCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            dir: dir.into(),
            max_age,
            client: Client::new(),
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the image for `url` is (or would be) cached.
    #[must_use]
    pub fn cache_path(&self, url: &str) -> PathBuf {
        let digest = Md5::digest(url.as_bytes());
        self.dir.join(format!("{digest:x}.png"))
    }

    /// Returns the cached file for `url`, downloading it first if needed.
    pub async fn get_image(&self, url: &str) -> Option<PathBuf> {
        if url.trim().is_empty() {
            return None;
        }

        let path = self.cache_path(url);
        if fs::try_exists(&path).await.unwrap_or(false) {
            debug!(url = %url, path = %path.display(), "Image cache hit");
            return Some(path);
        }

        match self.download(url, &path).await {
            Ok(()) => Some(path),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to cache image");
                None
            }
        }
    }

    async fn download(&self, url: &str, path: &Path) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        info!(url = %url, path = %path.display(), "Downloading image");

        let response = self.client.get(url).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            anyhow::bail!("Response is not an image (content type: {content_type:?})");
        }

        let bytes = response.bytes().await?;

        fs::write(path, bytes)
            .await
            .with_context(|| format!("Failed to write image to {}", path.display()))?;

        Ok(())
    }

    /// Removes cached files older than the configured maximum age.
    pub async fn clear_stale(&self) -> Result<CleanupStats> {
        let mut stats = CleanupStats::default();

        if !fs::try_exists(&self.dir).await.unwrap_or(false) {
            return Ok(stats);
        }

        let mut entries = fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }

            if let Ok(modified) = metadata.modified() {
                let age = modified.elapsed().unwrap_or_default();

                if age > self.max_age {
                    match fs::remove_file(&path).await {
                        Ok(()) => {
                            debug!("Removed stale cached image: {:?}", path);
                            stats.files_deleted += 1;
                            stats.bytes_freed += metadata.len();
                        }
                        Err(e) => {
                            warn!("Failed to delete {:?}: {}", path, e);
                            stats.errors += 1;
                        }
                    }
                }
            }
        }

        if stats.files_deleted > 0 {
            info!(
                "Image cache cleanup: deleted {} files, freed {} bytes",
                stats.files_deleted, stats.bytes_freed
            );
        }

        Ok(stats)
    }
}
