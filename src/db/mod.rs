//! File-backed persistence.
//!
//! Both the collection and the user directory live in pretty-printed JSON
//! arrays that are rewritten in full on every change. There is no journal
//! and no atomic rename: a crash in the middle of a write can leave a
//! truncated file, which the next load treats as empty.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

pub mod repositories;

pub use repositories::manga::MangaStore;
pub use repositories::user::{AuthError, FavoriteAction, FavoriteChange, UserDirectory};

/// Reads a JSON array from `path`.
///
/// A missing file is an empty list. Unreadable or malformed files are logged
/// and also read as empty; callers never see the error.
pub(crate) fn read_json_array<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Data file not found, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read data file, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(items) => items,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Data file is corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Overwrites `path` with `value` as pretty-printed JSON, creating parent
/// directories first.
pub(crate) fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Local timestamp in ISO-8601 form, e.g. `2024-05-01T12:34:56.123456`.
pub(crate) fn now_iso() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
