use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::domain::{MangaId, Status};

/// One catalog entry as it is stored in the collection file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MangaRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub id: MangaId,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title_japanese: String,
    #[serde(deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(deserialize_with = "lenient_string")]
    pub genres: String,
    pub status: Status,
    #[serde(deserialize_with = "lenient_string")]
    pub volumes: String,
    #[serde(deserialize_with = "lenient_string")]
    pub chapters: String,
    #[serde(deserialize_with = "lenient_string")]
    pub rating: String,
    #[serde(deserialize_with = "lenient_string")]
    pub synopsis: String,
    #[serde(deserialize_with = "lenient_string")]
    pub image_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub added_date: String,
    #[serde(flatten)]
    pub external: ExternalFields,
}

/// Fields only present on records that were imported from Jikan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalFields {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_count"
    )]
    pub members: Option<u64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_count"
    )]
    pub favorites: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_count"
    )]
    pub rank: Option<u32>,
}

/// A record as authored by a caller or parsed from Jikan, before the store
/// has assigned an id and an added date.
///
/// `status` is kept raw here; the store normalizes it on write.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewManga {
    pub title: String,
    pub title_japanese: String,
    pub author: String,
    pub year: String,
    pub genres: String,
    pub status: String,
    pub volumes: String,
    pub chapters: String,
    pub rating: String,
    pub synopsis: String,
    pub image_url: String,
    pub external: ExternalFields,
}

/// Reasons a draft is rejected by [`NewManga::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MangaValidationError {
    #[error("Vui lòng nhập tiêu đề manga!")]
    MissingTitle,

    #[error("Vui lòng nhập tên tác giả!")]
    MissingAuthor,

    #[error("Vui lòng nhập thể loại!")]
    MissingGenres,

    #[error("Vui lòng chọn trạng thái!")]
    MissingStatus,
}

impl MangaValidationError {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingTitle => "missing_title",
            Self::MissingAuthor => "missing_author",
            Self::MissingGenres => "missing_genres",
            Self::MissingStatus => "missing_status",
        }
    }
}

impl NewManga {
    /// Checks the fields a hand-entered record must have.
    ///
    /// The store accepts anything; this is for front ends that want to
    /// reject incomplete input before calling `add` or `update`.
    pub fn validate(&self) -> Result<(), MangaValidationError> {
        if self.title.trim().is_empty() {
            return Err(MangaValidationError::MissingTitle);
        }
        if self.author.trim().is_empty() {
            return Err(MangaValidationError::MissingAuthor);
        }
        if self.genres.trim().is_empty() {
            return Err(MangaValidationError::MissingGenres);
        }
        if self.status.trim().is_empty() {
            return Err(MangaValidationError::MissingStatus);
        }
        Ok(())
    }
}

impl MangaRecord {
    /// Builds a stored record from a draft. The status is normalized here.
    #[must_use]
    pub fn from_draft(id: MangaId, added_date: String, draft: NewManga) -> Self {
        Self {
            id,
            title: draft.title,
            title_japanese: draft.title_japanese,
            author: draft.author,
            year: draft.year,
            genres: draft.genres,
            status: Status::normalize(&draft.status),
            volumes: draft.volumes,
            chapters: draft.chapters,
            rating: draft.rating,
            synopsis: draft.synopsis,
            image_url: draft.image_url,
            added_date,
            external: draft.external,
        }
    }

    /// Case-insensitive match of an already lowercased keyword against
    /// title, author or genres.
    #[must_use]
    pub fn matches_keyword(&self, keyword_lower: &str) -> bool {
        self.title.to_lowercase().contains(keyword_lower)
            || self.author.to_lowercase().contains(keyword_lower)
            || self.genres.to_lowercase().contains(keyword_lower)
    }

    #[must_use]
    pub fn matches_genre(&self, genre_lower: &str) -> bool {
        self.genres.to_lowercase().contains(genre_lower)
    }
}

impl From<&MangaRecord> for NewManga {
    fn from(record: &MangaRecord) -> Self {
        Self {
            title: record.title.clone(),
            title_japanese: record.title_japanese.clone(),
            author: record.author.clone(),
            year: record.year.clone(),
            genres: record.genres.clone(),
            status: record.status.label().to_string(),
            volumes: record.volumes.clone(),
            chapters: record.chapters.clone(),
            rating: record.rating.clone(),
            synopsis: record.synopsis.clone(),
            image_url: record.image_url.clone(),
            external: record.external.clone(),
        }
    }
}

/// Reads a string field that older files or Jikan may have stored as a
/// number, a boolean or null.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Reads an id written as a number or a numeric string. Anything else,
/// null included, becomes 0.
fn lenient_id<'de, D>(deserializer: D) -> Result<MangaId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let id = match &value {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or_default(),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    };
    Ok(MangaId::new(id))
}

/// Reads an optional count. Placeholders such as `"N/A"` become `None`.
fn lenient_count<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|n| T::try_from(n).ok()))
}
