//! Domain primitives for the manga library.
//!
//! Newtype identifiers keep manga ids and user ids from being mixed up, and
//! [`status`] holds the publication-status vocabulary shared by every layer.

pub mod status;

pub use status::Status;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a manga record inside the collection.
///
/// Ids are assigned by [`crate::db::MangaStore`] only; callers never pick
/// them.
///
/// # Examples
///
/// ```rust
/// use mangashelf::domain::MangaId;
///
/// let id = MangaId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MangaId(i64);

impl MangaId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// The id that follows this one in the collection sequence.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MangaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for MangaId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl From<MangaId> for i64 {
    fn from(id: MangaId) -> Self {
        id.0
    }
}

impl std::str::FromStr for MangaId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

/// Identifier of a user in the user directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
