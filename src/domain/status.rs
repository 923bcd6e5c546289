//! Publication status vocabulary.
//!
//! Manga coming from Jikan, from hand-edited files, or from older versions of
//! the collection use a loose set of status strings ("Publishing",
//! "Finished", "Discontinued", ...). Everything that gets stored or displayed
//! is collapsed onto three canonical values, rendered with their Vietnamese
//! labels, plus an [`Status::Unknown`] sentinel for anything unrecognized.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::constants::labels;

/// Canonical publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    InProgress,
    Completed,
    OnHiatus,
    #[default]
    Unknown,
}

/// External synonym table, in lookup order.
///
/// Several external strings map to the same canonical status. Reverse lookups
/// scan this table front to back, so the first entry for a status is the one
/// returned by [`Status::external_synonym`].
const SYNONYMS: &[(&str, Status)] = &[
    ("Publishing", Status::InProgress),
    ("Completed", Status::Completed),
    ("On Hiatus", Status::OnHiatus),
    ("Finished", Status::Completed),
    ("Complete", Status::Completed),
    ("Hiatus", Status::OnHiatus),
    ("Ongoing", Status::InProgress),
    ("Currently Publishing", Status::InProgress),
    ("Discontinued", Status::OnHiatus),
    ("Not yet published", Status::InProgress),
    (labels::STATUS_IN_PROGRESS, Status::InProgress),
    (labels::STATUS_COMPLETED, Status::Completed),
    (labels::STATUS_ON_HIATUS, Status::OnHiatus),
];

const CANONICAL: [Status; 3] = [Status::InProgress, Status::Completed, Status::OnHiatus];

impl Status {
    /// Maps any raw status string onto the canonical set.
    ///
    /// Surrounding whitespace is ignored. Canonical labels pass through
    /// unchanged, known synonyms are translated, and everything else
    /// (including the empty string) becomes [`Status::Unknown`].
    ///
    /// ```rust
    /// use mangashelf::domain::Status;
    ///
    /// assert_eq!(Status::normalize(" Ongoing "), Status::InProgress);
    /// assert_eq!(Status::normalize("Hoàn thành"), Status::Completed);
    /// assert_eq!(Status::normalize("???"), Status::Unknown);
    /// ```
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(status) = CANONICAL.into_iter().find(|s| s.label() == trimmed) {
            return status;
        }
        Self::to_canonical(trimmed)
    }

    /// Same as [`Status::normalize`] for optional input; `None` is Unknown.
    #[must_use]
    pub fn normalize_opt(raw: Option<&str>) -> Self {
        raw.map_or(Self::Unknown, Self::normalize)
    }

    /// Synonym-table lookup only.
    #[must_use]
    pub fn to_canonical(raw: &str) -> Self {
        let trimmed = raw.trim();
        SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == trimmed)
            .map_or(Self::Unknown, |(_, status)| *status)
    }

    /// A representative external (English) string for this status.
    #[must_use]
    pub fn external_synonym(self) -> &'static str {
        SYNONYMS
            .iter()
            .find(|(_, status)| *status == self)
            .map_or(labels::EXTERNAL_UNKNOWN, |(synonym, _)| *synonym)
    }

    /// The selectable statuses, in display order.
    #[must_use]
    pub const fn canonical_statuses() -> [Self; 3] {
        CANONICAL
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => labels::STATUS_IN_PROGRESS,
            Self::Completed => labels::STATUS_COMPLETED,
            Self::OnHiatus => labels::STATUS_ON_HIATUS,
            Self::Unknown => labels::UNKNOWN,
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::normalize_opt(raw.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_synonyms_collapse_to_canonical() {
        for raw in ["Publishing", "Ongoing", "Currently Publishing", "Not yet published"] {
            assert_eq!(Status::normalize(raw), Status::InProgress, "{raw}");
        }
        for raw in ["Completed", "Finished", "Complete"] {
            assert_eq!(Status::normalize(raw), Status::Completed, "{raw}");
        }
        for raw in ["On Hiatus", "Hiatus", "Discontinued"] {
            assert_eq!(Status::normalize(raw), Status::OnHiatus, "{raw}");
        }
    }

    #[test]
    fn canonical_labels_pass_through() {
        for status in Status::canonical_statuses() {
            assert_eq!(Status::normalize(status.label()), status);
            assert_eq!(Status::to_canonical(status.label()), status);
        }
    }

    #[test]
    fn unrecognized_and_empty_map_to_unknown() {
        assert_eq!(Status::normalize(""), Status::Unknown);
        assert_eq!(Status::normalize("   "), Status::Unknown);
        assert_eq!(Status::normalize("publishing"), Status::Unknown);
        assert_eq!(Status::normalize_opt(None), Status::Unknown);
        assert_eq!(Status::to_canonical("Cancelled"), Status::Unknown);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(Status::normalize("  Finished\n"), Status::Completed);
        assert_eq!(Status::normalize(" Tạm ngừng "), Status::OnHiatus);
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            "Publishing",
            "Finished",
            "Discontinued",
            "Đang tiến hành",
            "Hoàn thành",
            "Tạm ngừng",
            "Không xác định",
            "",
            "garbage",
        ];
        for raw in inputs {
            let once = Status::normalize(raw);
            let twice = Status::normalize(once.label());
            assert_eq!(once, twice, "{raw}");
        }
    }

    #[test]
    fn unknown_label_is_distinct_from_canonical_set() {
        assert!(
            Status::canonical_statuses()
                .iter()
                .all(|s| s.label() != Status::Unknown.label())
        );
        assert!(!Status::Unknown.is_known());
    }

    #[test]
    fn reverse_lookup_returns_first_table_entry() {
        // Several synonyms exist per status; the first one in table order
        // is the representative.
        assert_eq!(Status::InProgress.external_synonym(), "Publishing");
        assert_eq!(Status::Completed.external_synonym(), "Completed");
        assert_eq!(Status::OnHiatus.external_synonym(), "On Hiatus");
        assert_eq!(Status::Unknown.external_synonym(), "Unknown");

        // Lossy: "Finished" does not come back out.
        let status = Status::normalize("Finished");
        assert_ne!(status.external_synonym(), "Finished");
    }

    #[test]
    fn canonical_order_is_fixed() {
        assert_eq!(
            Status::canonical_statuses(),
            [Status::InProgress, Status::Completed, Status::OnHiatus]
        );
    }

    #[test]
    fn serde_writes_labels_and_normalizes_on_read() {
        let json = serde_json::to_string(&Status::OnHiatus).unwrap();
        assert_eq!(json, "\"Tạm ngừng\"");

        let status: Status = serde_json::from_str("\"Currently Publishing\"").unwrap();
        assert_eq!(status, Status::InProgress);

        let status: Status = serde_json::from_str("null").unwrap();
        assert_eq!(status, Status::Unknown);
    }
}
