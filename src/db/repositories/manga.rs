//! The manga collection store.
//!
//! [`MangaStore`] is the only place that assigns ids and added dates, sets
//! the stored status, or writes `manga_collection.json`. It is permissive:
//! drafts are stored as given (apart from status normalization) and
//! validation is left to the front end.

use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::clients::JikanClient;
use crate::constants::limits::DEFAULT_FETCH_LIMIT;
use crate::db::{now_iso, read_json_array, write_json_pretty};
use crate::domain::{MangaId, Status};
use crate::models::{MangaRecord, NewManga};

pub struct MangaStore {
    path: PathBuf,
    manga: Vec<MangaRecord>,
    jikan: Option<JikanClient>,
}

impl MangaStore {
    /// Opens the collection at `path`, loading whatever is there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            manga: Vec::new(),
            jikan: None,
        };
        store.load();
        store
    }

    /// Attaches the metadata client used by the two fetch operations.
    #[must_use]
    pub fn with_jikan(mut self, client: JikanClient) -> Self {
        self.jikan = Some(client);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the in-memory collection with the file contents.
    ///
    /// A missing or corrupt file yields an empty collection. Statuses are
    /// normalized while deserializing, so foreign values are fixed up here.
    pub fn load(&mut self) {
        self.manga = read_json_array(&self.path);
        debug!(
            path = %self.path.display(),
            count = self.manga.len(),
            "Loaded manga collection"
        );
    }

    pub fn save(&self) -> Result<()> {
        write_json_pretty(&self.path, &self.manga)
    }

    fn next_id(&self) -> MangaId {
        self.manga
            .iter()
            .map(|m| m.id)
            .max()
            .map_or(MangaId::new(1), |max| max.next())
    }

    /// Stores a new record and returns its id.
    pub fn add(&mut self, draft: NewManga) -> Result<MangaId> {
        let id = self.next_id();
        let record = MangaRecord::from_draft(id, now_iso(), draft);

        info!(id = %id, title = %record.title, status = %record.status, "Adding manga");
        self.manga.push(record);
        self.save()?;

        Ok(id)
    }

    /// Replaces every field of `id` except the id itself and its added date.
    ///
    /// Returns `false` without touching anything when `id` is unknown.
    pub fn update(&mut self, id: MangaId, draft: NewManga) -> Result<bool> {
        let Some(existing) = self.manga.iter_mut().find(|m| m.id == id) else {
            debug!(id = %id, "Update skipped, manga not found");
            return Ok(false);
        };

        let added_date = std::mem::take(&mut existing.added_date);
        *existing = MangaRecord::from_draft(id, added_date, draft);

        info!(id = %id, "Updated manga");
        self.save()?;
        Ok(true)
    }

    /// Removes `id`. Returns `false` without touching anything when absent.
    pub fn delete(&mut self, id: MangaId) -> Result<bool> {
        let Some(index) = self.manga.iter().position(|m| m.id == id) else {
            debug!(id = %id, "Delete skipped, manga not found");
            return Ok(false);
        };

        let removed = self.manga.remove(index);
        info!(id = %id, title = %removed.title, "Deleted manga");
        self.save()?;
        Ok(true)
    }

    #[must_use]
    pub fn get(&self, id: MangaId) -> Option<&MangaRecord> {
        self.manga.iter().find(|m| m.id == id)
    }

    /// All records in insertion order.
    #[must_use]
    pub fn list_all(&self) -> &[MangaRecord] {
        &self.manga
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.manga.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.manga.is_empty()
    }

    /// Case-insensitive substring search over title, author and genres.
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<&MangaRecord> {
        let keyword = keyword.to_lowercase();
        self.manga
            .iter()
            .filter(|m| m.matches_keyword(&keyword))
            .collect()
    }

    /// Case-insensitive substring search over genres only.
    #[must_use]
    pub fn search_by_genre(&self, genre: &str) -> Vec<&MangaRecord> {
        let genre = genre.to_lowercase();
        self.manga
            .iter()
            .filter(|m| m.matches_genre(&genre))
            .collect()
    }

    #[must_use]
    pub fn filter_by_status(&self, status: Status) -> Vec<&MangaRecord> {
        self.manga.iter().filter(|m| m.status == status).collect()
    }

    /// Records whose id is in `favorites`, in collection order.
    ///
    /// Ids that no longer exist in the collection are ignored.
    #[must_use]
    pub fn get_favorites(&self, favorites: &[MangaId]) -> Vec<&MangaRecord> {
        let wanted: HashSet<MangaId> = favorites.iter().copied().collect();
        self.manga
            .iter()
            .filter(|m| wanted.contains(&m.id))
            .collect()
    }

    /// Searches Jikan. Nothing is persisted; failures yield an empty list.
    pub async fn fetch_from_external_source(&self, query: &str, limit: u32) -> Vec<NewManga> {
        let Some(jikan) = &self.jikan else {
            warn!("No metadata client configured");
            return Vec::new();
        };

        match jikan.search_manga(query, limit).await {
            Ok(items) => items.into_iter().map(|m| m.into_new_manga()).collect(),
            Err(e) => {
                warn!(query = %query, error = %e, "Jikan search failed");
                Vec::new()
            }
        }
    }

    /// [`MangaStore::fetch_from_external_source`] with the default limit.
    pub async fn fetch_from_external_source_default(&self, query: &str) -> Vec<NewManga> {
        self.fetch_from_external_source(query, DEFAULT_FETCH_LIMIT)
            .await
    }

    /// Fetches the Jikan top list, keeping each item's rank. Failures yield
    /// an empty list.
    pub async fn fetch_top_ranked(&self, limit: u32) -> Vec<NewManga> {
        let Some(jikan) = &self.jikan else {
            warn!("No metadata client configured");
            return Vec::new();
        };

        match jikan.top_manga(limit).await {
            Ok(items) => items.into_iter().map(|m| m.into_ranked_manga()).collect(),
            Err(e) => {
                warn!(error = %e, "Jikan top list failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> MangaStore {
        let path = std::env::temp_dir()
            .join(format!("mangashelf-store-test-{}", uuid::Uuid::new_v4()))
            .join("manga_collection.json");
        MangaStore::open(path)
    }

    fn draft(title: &str, author: &str, genres: &str, status: &str) -> NewManga {
        NewManga {
            title: title.to_string(),
            author: author.to_string(),
            genres: genres.to_string(),
            status: status.to_string(),
            ..NewManga::default()
        }
    }

    #[test]
    fn first_add_gets_id_one_and_canonical_status() {
        let mut store = temp_store();
        let id = store.add(draft("A", "X", "Action", "Ongoing")).unwrap();
        assert_eq!(id, MangaId::new(1));

        let record = store.get(id).unwrap();
        assert_eq!(record.status, Status::InProgress);
        assert!(!record.added_date.is_empty());
    }

    #[test]
    fn ids_follow_the_current_maximum() {
        let mut store = temp_store();
        for title in ["A", "B", "C"] {
            store.add(draft(title, "", "", "")).unwrap();
        }
        assert!(store.delete(MangaId::new(3)).unwrap());

        let id = store.add(draft("D", "", "", "")).unwrap();
        assert_eq!(id, MangaId::new(3));

        assert!(store.delete(MangaId::new(1)).unwrap());
        let id = store.add(draft("E", "", "", "")).unwrap();
        assert_eq!(id, MangaId::new(4));
    }

    #[test]
    fn update_keeps_id_and_added_date() {
        let mut store = temp_store();
        let id = store.add(draft("Old", "X", "Drama", "Finished")).unwrap();
        let added = store.get(id).unwrap().added_date.clone();

        let replacement = NewManga {
            title: "New".into(),
            rating: "8.0".into(),
            status: "Discontinued".into(),
            ..NewManga::default()
        };
        assert!(store.update(id, replacement).unwrap());

        let record = store.get(id).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.added_date, added);
        assert_eq!(record.title, "New");
        assert_eq!(record.author, "");
        assert_eq!(record.genres, "");
        assert_eq!(record.rating, "8.0");
        assert_eq!(record.status, Status::OnHiatus);
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let mut store = temp_store();
        store.add(draft("A", "", "", "")).unwrap();
        let before = store.list_all().to_vec();

        assert!(!store.update(MangaId::new(99), draft("Z", "", "", "")).unwrap());
        assert_eq!(store.list_all(), before.as_slice());
    }

    #[test]
    fn delete_twice_returns_false_the_second_time() {
        let mut store = temp_store();
        let id = store.add(draft("A", "", "", "")).unwrap();
        store.add(draft("B", "", "", "")).unwrap();

        assert!(store.delete(id).unwrap());
        let after_first = store.list_all().to_vec();
        assert!(!store.delete(id).unwrap());
        assert_eq!(store.list_all(), after_first.as_slice());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn search_matches_any_field_ignoring_case() {
        let mut store = temp_store();
        store.add(draft("One Piece", "Eiichiro Oda", "Adventure", "")).unwrap();
        store.add(draft("Monster", "Naoki Urasawa", "Action, Mystery", "")).unwrap();
        store.add(draft("Yotsuba&!", "Kiyohiko Azuma", "Comedy", "")).unwrap();

        let titles = |v: Vec<&MangaRecord>| v.iter().map(|m| m.title.clone()).collect::<Vec<_>>();

        assert_eq!(titles(store.search("action")), vec!["Monster"]);
        assert_eq!(titles(store.search("ODA")), vec!["One Piece"]);
        assert_eq!(titles(store.search("yotsuba")), vec!["Yotsuba&!"]);
        assert!(store.search("horror").is_empty());
    }

    #[test]
    fn genre_search_ignores_title_and_author() {
        let mut store = temp_store();
        store.add(draft("Action Heroes", "", "Comedy", "")).unwrap();
        store.add(draft("Vagabond", "", "Action, Historical", "")).unwrap();

        let found = store.search_by_genre("ACTION");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Vagabond");
    }

    #[test]
    fn status_filter_uses_canonical_values() {
        let mut store = temp_store();
        store.add(draft("A", "", "", "Publishing")).unwrap();
        store.add(draft("B", "", "", "Complete")).unwrap();
        store.add(draft("C", "", "", "Ongoing")).unwrap();

        let in_progress = store.filter_by_status(Status::InProgress);
        assert_eq!(in_progress.len(), 2);
        assert_eq!(store.filter_by_status(Status::Completed).len(), 1);
        assert!(store.filter_by_status(Status::OnHiatus).is_empty());
    }

    #[test]
    fn favorites_keep_collection_order_and_skip_missing_ids() {
        let mut store = temp_store();
        for title in ["A", "B", "C"] {
            store.add(draft(title, "", "", "")).unwrap();
        }

        let favorites = [MangaId::new(3), MangaId::new(42), MangaId::new(1)];
        let found: Vec<_> = store
            .get_favorites(&favorites)
            .iter()
            .map(|m| m.title.clone())
            .collect();
        assert_eq!(found, vec!["A", "C"]);
    }

    #[test]
    fn save_then_load_reproduces_collection() {
        let mut store = temp_store();
        store.add(draft("Berserk", "Miura", "Action", "Publishing")).unwrap();
        store.add(draft("Nana", "Yazawa", "Drama", "On Hiatus")).unwrap();

        let reopened = MangaStore::open(store.path());
        assert_eq!(reopened.list_all(), store.list_all());
    }

    #[test]
    fn load_normalizes_foreign_statuses() {
        let store = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(
            store.path(),
            r#"[
                {"id": 1, "title": "A", "status": "Finished", "added_date": "2020-01-01T00:00:00"},
                {"id": 5, "title": "B", "status": "  Ongoing ", "added_date": "2020-01-02T00:00:00"},
                {"id": 2, "title": "C", "status": "Something else"}
            ]"#,
        )
        .unwrap();

        let mut store = MangaStore::open(store.path());
        let statuses: Vec<Status> = store.list_all().iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            vec![Status::Completed, Status::InProgress, Status::Unknown]
        );

        let id = store.add(draft("D", "", "", "")).unwrap();
        assert_eq!(id, MangaId::new(6));
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let store = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        let store = MangaStore::open(store.path());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn fetch_without_client_is_empty() {
        let store = temp_store();
        assert!(store.fetch_from_external_source("naruto", 10).await.is_empty());
        assert!(store.fetch_top_ranked(10).await.is_empty());
    }
}
