use serde::{Deserialize, Serialize};

use crate::domain::{MangaId, UserId};

/// A user entry in `users.json`.
///
/// `password` holds an Argon2 PHC string. Entries written by older versions
/// may still hold plaintext; those are upgraded on the next successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub favorites: Vec<MangaId>,
}

impl User {
    #[must_use]
    pub fn has_favorite(&self, manga_id: MangaId) -> bool {
        self.favorites.contains(&manga_id)
    }
}
