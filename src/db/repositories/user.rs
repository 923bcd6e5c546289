//! File-backed user directory: registration, login and favorites.
//!
//! Every mutating operation reports expected failures through [`AuthError`]
//! instead of panicking or logging, so front ends can show the message
//! directly and branch on [`AuthError::code`].

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::limits::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
use crate::db::{now_iso, read_json_array, write_json_pretty};
use crate::domain::{MangaId, UserId};
use crate::models::User;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Errors specific to user directory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Tên người dùng phải có ít nhất 3 ký tự")]
    UsernameTooShort,

    #[error("Tên người dùng đã tồn tại")]
    UsernameTaken,

    #[error("Mật khẩu phải có ít nhất 6 ký tự")]
    PasswordTooShort,

    #[error("Mật khẩu phải bao gồm cả chữ và số")]
    PasswordTooWeak,

    #[error("Mật khẩu xác nhận không khớp")]
    PasswordMismatch,

    #[error("Email không hợp lệ")]
    InvalidEmail,

    #[error("Tên đăng nhập hoặc mật khẩu không đúng")]
    InvalidCredentials,

    #[error("Mật khẩu hiện tại không đúng")]
    WrongCurrentPassword,

    #[error("Vui lòng đăng nhập")]
    NotLoggedIn,

    #[error("Không tìm thấy người dùng")]
    UserNotFound,

    #[error("Không có thay đổi")]
    NoChange,

    #[error("Lỗi lưu trữ: {0}")]
    Storage(String),
}

impl AuthError {
    /// Stable reason code for programmatic handling.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UsernameTooShort => "username_too_short",
            Self::UsernameTaken => "username_taken",
            Self::PasswordTooShort => "password_too_short",
            Self::PasswordTooWeak => "password_too_weak",
            Self::PasswordMismatch => "password_mismatch",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidCredentials => "invalid_credentials",
            Self::WrongCurrentPassword => "wrong_current_password",
            Self::NotLoggedIn => "not_logged_in",
            Self::UserNotFound => "user_not_found",
            Self::NoChange => "no_change",
            Self::Storage(_) => "storage",
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

impl FavoriteChange {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Added => "Đã thêm vào danh sách yêu thích",
            Self::Removed => "Đã xóa khỏi danh sách yêu thích",
        }
    }
}

pub struct UserDirectory {
    path: PathBuf,
    users: Vec<User>,
    current: Option<UserId>,
}

impl UserDirectory {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let users = read_json_array(&path);
        Self {
            path,
            users,
            current: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), AuthError> {
        write_json_pretty(&self.path, &self.users)?;
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Creates a user after validating every field.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        confirm_password: &str,
        email: &str,
    ) -> Result<User, AuthError> {
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(AuthError::UsernameTooShort);
        }
        if self.find_by_username(username).is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if !EMAIL_PATTERN.is_match(email) {
            return Err(AuthError::InvalidEmail);
        }

        let id = self
            .users
            .iter()
            .map(|u| u.id.value())
            .max()
            .map_or(UserId::new(1), |max| UserId::new(max + 1));

        let user = User {
            id,
            username: username.to_string(),
            password: hash_password(password)?,
            email: email.to_string(),
            join_date: now_iso(),
            favorites: Vec::new(),
        };

        self.users.push(user.clone());
        self.save()?;
        info!(user_id = %id, username = %username, "Registered user");

        Ok(user)
    }

    /// Verifies credentials and makes the user current.
    ///
    /// Plaintext passwords left by older data files are accepted once and
    /// replaced with a hash.
    pub fn login(&mut self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some(index) = self.users.iter().position(|u| u.username == username) else {
            debug!(username = %username, "Login failed, unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        match verify_password(password, &self.users[index].password) {
            PasswordCheck::Valid => {}
            PasswordCheck::ValidLegacy => {
                info!(username = %username, "Upgrading plaintext password to hash");
                self.users[index].password = hash_password(password)?;
                self.save()?;
            }
            PasswordCheck::Invalid => {
                debug!(username = %username, "Login failed, wrong password");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let user = self.users[index].clone();
        self.current = Some(user.id);
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.current.take().map(|_| ()).ok_or(AuthError::NotLoggedIn)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current.and_then(|id| self.get(id))
    }

    /// Changes the password of the logged-in user.
    pub fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        let current_id = self.current.ok_or(AuthError::NotLoggedIn)?;
        let index = self
            .users
            .iter()
            .position(|u| u.id == current_id)
            .ok_or(AuthError::UserNotFound)?;

        if verify_password(current_password, &self.users[index].password) == PasswordCheck::Invalid
        {
            return Err(AuthError::WrongCurrentPassword);
        }

        validate_new_password(new_password)?;
        if new_password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        self.users[index].password = hash_password(new_password)?;
        self.save()?;
        info!(user_id = %current_id, "Password changed");
        Ok(())
    }

    /// Adds or removes `manga_id` from a user's favorites.
    ///
    /// The manga id is not checked against the collection.
    pub fn update_favorites(
        &mut self,
        user_id: UserId,
        manga_id: MangaId,
        action: FavoriteAction,
    ) -> Result<FavoriteChange, AuthError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AuthError::UserNotFound)?;

        let present = user.favorites.contains(&manga_id);
        let change = match (action, present) {
            (FavoriteAction::Add, false) => {
                user.favorites.push(manga_id);
                FavoriteChange::Added
            }
            (FavoriteAction::Remove, true) => {
                user.favorites.retain(|id| *id != manga_id);
                FavoriteChange::Removed
            }
            _ => return Err(AuthError::NoChange),
        };

        self.save()?;
        debug!(user_id = %user_id, manga_id = %manga_id, ?change, "Favorites updated");
        Ok(change)
    }

    /// Flips membership of `manga_id` in a user's favorites.
    pub fn toggle_favorite(
        &mut self,
        user_id: UserId,
        manga_id: MangaId,
    ) -> Result<FavoriteChange, AuthError> {
        let present = self
            .get(user_id)
            .ok_or(AuthError::UserNotFound)?
            .has_favorite(manga_id);

        let action = if present {
            FavoriteAction::Remove
        } else {
            FavoriteAction::Add
        };
        self.update_favorites(user_id, manga_id, action)
    }
}

fn validate_new_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err(AuthError::PasswordTooWeak);
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Storage(format!("Failed to hash password: {e}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PasswordCheck {
    Valid,
    ValidLegacy,
    Invalid,
}

fn verify_password(password: &str, stored: &str) -> PasswordCheck {
    match PasswordHash::new(stored) {
        Ok(parsed) => {
            if Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
            {
                PasswordCheck::Valid
            } else {
                PasswordCheck::Invalid
            }
        }
        Err(_) if !stored.is_empty() && stored == password => PasswordCheck::ValidLegacy,
        Err(_) => PasswordCheck::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_directory() -> UserDirectory {
        let path = std::env::temp_dir()
            .join(format!("mangashelf-users-test-{}", uuid::Uuid::new_v4()))
            .join("users.json");
        UserDirectory::open(path)
    }

    fn register_alice(dir: &mut UserDirectory) -> User {
        dir.register("alice", "secret1", "secret1", "alice@example.com")
            .unwrap()
    }

    #[test]
    fn register_assigns_ids_and_hashes_passwords() {
        let mut dir = temp_directory();
        let alice = register_alice(&mut dir);
        assert_eq!(alice.id, UserId::new(1));
        assert_ne!(alice.password, "secret1");
        assert!(alice.password.starts_with("$argon2"));
        assert!(alice.favorites.is_empty());
        assert!(!alice.join_date.is_empty());

        let bob = dir
            .register("bob", "hunter22", "hunter22", "bob@example.org")
            .unwrap();
        assert_eq!(bob.id, UserId::new(2));
    }

    #[test]
    fn register_validation_failures() {
        let mut dir = temp_directory();
        register_alice(&mut dir);

        let cases = [
            (("al", "secret1", "secret1", "a@b.co"), "username_too_short"),
            (("alice", "secret1", "secret1", "a@b.co"), "username_taken"),
            (("carol", "abc", "abc", "a@b.co"), "password_too_short"),
            (("carol", "secret1", "secret2", "a@b.co"), "password_mismatch"),
            (("carol", "secret1", "secret1", "not-an-email"), "invalid_email"),
            (("carol", "secret1", "secret1", "a@b.c"), "invalid_email"),
        ];

        for ((user, pass, confirm, email), code) in cases {
            let err = dir.register(user, pass, confirm, email).unwrap_err();
            assert_eq!(err.code(), code, "{user}/{email}");
        }
        assert_eq!(dir.users.len(), 1);
    }

    #[test]
    fn login_and_logout() {
        let mut dir = temp_directory();
        register_alice(&mut dir);

        let err = dir.login("alice", "wrong").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), "Tên đăng nhập hoặc mật khẩu không đúng");
        assert!(dir.login("nobody", "secret1").is_err());

        let user = dir.login("alice", "secret1").unwrap();
        assert_eq!(dir.current_user().map(|u| u.id), Some(user.id));

        assert!(dir.logout().is_ok());
        assert!(dir.current_user().is_none());
        assert!(matches!(dir.logout(), Err(AuthError::NotLoggedIn)));
    }

    #[test]
    fn plaintext_passwords_are_upgraded_on_login() {
        let dir = temp_directory();
        std::fs::create_dir_all(dir.path().parent().unwrap()).unwrap();
        std::fs::write(
            dir.path(),
            r#"[{"id": 3, "username": "legacy", "password": "oldpass1",
                 "email": "l@example.com", "join_date": "2023-01-01T00:00:00",
                 "favorites": [1, 2]}]"#,
        )
        .unwrap();

        let mut dir = UserDirectory::open(dir.path());
        let user = dir.login("legacy", "oldpass1").unwrap();
        assert_eq!(user.favorites, vec![MangaId::new(1), MangaId::new(2)]);
        assert!(user.password.starts_with("$argon2"));

        let reopened = UserDirectory::open(dir.path());
        let stored = reopened.find_by_username("legacy").unwrap();
        assert!(stored.password.starts_with("$argon2"));

        let mut reopened = reopened;
        assert!(reopened.login("legacy", "oldpass1").is_ok());
    }

    #[test]
    fn change_password_rules() {
        let mut dir = temp_directory();
        register_alice(&mut dir);

        assert_eq!(
            dir.change_password("secret1", "newpass1", "newpass1")
                .unwrap_err()
                .code(),
            "not_logged_in"
        );

        dir.login("alice", "secret1").unwrap();
        assert_eq!(
            dir.change_password("nope", "newpass1", "newpass1")
                .unwrap_err()
                .code(),
            "wrong_current_password"
        );
        assert_eq!(
            dir.change_password("secret1", "abc1", "abc1")
                .unwrap_err()
                .code(),
            "password_too_short"
        );
        assert_eq!(
            dir.change_password("secret1", "onlyletters", "onlyletters")
                .unwrap_err()
                .code(),
            "password_too_weak"
        );
        assert_eq!(
            dir.change_password("secret1", "newpass1", "newpass2")
                .unwrap_err()
                .code(),
            "password_mismatch"
        );

        dir.change_password("secret1", "newpass1", "newpass1")
            .unwrap();
        dir.logout().unwrap();
        assert!(dir.login("alice", "secret1").is_err());
        assert!(dir.login("alice", "newpass1").is_ok());
    }

    #[test]
    fn favorites_add_remove_and_toggle() {
        let mut dir = temp_directory();
        let alice = register_alice(&mut dir);
        let manga = MangaId::new(7);

        assert_eq!(
            dir.update_favorites(alice.id, manga, FavoriteAction::Add)
                .unwrap(),
            FavoriteChange::Added
        );
        assert!(matches!(
            dir.update_favorites(alice.id, manga, FavoriteAction::Add),
            Err(AuthError::NoChange)
        ));
        assert_eq!(
            dir.toggle_favorite(alice.id, manga).unwrap(),
            FavoriteChange::Removed
        );
        assert!(matches!(
            dir.update_favorites(alice.id, manga, FavoriteAction::Remove),
            Err(AuthError::NoChange)
        ));
        assert_eq!(
            dir.toggle_favorite(alice.id, manga).unwrap(),
            FavoriteChange::Added
        );

        let reopened = UserDirectory::open(dir.path());
        assert_eq!(reopened.get(alice.id).unwrap().favorites, vec![manga]);

        assert!(matches!(
            dir.toggle_favorite(UserId::new(99), manga),
            Err(AuthError::UserNotFound)
        ));
    }
}
