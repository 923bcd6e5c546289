pub mod manga;
pub mod user;

pub use manga::{ExternalFields, MangaRecord, MangaValidationError, NewManga};
pub use user::User;
