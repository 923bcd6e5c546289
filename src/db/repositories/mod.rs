pub mod manga;
pub mod user;
