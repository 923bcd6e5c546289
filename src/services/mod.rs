pub mod image;
pub use image::{CleanupStats, ImageCache};
