pub const COLLECTION_FILENAME: &str = "manga_collection.json";

pub const USERS_FILENAME: &str = "users.json";

/// Display strings. The library is presented in Vietnamese.
pub mod labels {
    pub const STATUS_IN_PROGRESS: &str = "Đang tiến hành";

    pub const STATUS_COMPLETED: &str = "Hoàn thành";

    pub const STATUS_ON_HIATUS: &str = "Tạm ngừng";

    pub const UNKNOWN: &str = "Không xác định";

    pub const EXTERNAL_UNKNOWN: &str = "Unknown";

    pub const NOT_RATED: &str = "Chưa xếp hạng";

    pub const NO_TITLE: &str = "Không có tiêu đề";

    pub const NO_JAPANESE_TITLE: &str = "Không có tiêu đề tiếng Nhật";

    pub const NO_SYNOPSIS: &str = "Không có mô tả";

    pub const JIKAN_SOURCE: &str = "Jikan API (MyAnimeList)";
}

pub mod limits {
    pub const DEFAULT_FETCH_LIMIT: u32 = 10;

    pub const MIN_USERNAME_LEN: usize = 3;

    pub const MIN_PASSWORD_LEN: usize = 6;
}

pub mod cache {
    pub const IMAGE_MAX_AGE_DAYS: u64 = 7;
}
