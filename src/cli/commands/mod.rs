mod add;
mod cache;
mod favorite;
mod list;
mod online;
mod remove;
mod search;
mod show;
mod user;

pub use add::{cmd_add_manga, cmd_edit_manga};
pub use cache::{cmd_cache_clean, cmd_cover};
pub use favorite::cmd_favorite;
pub use list::{cmd_list_manga, cmd_statuses};
pub use online::{cmd_online_search, cmd_top_manga};
pub use remove::cmd_remove_manga;
pub use search::{cmd_search_genre, cmd_search_manga};
pub use show::cmd_show_manga;
pub use user::{cmd_passwd, cmd_register};

use std::io::Write;

use crate::clients::JikanClient;
use crate::config::Config;
use crate::db::{MangaStore, UserDirectory};
use crate::models::MangaRecord;

fn open_store(config: &Config) -> anyhow::Result<MangaStore> {
    let jikan = JikanClient::from_config(&config.jikan)?;
    Ok(MangaStore::open(config.collection_path()).with_jikan(jikan))
}

fn open_users(config: &Config) -> UserDirectory {
    UserDirectory::open(config.users_path())
}

/// Prints `label` and reads one line from stdin, without the newline.
fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Prints `label` and reads a password from the terminal without echo.
fn prompt_password(label: &str) -> anyhow::Result<String> {
    Ok(rpassword::prompt_password(label)?)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

fn print_manga_table<'a>(records: impl IntoIterator<Item = &'a MangaRecord>) {
    println!(
        "{:>4}  {:<32} {:<20} {:<24} {:<16} {}",
        "ID", "Title", "Author", "Genres", "Status", "Rating"
    );
    println!("{:-<110}", "");

    for manga in records {
        println!(
            "{:>4}  {:<32} {:<20} {:<24} {:<16} {}",
            manga.id,
            truncate(&manga.title, 29),
            truncate(&manga.author, 17),
            truncate(&manga.genres, 21),
            manga.status,
            manga.rating
        );
    }
}
