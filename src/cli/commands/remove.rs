use crate::config::Config;
use crate::domain::MangaId;

use super::{open_store, prompt};

pub fn cmd_remove_manga(config: &Config, id: MangaId, yes: bool) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    let Some(manga) = store.get(id) else {
        println!("Manga with ID {id} not found.");
        return Ok(());
    };
    let title = manga.title.clone();

    if !yes {
        println!("Remove '{title}' (ID: {id}) from the collection?");
        let answer = prompt("Enter 'y' to confirm, anything else to cancel: ")?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if store.delete(id)? {
        println!("✓ Removed: {title}");
    } else {
        println!("Failed to remove manga.");
    }

    Ok(())
}
