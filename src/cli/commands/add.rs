//! Add/edit command handlers

use crate::cli::MangaFields;
use crate::config::Config;
use crate::domain::MangaId;
use crate::models::NewManga;

use super::open_store;

fn apply_fields(draft: &mut NewManga, fields: MangaFields) {
    let MangaFields {
        title,
        title_japanese,
        author,
        year,
        genres,
        status,
        volumes,
        chapters,
        rating,
        synopsis,
        image_url,
    } = fields;

    let targets = [
        (&mut draft.title, title),
        (&mut draft.title_japanese, title_japanese),
        (&mut draft.author, author),
        (&mut draft.year, year),
        (&mut draft.genres, genres),
        (&mut draft.status, status),
        (&mut draft.volumes, volumes),
        (&mut draft.chapters, chapters),
        (&mut draft.rating, rating),
        (&mut draft.synopsis, synopsis),
        (&mut draft.image_url, image_url),
    ];

    for (target, value) in targets {
        if let Some(value) = value {
            *target = value.trim().to_string();
        }
    }
}

pub fn cmd_add_manga(config: &Config, fields: MangaFields) -> anyhow::Result<()> {
    let mut draft = NewManga::default();
    apply_fields(&mut draft, fields);

    if let Err(e) = draft.validate() {
        println!("✗ {e}");
        println!("Required: --title, --author, --genres, --status");
        return Ok(());
    }

    let mut store = open_store(config)?;
    let title = draft.title.clone();
    let id = store.add(draft)?;

    println!("✓ Added: {title} (ID: {id})");
    Ok(())
}

pub fn cmd_edit_manga(config: &Config, id: MangaId, fields: MangaFields) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    let Some(existing) = store.get(id) else {
        println!("Manga with ID {id} not found.");
        return Ok(());
    };

    let mut draft = NewManga::from(existing);
    apply_fields(&mut draft, fields);

    if let Err(e) = draft.validate() {
        println!("✗ {e}");
        return Ok(());
    }

    let title = draft.title.clone();
    if store.update(id, draft)? {
        println!("✓ Updated: {title} (ID: {id})");
    } else {
        println!("Manga with ID {id} not found.");
    }

    Ok(())
}
