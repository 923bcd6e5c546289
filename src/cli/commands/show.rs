use crate::config::Config;
use crate::domain::MangaId;

use super::open_store;

pub fn cmd_show_manga(config: &Config, id: MangaId) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let Some(manga) = store.get(id) else {
        println!("Manga with ID {id} not found.");
        return Ok(());
    };

    println!("Manga Info");
    println!("{:-<60}", "");
    println!("ID:         {}", manga.id);
    println!("Title:      {}", manga.title);
    if !manga.title_japanese.is_empty() {
        println!("Japanese:   {}", manga.title_japanese);
    }
    println!("Author:     {}", manga.author);
    println!("Year:       {}", manga.year);
    println!("Genres:     {}", manga.genres);
    println!("Status:     {}", manga.status);
    println!("Volumes:    {}", manga.volumes);
    println!("Chapters:   {}", manga.chapters);
    println!("Rating:     {}", manga.rating);
    println!("Added:      {}", manga.added_date);

    if let Some(source) = &manga.external.source {
        println!("Source:     {source}");
    }
    if let Some(url) = manga.external.url.as_deref().filter(|u| !u.is_empty()) {
        println!("URL:        {url}");
    }
    if let Some(members) = manga.external.members {
        println!("Members:    {members}");
    }
    if let Some(favorites) = manga.external.favorites {
        println!("Favorites:  {favorites}");
    }
    if let Some(rank) = manga.external.rank {
        println!("Rank:       #{rank}");
    }
    if !manga.image_url.is_empty() {
        println!("Cover:      {}", manga.image_url);
    }

    if !manga.synopsis.is_empty() {
        println!();
        println!("{}", manga.synopsis);
    }

    Ok(())
}
