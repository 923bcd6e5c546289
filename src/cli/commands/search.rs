use crate::config::Config;

use super::{open_store, print_manga_table};

pub fn cmd_search_manga(config: &Config, keyword: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let results = store.search(keyword.trim());

    if results.is_empty() {
        println!("No manga matching '{keyword}'");
        println!("To search MyAnimeList instead: mangashelf online \"{keyword}\"");
        return Ok(());
    }

    println!("Found {} manga matching '{keyword}'", results.len());
    print_manga_table(results);
    Ok(())
}

pub fn cmd_search_genre(config: &Config, genre: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let results = store.search_by_genre(genre.trim());

    if results.is_empty() {
        println!("No manga in genre '{genre}'");
        return Ok(());
    }

    println!("Found {} manga in genre '{genre}'", results.len());
    print_manga_table(results);
    Ok(())
}
