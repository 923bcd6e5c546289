//! MyAnimeList import handlers

use crate::config::Config;
use crate::db::MangaStore;
use crate::models::NewManga;

use super::{open_store, prompt, truncate};

pub async fn cmd_online_search(
    config: &Config,
    query: &str,
    limit: Option<u32>,
    add: Option<usize>,
) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    let limit = limit.unwrap_or(config.jikan.default_limit);

    println!("Searching MyAnimeList for: {query}");
    let results = store.fetch_from_external_source(query, limit).await;

    if results.is_empty() {
        println!("No results found (or the service could not be reached).");
        return Ok(());
    }

    print_results(&results, false);
    import_selection(&mut store, results, add)
}

pub async fn cmd_top_manga(config: &Config, limit: u32, add: Option<usize>) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    println!("Fetching top {limit} manga from MyAnimeList...");
    let results = store.fetch_top_ranked(limit).await;

    if results.is_empty() {
        println!("No results found (or the service could not be reached).");
        return Ok(());
    }

    print_results(&results, true);
    import_selection(&mut store, results, add)
}

fn print_results(results: &[NewManga], ranked: bool) {
    for (i, manga) in results.iter().enumerate() {
        let rank = match manga.external.rank {
            Some(rank) if ranked => format!("#{rank} "),
            _ => String::new(),
        };
        println!(
            "{:>3}. {rank}{} ({}) - {}",
            i + 1,
            truncate(&manga.title, 50),
            manga.year,
            manga.status
        );
        println!("     {} | Score: {}", truncate(&manga.author, 40), manga.rating);
    }
    println!();
}

fn import_selection(
    store: &mut MangaStore,
    mut results: Vec<NewManga>,
    add: Option<usize>,
) -> anyhow::Result<()> {
    let choice = match add {
        Some(n) => n,
        None => {
            let input = prompt("Enter number to add to the collection (empty to skip): ")?;
            let input = input.trim();
            if input.is_empty() {
                return Ok(());
            }
            match input.parse::<usize>() {
                Ok(n) => n,
                Err(_) => {
                    println!("Invalid number: {input}");
                    return Ok(());
                }
            }
        }
    };

    if choice == 0 || choice > results.len() {
        println!("Choose a number between 1 and {}.", results.len());
        return Ok(());
    }

    let draft = results.swap_remove(choice - 1);
    let title = draft.title.clone();

    if store
        .list_all()
        .iter()
        .any(|m| m.title.eq_ignore_ascii_case(&title))
    {
        println!("Note: a manga titled '{title}' is already in the collection.");
    }

    let id = store.add(draft)?;
    println!("✓ Added: {title} (ID: {id})");
    Ok(())
}
