use crate::config::Config;
use crate::domain::MangaId;
use crate::services::ImageCache;

use super::open_store;

fn image_cache(config: &Config) -> anyhow::Result<ImageCache> {
    let client = reqwest::Client::builder()
        .timeout(config.jikan.timeout())
        .build()?;
    Ok(ImageCache::new(config.cache_dir(), config.images.max_age()).with_client(client))
}

pub async fn cmd_cover(config: &Config, id: MangaId) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let Some(manga) = store.get(id) else {
        println!("Manga with ID {id} not found.");
        return Ok(());
    };

    if manga.image_url.is_empty() {
        println!("{} has no cover image URL.", manga.title);
        return Ok(());
    }

    let cache = image_cache(config)?;
    match cache.get_image(&manga.image_url).await {
        Some(path) => println!("{}", path.display()),
        None => println!("Could not download cover for {}.", manga.title),
    }

    Ok(())
}

pub async fn cmd_cache_clean(config: &Config) -> anyhow::Result<()> {
    let cache = image_cache(config)?;
    let stats = cache.clear_stale().await?;

    println!("Image cache: {}", cache.dir().display());
    println!(
        "  Files older than {} days removed: {}",
        config.images.max_age_days, stats.files_deleted
    );
    println!("  Space freed: {} KB", stats.bytes_freed / 1024);
    if stats.errors > 0 {
        println!("  Errors: {}", stats.errors);
    }

    Ok(())
}
