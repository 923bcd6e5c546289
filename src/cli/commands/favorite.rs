use crate::cli::FavoriteCommands;
use crate::config::Config;
use crate::db::FavoriteAction;

use super::{open_store, open_users, print_manga_table, prompt_password};

pub fn cmd_favorite(
    config: &Config,
    username: &str,
    command: FavoriteCommands,
) -> anyhow::Result<()> {
    let mut users = open_users(config);

    let password = prompt_password("Password: ")?;
    let user = match users.login(username, &password) {
        Ok(user) => user,
        Err(e) => {
            println!("✗ {e}");
            return Ok(());
        }
    };

    let store = open_store(config)?;

    let (manga_id, result) = match command {
        FavoriteCommands::List => {
            let favorites = store.get_favorites(&user.favorites);
            if favorites.is_empty() {
                println!("{} has no favorites yet.", user.username);
            } else {
                println!("Favorites of {} ({})", user.username, favorites.len());
                print_manga_table(favorites);
            }
            return Ok(());
        }
        FavoriteCommands::Add { id } => {
            (id, users.update_favorites(user.id, id, FavoriteAction::Add))
        }
        FavoriteCommands::Remove { id } => {
            (id, users.update_favorites(user.id, id, FavoriteAction::Remove))
        }
        FavoriteCommands::Toggle { id } => (id, users.toggle_favorite(user.id, id)),
    };

    let title = store
        .get(manga_id)
        .map_or_else(|| format!("ID {manga_id}"), |m| m.title.clone());

    match result {
        Ok(change) => println!("✓ {}: {title}", change.message()),
        Err(e) => println!("✗ {e}"),
    }

    Ok(())
}
