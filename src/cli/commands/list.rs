//! List command handlers

use crate::config::Config;
use crate::domain::Status;

use super::{open_store, print_manga_table};

pub fn cmd_list_manga(config: &Config, status: Option<&str>) -> anyhow::Result<()> {
    let store = open_store(config)?;

    if store.is_empty() {
        println!("The collection is empty.");
        println!();
        println!("Add manga with: mangashelf add --title \"...\" or mangashelf online \"query\"");
        return Ok(());
    }

    let records = match status {
        Some(raw) => {
            let status = Status::normalize(raw);
            if !status.is_known() {
                println!("Unknown status '{raw}'. Use 'mangashelf statuses' to see valid values.");
                return Ok(());
            }
            store.filter_by_status(status)
        }
        None => store.list_all().iter().collect(),
    };

    println!("Manga Collection ({} shown, {} total)", records.len(), store.len());
    print_manga_table(records);

    Ok(())
}

pub fn cmd_statuses() {
    for (i, status) in Status::canonical_statuses().iter().enumerate() {
        println!("{}. {} ({})", i + 1, status, status.external_synonym());
    }
}
