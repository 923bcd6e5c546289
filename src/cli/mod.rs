//! CLI module - Command-line interface for mangashelf
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Args, Parser, Subcommand};

use crate::domain::MangaId;

/// mangashelf - Personal manga library
/// Keeps a local catalog, imports metadata from MyAnimeList via Jikan
#[derive(Parser)]
#[command(name = "mangashelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the collection
    #[command(alias = "ls", alias = "l")]
    List {
        /// Only show manga with this status (label or synonym, e.g. "Ongoing")
        #[arg(long)]
        status: Option<String>,
    },

    /// Show every field of one manga
    #[command(alias = "i", alias = "info")]
    Show {
        /// Manga ID
        id: MangaId,
    },

    /// Add a manga by hand
    #[command(alias = "a")]
    Add {
        #[command(flatten)]
        fields: MangaFields,
    },

    /// Edit a manga; fields that are not given keep their value
    #[command(alias = "e")]
    Edit {
        /// Manga ID
        id: MangaId,
        #[command(flatten)]
        fields: MangaFields,
    },

    /// Remove a manga from the collection
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Manga ID
        id: MangaId,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Search the collection by title, author or genre
    #[command(alias = "s")]
    Search {
        #[arg(required = true)]
        keyword: Vec<String>,
    },

    /// List manga whose genres contain the given text
    #[command(alias = "g")]
    Genre {
        genre: String,
    },

    /// Print the selectable statuses
    Statuses,

    /// Search MyAnimeList (via Jikan) and optionally import a result
    #[command(alias = "o")]
    Online {
        #[arg(required = true)]
        query: Vec<String>,
        /// Number of results to request
        #[arg(long)]
        limit: Option<u32>,
        /// Import the result with this number (1-based) without prompting
        #[arg(long)]
        add: Option<usize>,
    },

    /// Show the MyAnimeList top list and optionally import an entry
    Top {
        /// Number of entries to request
        #[arg(long, default_value = "20")]
        limit: u32,
        /// Import the entry with this number (1-based) without prompting
        #[arg(long)]
        add: Option<usize>,
    },

    /// Download (or locate) the cached cover of a manga
    Cover {
        /// Manga ID
        id: MangaId,
    },

    /// Manage the image cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Create a user account
    Register {
        username: String,
        email: String,
    },

    /// Change a user's password
    Passwd {
        username: String,
    },

    /// Manage a user's favorites
    #[command(alias = "fav")]
    Favorite {
        /// Username to act as
        #[arg(long, short)]
        user: String,
        #[command(subcommand)]
        command: FavoriteCommands,
    },

    /// Create default config file
    Init,
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Remove cached images older than the configured age
    Clean,
}

#[derive(Subcommand)]
pub enum FavoriteCommands {
    /// Add a manga to favorites
    Add { id: MangaId },
    /// Remove a manga from favorites
    #[command(alias = "rm")]
    Remove { id: MangaId },
    /// Add if absent, remove if present
    Toggle { id: MangaId },
    /// List favorite manga
    #[command(alias = "ls")]
    List,
}

/// Editable manga fields.
#[derive(Args, Debug, Default, Clone)]
pub struct MangaFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub title_japanese: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    /// Comma-separated genres
    #[arg(long)]
    pub genres: Option<String>,
    /// Status label or synonym ("Ongoing", "Hoàn thành", ...)
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub volumes: Option<String>,
    #[arg(long)]
    pub chapters: Option<String>,
    #[arg(long)]
    pub rating: Option<String>,
    #[arg(long)]
    pub synopsis: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
}

pub use commands::*;
