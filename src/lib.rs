pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod models;
pub mod services;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{CacheCommands, Cli, Commands};
pub use config::Config;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = config.general.log_level.clone();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::List { status } => cli::cmd_list_manga(&config, status.as_deref()),

        Commands::Show { id } => cli::cmd_show_manga(&config, id),

        Commands::Add { fields } => cli::cmd_add_manga(&config, fields),

        Commands::Edit { id, fields } => cli::cmd_edit_manga(&config, id, fields),

        Commands::Remove { id, yes } => cli::cmd_remove_manga(&config, id, yes),

        Commands::Search { keyword } => cli::cmd_search_manga(&config, &keyword.join(" ")),

        Commands::Genre { genre } => cli::cmd_search_genre(&config, &genre),

        Commands::Statuses => {
            cli::cmd_statuses();
            Ok(())
        }

        Commands::Online { query, limit, add } => {
            cli::cmd_online_search(&config, &query.join(" "), limit, add).await
        }

        Commands::Top { limit, add } => cli::cmd_top_manga(&config, limit, add).await,

        Commands::Cover { id } => cli::cmd_cover(&config, id).await,

        Commands::Cache { command } => match command {
            CacheCommands::Clean => cli::cmd_cache_clean(&config).await,
        },

        Commands::Register { username, email } => cli::cmd_register(&config, &username, &email),

        Commands::Passwd { username } => cli::cmd_passwd(&config, &username),

        Commands::Favorite { user, command } => cli::cmd_favorite(&config, &user, command),

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }
    }
}
