// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use anywho::Error;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::{DexApp, Location, runtime};
use crate::config::DexConfig;
use crate::core::{
    api::{Collection, HttpSource},
    cache::CachedDex,
};
use crate::entities::Cursor;

mod app;
mod config;
mod core;
mod entities;
mod i18n;
mod utils;

#[derive(Debug, Parser)]
#[command(name = "dexview", version, about = "Browse PokéAPI from the terminal")]
struct Cli {
    /// PokéAPI compatible base url, overrides the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Pokémon per list page, overrides the config file
    #[arg(long, global = true)]
    per_page: Option<i64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive viewer, starting at LOCATION
    Browse {
        #[arg(default_value = "/")]
        location: String,
    },
    /// Render LOCATION once and exit
    Show { location: String },
    /// Print one page of a collection listing
    Collection {
        #[arg(value_enum)]
        kind: Collection,
        #[arg(long, default_value_t = 0)]
        offset: i64,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Print an ability's short effect
    Ability { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    let cli = Cli::parse();

    let mut config = DexConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(per_page) = cli.per_page {
        config.items_per_page = per_page;
    }
    config.validate()?;

    let dex = CachedDex::new(Arc::new(HttpSource::new(&config.base_url)?));

    let command = cli.command.unwrap_or(Command::Browse {
        location: "/".to_string(),
    });

    match command {
        Command::Browse { location } => {
            let location: Location = location.parse()?;
            runtime::browse(DexApp::new(dex, &config), location).await?;
        }
        Command::Show { location } => {
            let location: Location = location.parse()?;
            let mut app = DexApp::new(dex, &config);
            println!("{}", runtime::show(&mut app, location).await);
        }
        Command::Collection {
            kind,
            offset,
            limit,
        } => {
            let cursor = Cursor::new(offset, limit.unwrap_or(config.default_limit));
            println!("{}", runtime::collection(&dex, kind, cursor).await?);
        }
        Command::Ability { id } => {
            println!("{}", runtime::ability(&dex, &id).await?);
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with the rendered pages. `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
