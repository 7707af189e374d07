// SPDX-License-Identifier: GPL-3.0-only

use anywho::Error;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokecatalog::{
    Catalog,
    api::PokeApi,
    cli::{self, Cli},
    config::Config,
    storage::{FileStorage, MemoryStorage, Storage},
};

fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = cli.apply(config);

    let storage: Box<dyn Storage> = if cli.ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(FileStorage::new(config.data_dir()?))
    };

    let catalog = Catalog::new(PokeApi::new(&config.api_base_url), storage.as_ref())
        .with_artwork_base_url(config.artwork_base_url.clone());

    // every action runs on this one thread, the store is shared by reference
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(cli::execute(cli.command, &catalog, &config))
}
