// SPDX-License-Identifier: GPL-3.0-only

use std::{fmt::Write as _, path::PathBuf};

use anywho::{Error, anywho};
use clap::{Parser, Subcommand};

use crate::{
    api::CatalogSource,
    catalog::Catalog,
    config::Config,
    entities::{DetailRecord, ListEntry, Override},
    router::{self, Page, Route},
    storage::Storage,
    utils::{capitalize_string, scale_numbers},
};

#[derive(Debug, Parser)]
#[command(name = "pokecatalog", version, about = "Browse PokéApi and keep your own notes")]
pub struct Cli {
    /// Config file, defaults to the platform config dir
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// PokéApi base url
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory the nicknames and descriptions are stored in
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep nicknames and descriptions in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List Pokémon
    List {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the details of one or more Pokémon, by id or name
    Show {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Open a page by path, `/` or `/pokemon/<id>`
    Open { path: String },
    /// List the Pokémon whose name or nickname contains the query
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Give a Pokémon a nickname
    Nickname { id: i64, nickname: String },
    /// Attach a description to a Pokémon
    Describe { id: i64, description: String },
}

impl Cli {
    /// Applies the command line overrides on top of `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(api_url) = &self.api_url {
            config.api_base_url = api_url.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = Some(data_dir.clone());
        }
        config
    }
}

/// Runs `command` against the catalog and prints what it produced
pub async fn execute<S: CatalogSource, T: Storage>(
    command: Command,
    catalog: &Catalog<S, T>,
    config: &Config,
) -> Result<(), Error> {
    let (output, outcome) = match command {
        Command::List { limit } => (
            list_page(catalog, limit.unwrap_or(config.list_limit)).await?,
            Ok(()),
        ),
        Command::Show { keys } => show_pages(catalog, &keys).await,
        Command::Open { path } => {
            let route = router::resolve(&path);
            if let Route::Redirect(page) = &route {
                tracing::info!(%path, to = %page.path(), "unknown path, redirecting");
            }

            match route.into_page() {
                Page::Home => (list_page(catalog, config.list_limit).await?, Ok(())),
                Page::Detail { id } => show_pages(catalog, &[id]).await,
            }
        }
        Command::Search { query, limit } => {
            catalog
                .fetch_list(limit.unwrap_or(config.list_limit))
                .await?;
            (render_list(catalog, &catalog.search(&query)), Ok(()))
        }
        Command::Nickname { id, nickname } => {
            catalog.save_override(id, Override::nickname(nickname))?;
            (format!("Saved nickname for #{id}\n"), Ok(()))
        }
        Command::Describe { id, description } => {
            catalog.save_override(id, Override::description(description))?;
            (format!("Saved description for #{id}\n"), Ok(()))
        }
    };

    print!("{output}");
    outcome
}

async fn list_page<S: CatalogSource, T: Storage>(
    catalog: &Catalog<S, T>,
    limit: usize,
) -> Result<String, Error> {
    catalog.fetch_list(limit).await?;
    Ok(render_list(catalog, &catalog.list()))
}

/// Fetches every key at once and renders the ones that loaded.
///
/// The rendered pages are returned even when some keys failed, alongside the error naming them.
pub async fn show_pages<S: CatalogSource, T: Storage>(
    catalog: &Catalog<S, T>,
    keys: &[String],
) -> (String, Result<(), Error>) {
    let records = futures::future::join_all(keys.iter().map(|key| catalog.fetch_detail(key))).await;

    let mut output = String::new();
    let mut failed = Vec::new();
    for (key, record) in keys.iter().zip(records) {
        match record {
            Some(record) => output.push_str(&render_detail(catalog, &record)),
            None => failed.push(key.as_str()),
        }
    }

    if failed.is_empty() {
        return (output, Ok(()));
    }

    let message = catalog
        .error()
        .map(|e| e.to_string())
        .unwrap_or_else(|| String::from("Could not fetch Pokémon details."));
    let error = anywho!("{message} ({})", failed.join(", "));
    (output, Err(error))
}

/// One line per Pokémon: `#id  Name  (nickname)`
pub fn render_list<S: CatalogSource, T: Storage>(
    catalog: &Catalog<S, T>,
    entries: &[ListEntry],
) -> String {
    let mut output = String::new();

    for entry in entries {
        let name = capitalize_string(&entry.name);
        match entry.id {
            Some(id) => {
                let display_name = catalog.display_name(id, &name);
                if display_name == name {
                    let _ = writeln!(output, "#{id:<5} {name}");
                } else {
                    let _ = writeln!(output, "#{id:<5} {display_name} ({name})");
                }
            }
            None => {
                let _ = writeln!(output, "{:<6} {name}", "?");
            }
        }
    }

    if entries.is_empty() {
        output.push_str("No Pokémon found\n");
    }

    output
}

pub fn render_detail<S: CatalogSource, T: Storage>(
    catalog: &Catalog<S, T>,
    record: &DetailRecord,
) -> String {
    let name = capitalize_string(&record.name);
    let display_name = catalog.display_name(record.id, &name);
    let description = catalog.custom_description(record.id);

    let mut output = String::new();
    let _ = writeln!(output, "#{} {display_name}", record.id);
    if display_name != name {
        let _ = writeln!(output, "  Species:     {name}");
    }
    if !description.is_empty() {
        let _ = writeln!(output, "  Notes:       {description}");
    }
    if let Some(image_url) = &record.image_url {
        let _ = writeln!(output, "  Image:       {image_url}");
    }
    let _ = writeln!(output, "  Types:       {}", join_capitalized(&record.types));
    let _ = writeln!(output, "  Abilities:   {}", join_capitalized(&record.abilities));
    let _ = writeln!(output, "  Height:      {} m", scale_numbers(record.height));
    let _ = writeln!(output, "  Weight:      {} kg", scale_numbers(record.weight));
    if let Some(base_experience) = record.base_experience {
        let _ = writeln!(output, "  Base exp.:   {base_experience}");
    }

    let _ = writeln!(output, "  Stats:");
    for stat in &record.stats {
        let _ = writeln!(
            output,
            "    {:<16} {:>3}",
            capitalize_string(&stat.name),
            stat.base_value
        );
    }
    let _ = writeln!(output, "    {:<16} {:>3}", "Total", record.total_stats());

    if !record.moves.is_empty() {
        let _ = writeln!(output, "  Moves:       {}", join_capitalized(&record.moves));
    }

    output
}

fn join_capitalized(values: &[String]) -> String {
    values
        .iter()
        .map(|v| capitalize_string(v))
        .collect::<Vec<String>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["pokecatalog", "show", "1", "pikachu"]).unwrap();
        match cli.command {
            Command::Show { keys } => assert_eq!(keys, vec!["1", "pikachu"]),
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["pokecatalog", "nickname", "25", "Sparky"]).unwrap();
        assert!(matches!(cli.command, Command::Nickname { id: 25, .. }));
    }

    #[test]
    fn show_needs_a_key() {
        assert!(Cli::try_parse_from(["pokecatalog", "show"]).is_err());
    }

    #[test]
    fn flags_override_the_config() {
        let cli = Cli::try_parse_from([
            "pokecatalog",
            "list",
            "--api-url",
            "http://localhost:8000/api/v2",
            "--data-dir",
            "/tmp/pc",
        ])
        .unwrap();

        let config = cli.apply(Config::default());
        assert_eq!(config.api_base_url, "http://localhost:8000/api/v2");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/pc")));
        assert_eq!(config.list_limit, 100);
    }
}
