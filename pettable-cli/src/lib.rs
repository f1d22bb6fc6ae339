//! Command-line driver for the pet table view.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pettable_client::{PageFetcher, PetTableView, TableConfig, TracingNotifier};
use pettable_types::{PageResult, QueryRequest, SortDirection};
use serde_json::json;
use std::{collections::BTreeMap, fs, path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pettable")]
#[command(about = "Browse and manage pet records on a remote table service")]
pub struct Args {
    /// Path to a JSON table configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Service root URL, overriding the configuration
    #[arg(long)]
    pub base_url: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch one page of records
    Page {
        /// 0-based page index
        #[arg(long, default_value = "0")]
        page: u64,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<u64>,

        /// Field to sort by
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Free-text search term
        #[arg(long)]
        search: Option<String>,
    },

    /// Build and print the owner and visit lookups
    Lookups,

    /// Delete a record by key
    Delete { key: String },
}

/// Loads the table configuration from `--config` (or defaults) and applies
/// flag overrides.
pub fn load_config(args: &Args) -> Result<TableConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {:?}", path))?;
            TableConfig::from_json(&json)
                .with_context(|| format!("Invalid config file {:?}", path))?
        }
        None => TableConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Builds the query for a `page` command.
pub fn build_request(command: &Command, config: &TableConfig) -> Result<QueryRequest> {
    let Command::Page {
        page,
        page_size,
        sort,
        desc,
        search,
    } = command
    else {
        anyhow::bail!("not a page command");
    };

    let mut request = QueryRequest::new(*page, page_size.unwrap_or(config.page_size))
        .context("Invalid page request")?;
    if let Some(field) = sort {
        let direction = if *desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        request = request.with_order_by(field.clone(), direction);
    }
    if let Some(term) = search {
        request = request.with_search(term.clone());
    }
    Ok(request)
}

/// Runs a command and returns what it prints.
pub async fn run(args: &Args) -> Result<String> {
    let config = load_config(args)?;
    info!("Using table service at {}", config.entity_url());
    let fetcher = PageFetcher::new(config.clone(), Arc::new(TracingNotifier))
        .context("Failed to create fetcher")?;
    let view = PetTableView::new(fetcher);

    let output = match &args.command {
        command @ Command::Page { .. } => {
            let request = build_request(command, &config)?;
            let ((), page) =
                tokio::join!(view.load_lookups(), view.fetcher().fetch_page(&request));
            let page = page.context("Page fetch failed")?;
            let rows = view.decorate_page(&page).await;
            let decorated = PageResult { rows, ..page };
            serde_json::to_string_pretty(&decorated)?
        }
        Command::Lookups => {
            view.load_lookups().await;
            let owners: BTreeMap<_, _> = view.owners().await.iter().map(own_entry).collect();
            let visits: BTreeMap<_, _> = view.visits().await.iter().map(own_entry).collect();
            let body = json!({
                config.owners.kind.clone(): owners,
                config.visits.kind.clone(): visits,
            });
            serde_json::to_string_pretty(&body)?
        }
        Command::Delete { key } => {
            let outcome = view
                .fetcher()
                .delete_record(key)
                .await
                .context("Delete failed")?;
            if !outcome.is_deleted() {
                anyhow::bail!("Delete of {} was rejected", key);
            }
            format!("Deleted {key}")
        }
    };
    Ok(output)
}

fn own_entry((id, label): (&str, &str)) -> (String, String) {
    (id.to_string(), label.to_string())
}
