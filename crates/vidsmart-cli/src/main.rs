//! VidSmart command-line driver.

mod cli;
mod config;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vidsmart_analysis::GeminiClient;
use vidsmart_ingest::IngestionPipeline;
use vidsmart_models::{CatalogEntry, EntryId, GroupId};
use vidsmart_storage::{Catalog, EntryFilter, FileStore};

use crate::cli::{CliArgs, Command};
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let args = CliArgs::parse();
    let config = CliConfig::from_env();
    let data_dir = args.data_dir.clone().unwrap_or(config.data_dir);

    info!("Using data directory {}", data_dir.display());

    run(args.command, data_dir).await
}

/// Initialize tracing with colored output for dev, JSON when requested.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::from_default_env().add_directive("vidsmart=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

async fn run(command: Command, data_dir: std::path::PathBuf) -> anyhow::Result<()> {
    match command {
        Command::AddFile { path, group } => {
            let mut catalog = open_catalog(&data_dir).await?;
            let pipeline = IngestionPipeline::new(GeminiClient::from_env());

            let entry = pipeline
                .ingest_local(&path)
                .await?
                .with_group(group.map(GroupId::from));
            catalog.add_entry(entry.clone()).await?;

            println!("Added:");
            print_entry(&entry);
        }

        Command::AddUrl { url, group } => {
            let mut catalog = open_catalog(&data_dir).await?;
            let pipeline = IngestionPipeline::new(GeminiClient::from_env());

            let entry = pipeline
                .ingest_remote(&url)
                .await?
                .with_group(group.map(GroupId::from));
            catalog.add_entry(entry.clone()).await?;

            println!("Added:");
            print_entry(&entry);
        }

        Command::List { group, search } => {
            let catalog = open_catalog(&data_dir).await?;
            let filter = EntryFilter {
                group: group.map(GroupId::from),
                search,
            };

            let entries = catalog.filtered(&filter);
            if entries.is_empty() {
                println!("No entries.");
            }
            for entry in entries {
                print_entry(entry);
            }
        }

        Command::Show { id } => {
            let catalog = open_catalog(&data_dir).await?;
            match catalog.entry(&EntryId::from(id.as_str())) {
                Some(entry) => {
                    print_entry(entry);
                    println!();
                    println!("{}", entry.full_analysis);
                }
                None => println!("No entry with id {}", id),
            }
        }

        Command::Delete { id } => {
            let mut catalog = open_catalog(&data_dir).await?;
            if catalog.delete_entry(&EntryId::from(id.as_str())).await? {
                println!("Deleted {}", id);
            } else {
                println!("No entry with id {}", id);
            }
        }

        Command::Groups => {
            let catalog = open_catalog(&data_dir).await?;
            for group in catalog.groups() {
                println!("{}  {}", group.id, group.name);
            }
        }

        Command::CreateGroup { name } => {
            let mut catalog = open_catalog(&data_dir).await?;
            let group = catalog.create_group(&name).await?;
            println!("Created group {}  {}", group.id, group.name);
        }

        Command::CheckKey => {
            let client = GeminiClient::from_env();
            let status = client.check_credential().await;
            if status.valid {
                println!("API key OK");
            } else {
                println!(
                    "API key invalid: {}",
                    status.reason.unwrap_or_else(|| "unknown".to_string())
                );
            }
        }
    }

    Ok(())
}

async fn open_catalog(data_dir: &std::path::Path) -> anyhow::Result<Catalog<FileStore>> {
    Ok(Catalog::open(FileStore::new(data_dir)).await?)
}

fn print_entry(entry: &CatalogEntry) {
    println!("{}  [{}]  {}", entry.id, entry.source, entry.title);
    println!("    {}", entry.description);
    if let Some(ref url) = entry.remote_url {
        println!("    {}", url);
    }
    if let Some(ref group) = entry.group_id {
        println!("    group: {}", group);
    }
    println!("    added: {}", entry.created_at.format("%Y-%m-%d %H:%M"));
}
