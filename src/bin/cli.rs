//! Book Catalog CLI
//!
//! Runs the scraper, serves the query API, and inspects the catalog file.

use std::path::PathBuf;
use std::sync::Arc;

use catalog::{
    error::Result,
    models::Config,
    pipeline, server,
    services::query,
    storage::{CsvCatalog, RecordSource},
    utils::http::HttpFetcher,
};
use clap::{Parser, Subcommand};

/// Book Catalog - books.toscrape.com scraper and query API
#[derive(Parser, Debug)]
#[command(
    name = "catalog",
    version,
    about = "Scrape a book listing site and serve it as a read-only API"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape every category and replace the catalog file
    Scrape {
        /// Catalog file to write (default: storage.source_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the catalog over HTTP
    Serve {
        /// Address to bind (default: server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Catalog file to read (default: storage.source_file)
        #[arg(short, long)]
        source: Option<PathBuf>,
    },

    /// Validate configuration file
    Validate,

    /// Show catalog file info
    Info {
        /// Catalog file to read (default: storage.source_file)
        #[arg(short, long)]
        source: Option<PathBuf>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Scrape { output } => {
            if let Some(path) = output {
                config.storage.source_file = path;
            }
            config.validate()?;

            let fetcher = HttpFetcher::from_config(&config.scraper)?;
            let catalog = CsvCatalog::new(&config.storage.source_file);
            let summary = pipeline::run_scraper(&config, &fetcher, &catalog).await?;

            log::info!(
                "Scrape complete! {} books written to {}",
                summary.book_count,
                summary.output.display()
            );
        }

        Command::Serve { host, port, source } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(path) = source {
                config.storage.source_file = path;
            }
            config.validate()?;

            let catalog = CsvCatalog::new(&config.storage.source_file);
            if let Err(e) = catalog.load().await {
                log::warn!(
                    "Catalog at {} does not load yet ({}); queries will fail until it does",
                    catalog.location(),
                    e
                );
            }
            server::run_server(Arc::new(catalog), config.server.clone()).await?;
        }

        Command::Validate => pipeline::run_validate(&config)?,

        Command::Info { source } => {
            let path = source.unwrap_or_else(|| config.storage.source_file.clone());
            let catalog = CsvCatalog::new(&path);

            log::info!("Catalog file: {}", path.display());
            let records = catalog.load().await?;
            let categories = query::distinct_categories(&records);

            log::info!("Books: {}", records.len());
            log::info!("Categories: {}", categories.len());
            for name in &categories {
                let count = records
                    .iter()
                    .filter(|r| r.category() == Some(name.as_str()))
                    .count();
                log::info!("    {}: {}", name, count);
            }
        }
    }

    Ok(())
}
