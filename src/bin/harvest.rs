//! harvest: Scrape the wiki into snapshots and a SQL load script
//!
//! Usage:
//!   # Scrape the live wiki with default settings
//!   harvest
//!
//!   # Use a config file and write elsewhere
//!   harvest --config harvest.json --sql-dir ./sql
//!
//!   # Re-run from pages saved earlier, without network access
//!   harvest --offline-dir ./pages
//!
//! Set RUST_LOG (e.g. `RUST_LOG=harvest=debug`) for table-level decisions.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use harvest::{DirSource, HarvestConfig, HttpSource, PageSource, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(about = "Scrape wiki tables into a SQL load script", long_about = None)]
struct Args {
    /// JSON config file; flags below override its fields
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Wiki root URL
    #[arg(long)]
    base_url: Option<String>,

    /// Read pages from this directory instead of fetching them
    #[arg(long, value_name = "DIR")]
    offline_dir: Option<PathBuf>,

    /// Directory for the JSON snapshots
    #[arg(long, value_name = "DIR")]
    raw_dir: Option<PathBuf>,

    /// Directory for the generated load script
    #[arg(long, value_name = "DIR")]
    sql_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Skip writing the JSON snapshots
    #[arg(long)]
    no_snapshots: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HarvestConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => HarvestConfig::default(),
    };
    if let Some(url) = args.base_url {
        config.base_url = url;
    }
    if let Some(dir) = args.raw_dir {
        config.raw_dir = dir;
    }
    if let Some(dir) = args.sql_dir {
        config.sql_dir = dir;
    }
    if let Some(secs) = args.timeout {
        config.timeout_secs = secs;
    }
    if args.no_snapshots {
        config.write_snapshots = false;
    }
    config.validate().context("Invalid configuration")?;

    let mut source: Box<dyn PageSource> = match args.offline_dir {
        Some(dir) => Box::new(DirSource::new(dir)),
        None => Box::new(HttpSource::from_config(&config).context("Failed to build HTTP client")?),
    };

    let output = Pipeline::from_config(&config).run(source.as_mut());
    let written = output.write_outputs(&config)?;

    println!("wrote {}", written.script.display());
    for path in &written.snapshots {
        println!("wrote {}", path.display());
    }
    Ok(())
}
