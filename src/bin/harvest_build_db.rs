//! harvest-build-db: Assemble the SQLite store from the SQL fragments
//!
//! Applies the schema, the generated data (or the sample data when no harvest
//! has run) and the full-text index to a fresh database file, and writes the
//! same fragments as one all-in-one script.
//!
//! Usage:
//!   harvest-build-db --sql-dir data/sql --out data/data.sqlite

use anyhow::{Context, Result};
use clap::Parser;
use harvest::ScriptParts;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "harvest-build-db")]
#[command(about = "Build the SQLite store from SQL fragments", long_about = None)]
struct Args {
    /// Directory holding 00_schema.sql, the data fragment and 99_fts.sql
    #[arg(long, default_value = "data/sql")]
    sql_dir: PathBuf,

    /// Database file to create (replaced if present)
    #[arg(long, short = 'o', default_value = "data/data.sqlite")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let parts = ScriptParts::load(&args.sql_dir)
        .with_context(|| format!("Failed to read fragments from {}", args.sql_dir.display()))?;
    let combined = parts
        .assemble(&args.out)
        .with_context(|| format!("Failed to build {}", args.out.display()))?;

    println!("wrote {}", combined.display());
    println!("built {}", args.out.display());
    Ok(())
}
