//! wowprogress CLI
//!
//! Prints leaderboard rankings, export links or export rows as JSON lines.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use wowprogress::{
    error::Result,
    models::Config,
    BatchFilter, Wowprogress,
};

/// wowprogress - guild ranking scraper
#[derive(Parser, Debug)]
#[command(
    name = "wowprogress",
    version,
    about = "Pull guild rankings from wowprogress.com"
)]

struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, default_value = "wowprogress.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape leaderboard pages
    Rankings {
        /// Region (e.g. us, eu); "world" for the global board
        #[arg(long, default_value = "world")]
        region: String,

        /// Realm slug within the region
        #[arg(long)]
        realm: Option<String>,

        /// Raid tier
        #[arg(long)]
        tier: Option<u32>,

        /// First page to fetch (0-based)
        #[arg(long, default_value_t = 0)]
        start_page: u32,

        /// Stop after this many rankings
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List available bulk export files
    Links,

    /// Read rows from bulk export files
    Export {
        /// Only exports for this area
        #[arg(long)]
        area: Option<String>,

        /// Only exports for this realm
        #[arg(long)]
        realm: Option<String>,

        /// Only exports for this tier
        #[arg(long)]
        tier: Option<u32>,

        /// Only exports at or above this tier
        #[arg(long)]
        min_tier: Option<u32>,

        /// Stop after this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Write one JSON document per line.
fn write_lines<T, I>(items: I, limit: Option<usize>) -> Result<usize>
where
    T: Serialize,
    I: Iterator<Item = Result<T>>,
{
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut written = 0;

    for item in items.take(limit.unwrap_or(usize::MAX)) {
        let line = serde_json::to_string(&item?)?;
        writeln!(out, "{line}")?;
        written += 1;
    }

    out.flush()?;
    Ok(written)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_if_exists(&cli.config)?;

    let client = Wowprogress::new(config)?;

    match cli.command {
        Command::Rankings {
            region,
            realm,
            tier,
            start_page,
            limit,
        } => {
            let realm = realm.unwrap_or_default();
            let rankings = client.iterate_rankings(&region, &realm, tier, start_page);
            let count = write_lines(rankings, limit)?;
            log::info!("Wrote {count} rankings");
        }

        Command::Links => {
            let links = client.list_batch_links()?;
            let count = write_lines(links.into_iter().map(Ok), None)?;
            log::info!("Wrote {count} export links");
        }

        Command::Export {
            area,
            realm,
            tier,
            min_tier,
            limit,
        } => {
            let mut filter = BatchFilter::new();
            filter.area = area;
            filter.realm = realm;
            filter.tier = tier;
            if let Some(min_tier) = min_tier {
                filter = filter.with_predicate(move |link| link.tier >= min_tier);
            }

            let rows = client.iterate_batch_rankings(filter);
            let count = write_lines(rows, limit)?;
            log::info!("Wrote {count} export rows");
        }
    }

    Ok(())
}
