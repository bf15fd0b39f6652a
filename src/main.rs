//! dfs-crawler - DFS ownership table crawler CLI
//!
//! Drives a headless browser against the ownership page, then reports
//! per-player DraftKings/FanDuel exposure with derived comparison metrics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dfs_crawler::analysis::Metric;
use dfs_crawler::cache::ResultCache;
use dfs_crawler::commands::ScrapeCommand;
use dfs_crawler::config::{Config, OutputFormat};
use dfs_crawler::ownership::Sport;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dfs-crawler",
    version,
    about = "DFS ownership table crawler CLI",
    long_about = "Harvests DraftKings/FanDuel ownership data from the infinite-scroll \
                  ownership table and reports per-player exposure metrics."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest the ownership table for a sport
    #[command(alias = "s")]
    Scrape {
        /// Sport to harvest (defaults to the configured sport)
        sport: Option<Sport>,

        /// Number of rows in the top-N ranking
        #[arg(short, long)]
        top: Option<usize>,

        /// Metric to rank the top-N by (dk, fd, combined, min)
        #[arg(short, long)]
        metric: Option<Metric>,

        /// Directory to write the CSV artifact into
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Skip writing the CSV artifact
        #[arg(long)]
        no_artifact: bool,

        /// Override the target site base URL
        #[arg(long, env = "DFS_BASE_URL")]
        base_url: Option<String>,
    },

    /// List supported sports
    Sports,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Scrape { sport, top, metric, out_dir, no_artifact, base_url } => {
            if let Some(top) = top {
                config.top_n = top;
            }
            if let Some(metric) = metric {
                config.metric = metric;
            }
            if let Some(out_dir) = out_dir {
                config.artifact_dir = out_dir;
            }
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }

            let sport = sport.unwrap_or(config.sport);
            let cache = ResultCache::new(Duration::from_secs(config.cache_ttl_secs));

            let cmd = ScrapeCommand::new(config);
            let output = cmd.execute(sport, &cache, !no_artifact)?;
            println!("{}", output);
        }

        Commands::Sports => {
            println!("Supported sports:\n");
            println!("{:<6} {:<12} {}", "Code", "Name", "Ownership page");
            println!("{:-<6} {:-<12} {:-<50}", "", "", "");

            for sport in Sport::all() {
                println!(
                    "{:<6} {:<12} {}",
                    sport.to_string(),
                    sport.display_name(),
                    sport.page_url(&config.base_url)
                );
            }
        }
    }

    Ok(())
}
