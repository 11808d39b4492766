//! # Visibility Search CLI (`vsearch`)
//!
//! ## Usage
//!
//! ```bash
//! vsearch --config ./config/vsearch.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `vsearch search [query]` | Filter, rank, and page through records |
//! | `vsearch stats [query]` | Facet counts for the current constraints |
//! | `vsearch preset save <name> [query]` | Save query and filters under a name |
//! | `vsearch preset show <name>` | Print a saved preset |
//! | `vsearch preset delete <name>` | Remove a saved preset |
//! | `vsearch preset list` | List saved presets |
//!
//! Log verbosity follows `RUST_LOG` when set; otherwise `--verbose`
//! switches from warnings only to debug output. Logs go to stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use visibility_search::config;
use visibility_search::filters::FilterArgs;
use visibility_search::presets;
use visibility_search::search::{self, SearchOptions};
use visibility_search::stats;

/// Visibility Search — filter, rank, and page through brand-visibility content.
#[derive(Parser)]
#[command(
    name = "vsearch",
    about = "Visibility Search — filter, rank, and page through brand-visibility content",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// If the file does not exist, built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/vsearch.toml")]
    config: PathBuf,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search records.
    ///
    /// With no query and no filters nothing is shown. Changing the query or
    /// filters should be paired with going back to page 1.
    Search {
        /// Free-text query, matched case-insensitively against title and body.
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Replay a saved preset. Query and filter flags are ignored.
        #[arg(long)]
        preset: Option<String>,

        /// 1-based page index.
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Results per page. Overrides `results.page_size`.
        #[arg(long)]
        page_size: Option<usize>,

        /// Show how each relevance number was reached.
        #[arg(long)]
        explain: bool,

        /// Print the page as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Facet counts for a query and filters.
    Stats {
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Replay a saved preset. Query and filter flags are ignored.
        #[arg(long)]
        preset: Option<String>,

        /// Print the counts as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Manage saved search presets.
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// Save (or replace) a preset.
    Save {
        name: String,

        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print a preset.
    Show { name: String },
    /// Delete a preset. Unknown names are ignored.
    Delete { name: String },
    /// List all presets.
    List,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("visibility_search=debug,visibility_search_core=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        debug!(path = %cli.config.display(), "config file not found, using defaults");
        config::Config::minimal()
    };

    match cli.command {
        Commands::Search {
            query,
            filters,
            preset,
            page,
            page_size,
            explain,
            json,
        } => {
            let (query, filters) = match preset {
                Some(name) => presets::replay_preset(&cfg, &name)?,
                None => (query, filters.to_filter_state()?),
            };
            let opts = SearchOptions {
                page,
                page_size,
                explain,
                json,
            };
            search::run_search(&cfg, &query, &filters, &opts)?;
        }
        Commands::Stats {
            query,
            filters,
            preset,
            json,
        } => {
            let (query, filters) = match preset {
                Some(name) => presets::replay_preset(&cfg, &name)?,
                None => (query, filters.to_filter_state()?),
            };
            stats::run_stats(&cfg, &query, &filters, json)?;
        }
        Commands::Preset { action } => match action {
            PresetAction::Save {
                name,
                query,
                filters,
            } => {
                presets::run_save(&cfg, &name, &query, &filters.to_filter_state()?)?;
            }
            PresetAction::Show { name } => presets::run_show(&cfg, &name)?,
            PresetAction::Delete { name } => presets::run_delete(&cfg, &name)?,
            PresetAction::List => presets::run_list(&cfg)?,
        },
    }

    Ok(())
}
