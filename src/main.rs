//! # LookCircuit CLI (`lookc`)
//!
//! The `lookc` binary is the primary interface for the LookCircuit core.
//! It provides commands for database initialization, storefront scraping,
//! catalog-based personalization, interaction recording, collaborative
//! recommendations, and starting the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! lookc --config ./config/lookcircuit.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lookc init` | Create the SQLite database and run schema migrations |
//! | `lookc sites` | List site adapters and their status |
//! | `lookc search "<query>"` | Scrape the configured (or named) sites |
//! | `lookc personalize` | Filtered recommendations for a body shape |
//! | `lookc interact <user> <item>` | Record a user-item interaction |
//! | `lookc recommend <user>` | Collaborative recommendations from saves |
//! | `lookc serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! lookc init
//!
//! # Scrape two sites for a query
//! lookc search "linen shirt" --site myntra --site snitch
//!
//! # Personalized guidance, filtered to a conservative tier
//! lookc personalize --body-shape Pear --risk conservative --colors "olive, rust"
//!
//! # Record a save and ask for similar items
//! lookc interact 1 42
//! lookc recommend 1 --top-n 3
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lookcircuit::catalog::Catalog;
use lookcircuit::config::{load_config, Config};
use lookcircuit::interactions::{InteractionStore, SqliteStore};
use lookcircuit::models::{InteractionKind, StyleGuide};
use lookcircuit::orchestrator::ScrapeOrchestrator;
use lookcircuit::recommend::{personalize, RecommendError};
use lookcircuit::{server, similar};

/// LookCircuit CLI — scraping and recommendation core for the LookCircuit
/// fashion assistant.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/lookcircuit.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "lookc",
    about = "LookCircuit — storefront scraping and fashion recommendations",
    version,
    long_about = "LookCircuit scrapes Indian fashion storefronts through per-site adapters, \
    filters a body-shape styling catalog against a user's risk tolerance and color preferences, \
    and falls back to item-based collaborative filtering over saved items."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/lookcircuit.toml`. Database, catalog, scrape,
    /// and server settings are read from this file.
    #[arg(long, global = true, default_value = "./config/lookcircuit.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the interactions table.
    /// This command is idempotent — running it multiple times is safe.
    Init,

    /// List site adapters and their status.
    ///
    /// Shows every registered site id, whether it is enabled, and what it
    /// scrapes. Disabled sites stay listed so their ids remain visible.
    Sites,

    /// Scrape storefronts for a query.
    ///
    /// Runs the query against the named sites (or the configured default
    /// list) concurrently and prints the merged products as JSON. A site
    /// that fails or times out contributes nothing; an unknown site id is
    /// an error.
    Search {
        /// The search query, e.g. `"linen shirt"`.
        query: String,

        /// Site id to include (repeatable). Defaults to `[scrape].sites`.
        #[arg(long = "site")]
        sites: Vec<String>,
    },

    /// Personalized styling guidance for a body shape.
    ///
    /// Loads the catalog, filters the shape's `do` items by risk tier,
    /// annotates with the first preferred color, and prints the result as
    /// JSON. Faults print a `{"error": "..."}` payload and exit nonzero.
    Personalize {
        /// Body shape to look up (e.g. `Pear`, `Hourglass`).
        #[arg(long)]
        body_shape: String,

        /// Risk tolerance: `conservative`, `moderate`, or `adventurous`.
        /// Anything else reads as moderate.
        #[arg(long, default_value = "moderate")]
        risk: String,

        /// Comma-separated preferred colors; the first is used for
        /// annotation.
        #[arg(long)]
        colors: Option<String>,

        /// Override the catalog path from config.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Record a user-item interaction.
    Interact {
        /// User id.
        user: i64,

        /// Item id.
        item: i64,

        /// Interaction kind: `save`, `like`, or `dislike`. Only saves
        /// feed the recommender.
        #[arg(long, default_value = "save")]
        kind: String,
    },

    /// Collaborative recommendations from the save log.
    ///
    /// Prints a JSON list of item ids similar to the user's most recently
    /// saved item. A user with no saves gets an empty list.
    Recommend {
        /// User id.
        user: i64,

        /// Maximum number of items to return. Defaults to
        /// `[recommend].top_n`.
        #[arg(long)]
        top_n: Option<usize>,
    },

    /// Start the HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// search, personalize, and recommend endpoints.
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Init => cmd_init(&config).await,
        Commands::Sites => cmd_sites(&config),
        Commands::Search { query, sites } => cmd_search(&config, &query, sites).await,
        Commands::Personalize {
            body_shape,
            risk,
            colors,
            catalog,
        } => cmd_personalize(&config, &body_shape, &risk, colors.as_deref(), catalog),
        Commands::Interact { user, item, kind } => cmd_interact(&config, user, item, &kind).await,
        Commands::Recommend { user, top_n } => cmd_recommend(&config, user, top_n).await,
        Commands::Serve => server::run_server(&config).await,
    }
}

async fn cmd_init(config: &Config) -> Result<()> {
    let store = SqliteStore::connect(&config.db.path).await?;
    store.migrate().await?;
    println!("Database initialized at {}", config.db.path.display());
    Ok(())
}

fn cmd_sites(config: &Config) -> Result<()> {
    let orchestrator = ScrapeOrchestrator::from_config(&config.scrape)?;
    println!("{:<14} {:<10} DESCRIPTION", "SITE", "STATUS");
    for adapter in orchestrator.registry().adapters() {
        let status = if adapter.enabled() {
            "enabled"
        } else {
            "disabled"
        };
        println!(
            "{:<14} {:<10} {}",
            adapter.id(),
            status,
            adapter.description()
        );
    }
    Ok(())
}

async fn cmd_search(config: &Config, query: &str, sites: Vec<String>) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("query must not be empty");
    }
    let orchestrator = ScrapeOrchestrator::from_config(&config.scrape)?;
    let sites = if sites.is_empty() {
        orchestrator.default_sites().to_vec()
    } else {
        sites
    };

    let products = orchestrator.search(query, &sites).await?;
    let out = serde_json::json!({ "query": query, "products": products });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_personalize(
    config: &Config,
    body_shape: &str,
    risk: &str,
    colors: Option<&str>,
    catalog_override: Option<PathBuf>,
) -> Result<()> {
    let catalog_path = catalog_override.unwrap_or_else(|| config.catalog.path.clone());

    let result = Catalog::load(&catalog_path)
        .map_err(|e| RecommendError::DataUnavailable(e.to_string()))
        .and_then(|catalog| {
            let guide = StyleGuide {
                fashion_risk_tolerance: risk.to_string(),
                preferred_colors: colors.unwrap_or("").to_string(),
                ..StyleGuide::default()
            };
            personalize(&catalog, body_shape, &guide)
        });

    match result {
        Ok(recommendations) => {
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
            Ok(())
        }
        Err(e) => {
            let payload = serde_json::json!({ "error": e.to_string() });
            println!("{}", serde_json::to_string_pretty(&payload)?);
            std::process::exit(1);
        }
    }
}

async fn cmd_interact(config: &Config, user: i64, item: i64, kind: &str) -> Result<()> {
    let kind = InteractionKind::parse(kind)
        .with_context(|| format!("Unknown interaction kind: {kind:?} (expected save, like, or dislike)"))?;
    let store = SqliteStore::connect(&config.db.path).await?;
    store.migrate().await?;
    store.record(user, item, kind).await?;
    println!("Recorded {} for user {user} on item {item}", kind.as_str());
    Ok(())
}

async fn cmd_recommend(config: &Config, user: i64, top_n: Option<usize>) -> Result<()> {
    let store = SqliteStore::connect(&config.db.path).await?;
    store.migrate().await?;
    let saves = store.saves().await?;
    let items = similar::recommend(&saves, user, top_n.unwrap_or(config.recommend.top_n));
    let out = serde_json::json!({ "items": items });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
