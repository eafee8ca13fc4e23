//! Campus Market CLI
//!
//! Runs listing searches and category checks against a local storage
//! directory holding `config.toml` and `listings.json`.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use market::{
    config,
    error::{AppError, Result},
    models::{ListingDraft, SearchParams, SearchQuery, SellerStatus},
    pipeline::{self, RecommendTab},
    services::prepare_listing,
    storage::{ListingStore, LocalStorage},
};
use serde::Serialize;

/// Campus Market - listing search and category tools
#[derive(Parser, Debug)]
#[command(
    name = "market",
    version,
    about = "Campus marketplace listing search"
)]
struct Cli {
    /// Path to storage directory containing config.toml and listings.json
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search listings
    Search {
        /// Free text; quote phrases with "..."
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        page_size: Option<String>,
        /// latest, priceAsc, priceDesc or forYou
        #[arg(long)]
        sort: Option<String>,
        /// Disable plural leniency
        #[arg(long)]
        strict: bool,
    },

    /// Show how a category string or search term is classified
    Classify { text: String },

    /// Check whether a stored listing belongs to a category
    Belongs {
        #[arg(long)]
        id: String,
        #[arg(long)]
        category: String,
    },

    /// Validate a listing draft (JSON file) and store it
    Post {
        #[arg(long)]
        file: PathBuf,
    },

    /// List a seller's listings
    Seller {
        seller_id: String,
        /// active, sold or all
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Count listings per category
    Facets {
        /// Restrict to one seller's shop
        #[arg(long)]
        seller: Option<String>,
    },

    /// Home page recommendation row
    Recommend {
        /// forYou, popular or latest
        #[arg(long, default_value = "forYou")]
        tab: String,
        #[arg(long, default_value = "")]
        category: String,
    },

    /// Print the category taxonomy and display groups
    Categories,

    /// Validate configuration files
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification<'a> {
    input: &'a str,
    normalized: &'a str,
    inferred: Option<&'a str>,
    hints: Vec<&'a str>,
}

#[derive(Serialize)]
struct CategoryReport<'a> {
    categories: Vec<CategoryNode<'a>>,
    groups: &'a [market::models::CategoryGroup],
}

#[derive(Serialize)]
struct CategoryNode<'a> {
    name: &'a str,
    children: &'a [String],
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.storage_dir.join("config.toml"));
    init_logging(cli.verbose, &config.logging.level);

    let matcher = config::build_matcher(&config)?;
    log::debug!("Loaded configuration from {}", cli.storage_dir.display());

    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command {
        Command::Search {
            search,
            category,
            page,
            page_size,
            sort,
            strict,
        } => {
            let params = SearchParams {
                search,
                category,
                page,
                page_size,
                sort,
                strict: strict.then(|| "true".to_string()),
            };
            let query = SearchQuery::from_params(&params, &config.search);
            let listings = storage.load_listings().await?;
            let page = pipeline::search(&matcher, &listings, &query)?;
            log::info!("{} matching listings", page.total);
            print_json(&page)?;
        }

        Command::Classify { text } => {
            let mut hints: Vec<&str> = matcher.infer_categories_from_text(&text).into_iter().collect();
            hints.sort_unstable();
            print_json(&Classification {
                input: &text,
                normalized: matcher.normalize_category(&text),
                inferred: matcher.infer_category_from_query(&text),
                hints,
            })?;
        }

        Command::Belongs { id, category } => {
            let listing = storage
                .find_listing(&id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("listing {id}")))?;
            let belongs = matcher.belongs_to_category(&listing, &category);
            print_json(&serde_json::json!({
                "id": id,
                "category": matcher.normalize_category(&category),
                "belongs": belongs,
            }))?;
        }

        Command::Post { file } => {
            let content = std::fs::read_to_string(&file)?;
            let draft: ListingDraft = serde_json::from_str(&content)?;
            let listing = prepare_listing(&matcher, draft, Utc::now())?;
            storage.insert_listing(listing.clone()).await?;
            log::info!("Stored listing {} under {}", listing.id, listing.category);
            print_json(&listing)?;
        }

        Command::Seller { seller_id, status } => {
            let listings = storage.load_listings().await?;
            let items =
                pipeline::seller_listings(&listings, &seller_id, SellerStatus::parse(&status));
            print_json(&items)?;
        }

        Command::Facets { seller } => {
            let listings = storage.load_listings().await?;
            let facets = match seller {
                Some(seller_id) => pipeline::category_facets(
                    &matcher,
                    pipeline::seller_listings(&listings, &seller_id, SellerStatus::All),
                ),
                None => pipeline::category_facets(&matcher, &listings),
            };
            print_json(&facets)?;
        }

        Command::Recommend { tab, category } => {
            let listings = storage.load_listings().await?;
            let row = pipeline::recommend(
                &matcher,
                &listings,
                RecommendTab::parse(&tab),
                &category,
                config.search.recommend_limit,
            );
            print_json(&row)?;
        }

        Command::Categories => {
            let taxonomy = matcher.taxonomy();
            print_json(&CategoryReport {
                categories: taxonomy
                    .names()
                    .iter()
                    .map(|name| CategoryNode {
                        name,
                        children: taxonomy.children(name),
                    })
                    .collect(),
                groups: taxonomy.groups(),
            })?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            // build_matcher already checked config and catalog
            log::info!(
                "✓ Config OK ({} categories, {} aliases)",
                matcher.taxonomy().names().len(),
                matcher.aliases().len()
            );
        }
    }

    Ok(())
}
