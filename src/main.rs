//! Bookhaul main entry point
//!
//! Command-line interface for the bookhaul catalog scraper.

use bookhaul::config::{load_config, Config, OutputConfig};
use bookhaul::crawler::{CategorySelection, Coordinator};
use bookhaul::output::print_summary;
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Bookhaul: a category-by-category catalog scraper
///
/// Discovers the site's categories, walks each selected category's listing
/// pages, extracts one record per item, and writes CSV files plus optional
/// cover images.
#[derive(Parser, Debug)]
#[command(name = "bookhaul")]
#[command(version = "1.0.0")]
#[command(about = "A category-by-category catalog scraper", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults are used without one)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Scrape a single category by name
    #[arg(long, group = "selection", value_name = "NAME")]
    category: Option<String>,

    /// Scrape several named categories
    #[arg(long, group = "selection", num_args = 1.., value_name = "NAME")]
    categories: Option<Vec<String>>,

    /// Scrape every category
    #[arg(long, group = "selection")]
    all: bool,

    /// List discovered categories and exit
    #[arg(long, group = "selection")]
    list_categories: bool,

    /// Cap on listing pages fetched per category
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Minimum delay between requests, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Output directory for the data/ and images/ trees
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Extra CSV file receiving every scraped record
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Download each record's cover image
    #[arg(long)]
    images: bool,

    /// Show what would be crawled without fetching any items
    #[arg(long, conflicts_with = "list_categories")]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    // Interrupts are honored between fetches, never mid-write, so files on
    // disk stay valid.
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received, stopping after the current fetch");
                flag.store(true, Ordering::Relaxed);
            }
        });
    }

    let coordinator = Coordinator::new(config.clone(), shutdown)?;

    if cli.list_categories {
        handle_list_categories(&coordinator).await;
        return Ok(());
    }

    let Some(selection) = build_selection(&cli) else {
        eprintln!("No categories selected.");
        eprintln!("Use --category, --categories, or --all; --list-categories shows what exists.");
        return Ok(());
    };

    if cli.dry_run {
        handle_dry_run(&coordinator, &config, &selection).await;
        return Ok(());
    }

    // The only persistence failure that aborts the run: without the output
    // tree nothing downstream can be written.
    prepare_output_dirs(&config.output)?;

    let summary = coordinator
        .run(&selection, cli.images, cli.output.as_deref())
        .await?;
    print_summary(&summary);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookhaul=info,warn"),
            1 => EnvFilter::new("bookhaul=debug,info"),
            2 => EnvFilter::new("bookhaul=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies CLI overrides
fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawl.max_pages = Some(max_pages);
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawl.request_delay_ms = delay_ms;
        config.crawl.category_delay_ms = delay_ms.saturating_mul(2);
    }
    if let Some(out_dir) = &cli.out_dir {
        config.output.out_dir = out_dir.display().to_string();
    }

    Ok(config)
}

/// Maps the selection flags onto a `CategorySelection`
///
/// Dry runs without an explicit selection report every category.
fn build_selection(cli: &Cli) -> Option<CategorySelection> {
    if let Some(name) = &cli.category {
        Some(CategorySelection::Named(vec![name.clone()]))
    } else if let Some(names) = &cli.categories {
        Some(CategorySelection::Named(names.clone()))
    } else if cli.all || cli.dry_run {
        Some(CategorySelection::All)
    } else {
        None
    }
}

/// Creates the output directory tree; failure here aborts the run
fn prepare_output_dirs(output: &OutputConfig) -> std::io::Result<()> {
    std::fs::create_dir_all(output.data_dir())?;
    std::fs::create_dir_all(output.images_dir())?;
    Ok(())
}

/// Handles the --list-categories mode: discovery only, print names
async fn handle_list_categories(coordinator: &Coordinator) {
    let categories = coordinator.discover_categories().await;

    if categories.is_empty() {
        println!("No categories discovered.");
        return;
    }

    println!("Available categories:");
    for category in &categories {
        println!("  {}", category.name);
    }
    println!("Total: {} categories", categories.len());
}

/// Handles the --dry-run mode: shows what would be crawled without
/// fetching any items
async fn handle_dry_run(
    coordinator: &Coordinator,
    config: &Config,
    selection: &CategorySelection,
) {
    println!("=== Bookhaul Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Catalogue root: {}", config.site.catalogue_root);

    println!("\nCrawl:");
    match config.crawl.max_pages {
        Some(cap) => println!("  Page cap: {} pages per category", cap),
        None => println!("  Page cap: none"),
    }
    println!("  Request delay: {}ms", config.crawl.request_delay_ms);
    println!("  Category delay: {}ms", config.crawl.category_delay_ms);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.out_dir);

    let available = coordinator.discover_categories().await;
    if available.is_empty() {
        println!("\nNo categories discovered; nothing would be crawled.");
        return;
    }

    let (selected, unknown) = Coordinator::select_categories(&available, selection);
    for name in &unknown {
        println!("\nWarning: category '{}' not found", name);
    }

    println!("\nSelected categories ({}):", selected.len());
    for category in &selected {
        println!("  - {} ({})", category.name, category.url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} categories", selected.len());
}
