//! Review-Ripple main entry point
//!
//! This is the command-line interface for the Review-Ripple review crawler.

use anyhow::Context;
use clap::Parser;
use review_ripple::config::{load_config_with_hash, validate, Config, PaginationMode};
use review_ripple::crawler::crawl;
use review_ripple::output::{
    compute_statistics, default_csv_path, filter_verified, print_statistics, write_csv,
};
use review_ripple::url::{extract_product_info, parse_site_url};
use review_ripple::CrawlReport;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Review-Ripple: a patient review-feed crawler
///
/// Review-Ripple walks a product's paginated review feed one page at a time,
/// turns every review into a structured record and exports them as CSV.
#[derive(Parser, Debug)]
#[command(name = "review-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A patient review-feed crawler", long_about = None)]
struct Cli {
    /// Product page or review feed URL
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of pages to crawl (0 = until the feed ends)
    #[arg(short, long)]
    max_pages: Option<u32>,

    /// Page number to start from
    #[arg(short, long)]
    start_page: Option<u32>,

    /// CSV output path (default: reviews_<pid>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export only reviews from certified buyers
    #[arg(long)]
    verified_only: bool,

    /// Only increment the page parameter; ignore pagination markup
    #[arg(long)]
    mechanical: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and URL and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_settings(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config, &cli.url)?;
    } else {
        handle_crawl(&config, &cli.url, cli.output.as_deref()).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("review_ripple=info,warn"),
            1 => EnvFilter::new("review_ripple=debug,info"),
            2 => EnvFilter::new("review_ripple=trace,debug"),
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

/// Loads the config file (if any) and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = (max_pages > 0).then_some(max_pages);
    }
    if let Some(start_page) = cli.start_page {
        config.crawler.start_page = start_page;
    }
    if cli.verified_only {
        config.output.verified_only = true;
    }
    if cli.mechanical {
        config.crawler.pagination = PaginationMode::Mechanical;
    }

    validate(&config).context("Invalid settings")?;
    Ok(config)
}

/// Handles the --dry-run mode: validates settings and shows what would be crawled
fn handle_dry_run(config: &Config, url: &str) -> anyhow::Result<()> {
    println!("=== Review-Ripple Dry Run ===\n");

    println!("Site:");
    println!("  Domain: {}", config.site.domain);
    println!("  Marketplace: {}", config.site.marketplace);

    println!("\nCrawler Configuration:");
    match config.crawler.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: until the feed ends"),
    }
    println!("  Start page: {}", config.crawler.start_page);
    println!(
        "  Delay between pages: {}-{}ms",
        config.crawler.min_delay_ms, config.crawler.max_delay_ms
    );
    println!("  Pagination: {:?}", config.crawler.pagination);

    println!("\nExtraction:");
    println!("  Review selector: {}", config.extract.review_selector);
    println!("  Container selector: {}", config.extract.container_selector);

    let start = parse_site_url(url, &config.site.domain)?;
    let product = extract_product_info(&start);
    println!("\nProduct:");
    println!("  PID: {}", product.pid.as_deref().unwrap_or("Unknown"));
    println!("  LID: {}", product.lid.as_deref().unwrap_or("Unknown"));
    if let Some(name) = &product.name {
        println!("  Name: {}", name);
    }

    println!("\nOutput:");
    println!("  CSV: {}", csv_path(config, None, url));
    println!("  Verified only: {}", config.output.verified_only);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling at {}", start);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, url: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            ctrl_c.cancel();
        }
    });

    let report = match crawl(config, url, cancel).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    report_outcome(&report);

    if report.records.is_empty() {
        println!("No reviews found.");
        return Ok(());
    }

    let records = if config.output.verified_only {
        let (records, applied) = filter_verified(&report.records);
        if !applied {
            println!("No verified reviews found. Exporting all reviews instead.");
        }
        records
    } else {
        report.records.clone()
    };

    let path = csv_path(config, output, url);
    write_csv(Path::new(&path), &records)
        .with_context(|| format!("Failed to write {}", path))?;
    println!("✓ Exported {} reviews to {}\n", records.len(), path);

    print_statistics(&compute_statistics(&records));

    Ok(())
}

fn report_outcome(report: &CrawlReport) {
    tracing::info!(
        "Crawl finished in {}s: {} reviews from {} pages ({})",
        report.duration_seconds(),
        report.records.len(),
        report.pages_fetched,
        report.stop_reason
    );

    if let Some(detail) = &report.error {
        tracing::error!("Last fetch failed at {}: {}", report.last_url, detail);
    }

    println!("{}", outcome_line(report));
}

/// One-line verdict on how the crawl ended
fn outcome_line(report: &CrawlReport) -> String {
    let reason = report.stop_reason;
    if reason.is_exhausted() {
        format!(
            "Finished after {} pages: {}",
            report.pages_fetched,
            reason.describe()
        )
    } else if reason.is_interrupted() {
        format!(
            "Crawl interrupted on page {}: {} Keeping {} reviews collected so far.",
            report.last_page,
            reason.describe(),
            report.records.len()
        )
    } else {
        format!("Stopped on page {}: {}", report.last_page, reason.describe())
    }
}
