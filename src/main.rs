//! ficbook-sorter command line front end
//!
//! Fetches a request board page, collects every listing page behind it,
//! sorts the requests by likes and writes the re-rendered board page.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, error, info, warn};

use ficbook_sorter::application::{
    PageUrlBuilder, PaginatedAggregator, RequestSortService, SortSummary, is_requests_page,
};
use ficbook_sorter::domain::PageFetcher;
use ficbook_sorter::infrastructure::{
    AppConfig, DocumentStore, HtmlRenderer, HttpClient, RequestListParser, init_logging_with_config,
    log_system_info, shutdown_logging,
};

#[derive(Debug, Parser)]
#[command(name = "ficbook-sorter", version, about = "Sort the ficbook.net request board by likes")]
struct Cli {
    /// Request board page to start from, e.g. https://ficbook.net/requests?type=A
    url: String,

    /// Write the sorted page here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (TOML/JSON/YAML); replaces ./ficbook-sorter.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override pagination.max_pages
    #[arg(long)]
    max_pages: Option<u32>,

    /// Override pagination.batch_size
    #[arg(long)]
    batch_size: Option<u32>,

    /// Run even when the URL is not a request board page
    #[arg(long)]
    force: bool,

    /// Print "<count> requests sorted across <pages> pages" to stderr
    #[arg(long)]
    summary: bool,

    /// Print the summary as JSON instead
    #[arg(long, requires = "summary")]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {:#}", e);
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    };
    shutdown_logging();
    code
}

async fn run(cli: Cli) -> Result<()> {
    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(max_pages) = cli.max_pages {
        config.pagination.max_pages = max_pages;
    }
    if let Some(batch_size) = cli.batch_size {
        config.pagination.batch_size = batch_size;
    }
    config.validate()?;

    init_logging_with_config(&config.logging)?;
    log_system_info();
    debug!("Configuration: {:?}", config);

    if !is_requests_page(&cli.url) {
        if !cli.force {
            bail!("{} is not a ficbook.net/requests page (use --force to run anyway)", cli.url);
        }
        warn!("⚠️ {} is not a request board page, continuing because of --force", cli.url);
    }

    let http = Arc::new(HttpClient::with_config(config.http.clone())?);
    let document = http.fetch_page(&cli.url).await?;

    let store = Arc::new(DocumentStore::new());
    let extractor = Arc::new(RequestListParser::new()?.with_store(Arc::clone(&store)));
    let renderer = Arc::new(HtmlRenderer::new(store));

    let aggregator = PaginatedAggregator::new(
        http,
        extractor,
        PageUrlBuilder::from_page_url(&cli.url)?,
        config.pagination.policy()?,
    );
    let service = RequestSortService::new(aggregator, renderer);

    let outcome = service.run(&document).await?;
    let summary = SortSummary::from(&outcome);
    let sorted_page = outcome.into_document(document);

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, sorted_page)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("💾 Sorted page written to {}", path.display());
        }
        None => println!("{sorted_page}"),
    }

    if cli.json {
        eprintln!("{}", serde_json::to_string(&summary)?);
    } else if cli.summary {
        eprintln!("{}", summary.line());
    }

    Ok(())
}
