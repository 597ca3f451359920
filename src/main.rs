use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::net::SocketAddr;
use std::time::Instant;

use linkpure::cli_args::{Command, CommandLineArgs};
use linkpure::common::constants::{PROGRESS_BAR_CHARS, PROGRESS_BAR_TEMPLATE};
use linkpure::link_utils::HttpFetcher;
use linkpure::settings::Settings;
use linkpure::url_source::UrlSource;
use linkpure::{api, Unaffiliator};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("LinkPure v{} starting up...", env!("CARGO_PKG_VERSION"));

    debug!("Parsing command line arguments...");
    let cli_args = CommandLineArgs::parse_args();

    debug!("Loading application settings...");
    let settings = Settings::resolve(cli_args.settings.as_deref())?;
    info!("Settings loaded successfully");

    match cli_args.command() {
        Command::Serve { bind } => serve(settings, bind).await,
        Command::Clean { urls, src_files } => clean(&settings, &urls, &src_files).await,
    }
}

fn build_unaffiliator(settings: &Settings) -> Result<Unaffiliator<HttpFetcher>> {
    let fetcher = HttpFetcher::new(settings)?;
    Ok(Unaffiliator::new(fetcher).with_max_request_size(settings.max_request_size))
}

async fn serve(mut settings: Settings, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        settings.apply_bind_override(bind);
    }

    let app = api::router(build_unaffiliator(&settings)?);

    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address: {}", settings.bind_address))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn clean(settings: &Settings, urls: &[String], src_files: &[String]) -> Result<()> {
    let start_time = Instant::now();
    let unaffiliator = build_unaffiliator(settings)?;

    let source = UrlSource::new(urls, src_files)?;
    let total_urls = source.urls.len();
    info!("Found {} links to clean", total_urls);

    let pb = create_progress_bar(total_urls)?;
    let mut successful_count = 0;
    let mut failed_count = 0;

    for (i, url) in source.urls.iter().enumerate() {
        update_progress_message(&pb, i + 1, total_urls, url);

        match unaffiliator.clean(url).await {
            Ok(result) => {
                successful_count += 1;
                pb.suspend(|| println!("{}", result.url));
                debug!(
                    "Cleaned link {}/{} ({:?}): {}",
                    i + 1,
                    total_urls,
                    result.platform,
                    result.url
                );
            }
            Err(e) => {
                failed_count += 1;
                error!(
                    "Failed to clean link {}/{}: {} - {}",
                    i + 1,
                    total_urls,
                    url,
                    e
                );
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message(format!(
        "Completed! {} successful, {} failed",
        successful_count, failed_count
    ));

    if failed_count > 0 {
        warn!(
            "Cleaning completed with {} failed links out of {}",
            failed_count, total_urls
        );
    } else {
        info!("All {} links cleaned successfully!", total_urls);
    }

    info!(
        "Processing completed in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn create_progress_bar(total_urls: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_urls as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .context("Invalid progress bar template")?
            .progress_chars(PROGRESS_BAR_CHARS),
    );
    Ok(pb)
}

fn update_progress_message(pb: &ProgressBar, index: usize, total_urls: usize, url: &str) {
    let shown = if url.chars().count() > 50 {
        format!("{}...", url.chars().take(47).collect::<String>())
    } else {
        url.to_string()
    };
    pb.set_message(format!("Cleaning link {}/{}: {}", index, total_urls, shown));
}
