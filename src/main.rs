use anyhow::Result;
use std::io::{self, Write};
use tracing::{error, info};

use amazon_scraper::console::{self, Prompt, SaveChoice, Spinner};
use amazon_scraper::export::{default_output_path, write_summary};
use amazon_scraper::{Config, HttpFetcher, ScrapeMode, Session};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Logs go to stderr so the interactive console stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_filter.parse()?),
        )
        .with_writer(io::stderr)
        .init();

    info!("Starting Amazon Scraper");

    let fetcher = HttpFetcher::new(&config)?;
    let session = Session::new(fetcher, config.session());

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());

    let summary = match prompt.choose_mode()? {
        ScrapeMode::Single => {
            let url = prompt.read_url()?;
            let spinner = Spinner::start("Fetching product page...");
            let summary = session.single(&url).await;
            spinner.finish();
            summary
        }
        ScrapeMode::Bulk => {
            let urls = prompt.read_url_list(session.config().max_batch_advisory)?;
            if urls.is_empty() {
                prompt.say("No URLs entered, nothing to do.")?;
                return Ok(());
            }
            let spinner = Spinner::start("Starting batch...");
            let summary = session
                .run_bulk_with_progress(&urls, |index, total, url| {
                    spinner.set_message(format!("[{}/{}] {}", index, total, url));
                })
                .await;
            spinner.finish();
            summary
        }
    };

    print!("{}", console::render_summary(&summary));
    io::stdout().flush()?;

    let default_path = default_output_path(&config.output_prefix, &summary.timestamp);
    if let SaveChoice::Save(path) = prompt.ask_save(&default_path)? {
        match write_summary(&summary, &path) {
            Ok(()) => prompt.say(&format!("Results saved to {}", path.display()))?,
            Err(e) => {
                error!("Failed to save results: {}", e);
                prompt.say(&format!("Could not save results: {}", e))?;
            }
        }
    }

    Ok(())
}
