use anyhow::{bail, Context, Result};
use scraper::{Html, Selector};
use std::fs;

use amazon_scraper::extractor::{extract_from_document, selectors};
use amazon_scraper::{validate, Config, HttpFetcher, PageSource};

/// Fetch one product page, save it, and report how many nodes each
/// extraction selector matches. Used to re-tune selectors against live markup.
#[tokio::main]
async fn main() -> Result<()> {
    let Some(raw_url) = std::env::args().nth(1) else {
        bail!("usage: analyze_page <amazon product url>");
    };

    let url = validate(&raw_url)?;
    let config = Config::load()?;
    let fetcher = HttpFetcher::new(&config)?;

    println!("Fetching {} ({})...", url, url.marketplace);
    let html = fetcher.fetch(&url).await?;
    let sample_path = format!("{}_sample.html", url.asin);
    fs::write(&sample_path, &html).with_context(|| format!("Failed to write {}", sample_path))?;
    println!("Saved {} bytes to {}", html.len(), sample_path);

    let document = Html::parse_document(&html);

    for (field, selector_str) in selectors::all() {
        match Selector::parse(selector_str) {
            Ok(selector) => {
                let count = document.select(&selector).count();
                println!("{:<20} {:>4}  {}", field, count, selector_str);
            }
            Err(e) => println!("{:<20} invalid selector {}: {:?}", field, selector_str, e),
        }
    }

    let record = extract_from_document(&document, url.as_str());
    println!("\n{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
