use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::ExportError;
use crate::models::{ProductRecord, RunResult, ScrapeMode, SessionSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub scraping_info: ScrapingInfo,
    pub products: Vec<ExportedProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapingInfo {
    pub timestamp: String,
    pub mode: ScrapeMode,
    pub total_products: usize,
    pub successful_scrapes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedProduct {
    pub url: String,
    pub scraped_successfully: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_data: Option<ProductData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub title: String,
    pub price: String,
    pub rating: String,
    pub num_ratings: String,
    pub image_url: String,
    pub about_item: Vec<String>,
    pub breadcrumbs: Vec<String>,
}

impl From<&ProductRecord> for ProductData {
    fn from(record: &ProductRecord) -> Self {
        Self {
            title: record.title.clone(),
            price: record.price.clone(),
            rating: record.rating.clone(),
            num_ratings: record.num_ratings.clone(),
            image_url: record.image_url.clone(),
            about_item: record.about_item.clone(),
            breadcrumbs: record.breadcrumbs.clone(),
        }
    }
}

impl From<&RunResult> for ExportedProduct {
    fn from(result: &RunResult) -> Self {
        Self {
            url: result.url.clone(),
            scraped_successfully: result.succeeded,
            product_data: result.record.as_ref().map(ProductData::from),
        }
    }
}

impl From<&SessionSummary> for ExportDocument {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            scraping_info: ScrapingInfo {
                timestamp: summary.timestamp.to_rfc3339(),
                mode: summary.mode,
                total_products: summary.total_requested,
                successful_scrapes: summary.total_succeeded,
            },
            products: summary.results.iter().map(ExportedProduct::from).collect(),
        }
    }
}

/// `<prefix>_YYYYMMDD_HHMMSS.json`
pub fn default_output_path(prefix: &str, timestamp: &DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("{}_{}.json", prefix, timestamp.format("%Y%m%d_%H%M%S")))
}

/// Write the summary as pretty JSON. The document goes to a temporary file
/// next to `path` and is renamed into place, so a failed write never leaves
/// a truncated export behind.
pub fn write_summary(summary: &SessionSummary, path: &Path) -> Result<(), ExportError> {
    let document = ExportDocument::from(summary);
    let json = serde_json::to_string_pretty(&document)?;

    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(parent).map_err(io_err)?;
    file.write_all(json.as_bytes()).map_err(io_err)?;
    file.write_all(b"\n").map_err(io_err)?;
    file.as_file().sync_all().map_err(io_err)?;
    file.persist(path).map_err(|source| ExportError::Persist {
        path: path.display().to_string(),
        source,
    })?;

    info!(
        "Saved {} products to {}",
        document.products.len(),
        path.display()
    );
    Ok(())
}

pub fn read_document(path: &Path) -> Result<ExportDocument, ExportError> {
    let content = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
