use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::ProductRecord;
use crate::error::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrapeMode {
    #[serde(rename = "single_product")]
    Single,
    #[serde(rename = "multiple_products")]
    Bulk,
}

impl ScrapeMode {
    pub fn key(&self) -> &'static str {
        match self {
            ScrapeMode::Single => "single_product",
            ScrapeMode::Bulk => "multiple_products",
        }
    }
}

/// Outcome of one validate → fetch → extract attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub url: String,
    pub succeeded: bool,
    pub record: Option<ProductRecord>,
    pub error_kind: Option<ErrorKind>,
    pub error_message: Option<String>,
}

impl RunResult {
    pub fn success(record: ProductRecord) -> Self {
        Self {
            url: record.url.clone(),
            succeeded: true,
            record: Some(record),
            error_kind: None,
            error_message: None,
        }
    }

    pub fn failure(url: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            succeeded: false,
            record: None,
            error_kind: Some(kind),
            error_message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub timestamp: DateTime<Local>,
    pub mode: ScrapeMode,
    pub total_requested: usize,
    pub total_succeeded: usize,
    pub results: Vec<RunResult>,
}

impl SessionSummary {
    pub fn new(mode: ScrapeMode, results: Vec<RunResult>) -> Self {
        Self::at(Local::now(), mode, results)
    }

    pub fn at(timestamp: DateTime<Local>, mode: ScrapeMode, results: Vec<RunResult>) -> Self {
        let total_succeeded = results.iter().filter(|r| r.succeeded).count();
        Self {
            timestamp,
            mode,
            total_requested: results.len(),
            total_succeeded,
            results,
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &ProductRecord> {
        self.results.iter().filter_map(|r| r.record.as_ref())
    }

    pub fn failures(&self) -> impl Iterator<Item = &RunResult> {
        self.results.iter().filter(|r| !r.succeeded)
    }
}
