use chrono::Local;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ErrorKind;
use crate::extractor::extract;
use crate::models::{RunResult, ScrapeMode, SessionSummary};
use crate::utils::http::PageSource;
use crate::validator::validate;

/// Per-run settings threaded through the session instead of global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub delay_min: Duration,
    pub delay_max: Duration,
    pub max_batch_advisory: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            delay_min: Duration::from_secs(2),
            delay_max: Duration::from_secs(3),
            max_batch_advisory: 50,
        }
    }
}

impl SessionConfig {
    /// Pause drawn uniformly from the configured window.
    pub fn next_delay(&self) -> Duration {
        if self.delay_max <= self.delay_min {
            return self.delay_min;
        }
        let min = self.delay_min.as_millis() as u64;
        let max = self.delay_max.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

pub struct Session<S: PageSource> {
    source: S,
    config: SessionConfig,
}

impl<S: PageSource> Session<S> {
    pub fn new(source: S, config: SessionConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Validate, fetch and extract one URL.
    pub async fn run_single(&self, raw_url: &str) -> RunResult {
        self.run_at(raw_url, 1, 1).await
    }

    /// `run_single` wrapped in a one-entry summary.
    pub async fn single(&self, raw_url: &str) -> SessionSummary {
        let started = Local::now();
        let result = self.run_single(raw_url).await;
        SessionSummary::at(started, ScrapeMode::Single, vec![result])
    }

    pub async fn run_bulk(&self, raw_urls: &[String]) -> SessionSummary {
        self.run_bulk_with_progress(raw_urls, |_, _, _| {}).await
    }

    /// Processes URLs strictly in input order, pausing between requests.
    /// `on_start(index, total, url)` fires before each attempt (1-based).
    /// Per-URL progress logs at debug level; the caller's spinner shows it.
    pub async fn run_bulk_with_progress<F>(&self, raw_urls: &[String], mut on_start: F) -> SessionSummary
    where
        F: FnMut(usize, usize, &str),
    {
        let urls: Vec<&str> = raw_urls
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .collect();
        let total = urls.len();
        let started = Local::now();

        if total > self.config.max_batch_advisory {
            warn!(
                "Batch of {} URLs exceeds the recommended maximum of {}; continuing",
                total, self.config.max_batch_advisory
            );
        }

        let mut results = Vec::with_capacity(total);
        for (i, raw_url) in urls.into_iter().enumerate() {
            let index = i + 1;
            on_start(index, total, raw_url);
            debug!("Processing product {}/{}: {}", index, total, raw_url);

            results.push(self.run_at(raw_url, index, total).await);

            if index < total {
                let delay = self.config.next_delay();
                if !delay.is_zero() {
                    debug!("Waiting {:?} before next request", delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }

        let summary = SessionSummary::at(started, ScrapeMode::Bulk, results);
        info!(
            "Run ({}) completed: {}/{} products scraped successfully",
            summary.mode.key(),
            summary.total_succeeded,
            summary.total_requested
        );
        summary
    }

    async fn run_at(&self, raw_url: &str, index: usize, total: usize) -> RunResult {
        let url = match validate(raw_url) {
            Ok(url) => url.with_position(index, total),
            Err(e) => {
                warn!("Rejected URL {}: {}", raw_url, e);
                return RunResult::failure(raw_url.trim(), ErrorKind::from(&e), e.to_string());
            }
        };

        match self.source.fetch(&url).await {
            Ok(html) => RunResult::success(extract(&html, &url)),
            Err(e) => RunResult::failure(url.as_str(), ErrorKind::from(&e), e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::validator::NormalizedUrl;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Serves canned pages keyed by ASIN and records every request.
    #[derive(Default)]
    struct FixturePages {
        pages: HashMap<String, String>,
        status: HashMap<String, u16>,
        requested: Mutex<Vec<String>>,
    }

    impl FixturePages {
        fn with_page(mut self, asin: &str, html: &str) -> Self {
            self.pages.insert(asin.to_string(), html.to_string());
            self
        }

        fn with_status(mut self, asin: &str, status: u16) -> Self {
            self.status.insert(asin.to_string(), status);
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for FixturePages {
        async fn fetch(&self, url: &NormalizedUrl) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(url.asin.clone());
            if let Some(status) = self.status.get(&url.asin) {
                return Err(FetchError::HttpStatus {
                    status: *status,
                    url: url.to_string(),
                });
            }
            Ok(self.pages.get(&url.asin).cloned().unwrap_or_default())
        }
    }

    /// Notes the wall-clock time of each fetch and takes a little while.
    #[derive(Default)]
    struct TimedPages {
        fetched_at: Mutex<Vec<DateTime<Local>>>,
    }

    #[async_trait]
    impl PageSource for TimedPages {
        async fn fetch(&self, _url: &NormalizedUrl) -> Result<String, FetchError> {
            self.fetched_at.lock().unwrap().push(Local::now());
            std::thread::sleep(Duration::from_millis(10));
            Ok(String::new())
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn no_delay() -> SessionConfig {
        SessionConfig {
            delay_min: Duration::ZERO,
            delay_max: Duration::ZERO,
            max_batch_advisory: 2,
        }
    }

    fn page(title: &str) -> String {
        format!(r#"<span id="productTitle">{}</span>"#, title)
    }

    #[test]
    fn invalid_url_never_reaches_the_network() {
        let session = Session::new(FixturePages::default(), no_delay());
        let result = tokio_test::block_on(session.run_single("not-a-url"));

        assert!(!result.succeeded);
        assert_eq!(result.error_kind, Some(ErrorKind::Validation));
        assert!(result.record.is_none());
        assert!(session.source.requested().is_empty());
    }

    #[test]
    fn http_status_is_recorded() {
        let pages = FixturePages::default().with_status("B000000404", 503);
        let session = Session::new(pages, no_delay());
        let result =
            tokio_test::block_on(session.run_single("https://www.amazon.com/dp/B000000404"));

        assert!(!result.succeeded);
        assert_eq!(result.error_kind, Some(ErrorKind::HttpStatus(503)));
        assert!(result.error_message.unwrap().contains("503"));
    }

    #[test]
    fn bulk_keeps_input_order_and_survives_failures() {
        let pages = FixturePages::default()
            .with_page("B000000001", &page("First"))
            .with_page("B000000003", &page("Third"));
        let session = Session::new(pages, no_delay());
        let urls = vec![
            "https://www.amazon.com/dp/B000000001".to_string(),
            "https://www.example.com/dp/B000000002".to_string(),
            "https://www.amazon.com/dp/B000000003".to_string(),
        ];

        let mut seen = Vec::new();
        let summary = tokio_test::block_on(
            session.run_bulk_with_progress(&urls, |i, n, _| seen.push((i, n))),
        );

        assert_eq!(summary.mode, ScrapeMode::Bulk);
        assert_eq!(summary.total_requested, 3);
        assert_eq!(summary.total_succeeded, 2);
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
        let outcome: Vec<bool> = summary.results.iter().map(|r| r.succeeded).collect();
        assert_eq!(outcome, vec![true, false, true]);
        assert_eq!(summary.results[1].url, "https://www.example.com/dp/B000000002");
        let titles: Vec<&str> = summary.records().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Third"]);
        assert_eq!(session.source.requested(), vec!["B000000001", "B000000003"]);
    }

    #[test]
    fn blank_lines_are_ignored_in_bulk() {
        let session = Session::new(FixturePages::default(), no_delay());
        let urls = vec![
            "  ".to_string(),
            "https://www.amazon.com/dp/B000000001".to_string(),
            String::new(),
        ];
        let summary = tokio_test::block_on(session.run_bulk(&urls));
        assert_eq!(summary.total_requested, 1);
        assert_eq!(summary.total_succeeded, 1);
    }

    #[test]
    fn single_mode_summary_wraps_one_result() {
        let pages = FixturePages::default().with_page("B07FZ8S74R", &page("Echo Dot"));
        let session = Session::new(pages, no_delay());
        let summary =
            tokio_test::block_on(session.single("https://www.amazon.com/dp/B07FZ8S74R"));
        assert_eq!(summary.mode, ScrapeMode::Single);
        assert_eq!(summary.total_requested, 1);
        assert_eq!(summary.total_succeeded, 1);
    }

    #[test]
    fn summary_timestamp_marks_start_of_run() {
        let session = Session::new(TimedPages::default(), no_delay());
        let urls = vec![
            "https://www.amazon.com/dp/B000000001".to_string(),
            "https://www.amazon.com/dp/B000000002".to_string(),
        ];

        let bulk = tokio_test::block_on(session.run_bulk(&urls));
        let single = tokio_test::block_on(session.single("https://www.amazon.com/dp/B000000003"));

        let fetched_at = session.source.fetched_at.lock().unwrap().clone();
        assert_eq!(fetched_at.len(), 3);
        assert!(bulk.timestamp <= fetched_at[0]);
        assert!(single.timestamp <= fetched_at[2]);
        assert!(single.timestamp > fetched_at[1]);
    }

    #[test]
    fn successful_bulk_run_logs_only_its_summary_at_info() {
        let pages = FixturePages::default()
            .with_page("B000000001", &page("First"))
            .with_page("B000000002", &page("Second"));
        let session = Session::new(pages, no_delay());
        let urls = vec![
            "https://www.amazon.com/dp/B000000001".to_string(),
            "https://www.amazon.com/dp/B000000002".to_string(),
        ];

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let summary = tracing::subscriber::with_default(subscriber, || {
            tokio_test::block_on(session.run_bulk(&urls))
        });

        assert_eq!(summary.total_succeeded, 2);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().count(), 1, "unexpected log lines:\n{output}");
        assert!(output.contains("2/2 products scraped successfully"));
    }

    #[test]
    fn delay_stays_inside_window() {
        let config = SessionConfig::default();
        for _ in 0..20 {
            let delay = config.next_delay();
            assert!(delay >= config.delay_min && delay <= config.delay_max);
        }
        assert_eq!(no_delay().next_delay(), Duration::ZERO);
    }
}
