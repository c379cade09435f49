use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;

use crate::error::ValidationError;
use crate::models::Marketplace;

static PRODUCT_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/(?:dp|gp/product|gp/aw/d|exec/obidos/ASIN)/([A-Za-z0-9]{10})(?:/|$)")
        .expect("Invalid product id regex")
});

/// "URL `index` of `total`" within one session, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPosition {
    pub index: usize,
    pub total: usize,
}

impl Default for BatchPosition {
    fn default() -> Self {
        Self { index: 1, total: 1 }
    }
}

impl fmt::Display for BatchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}

/// A URL that passed validation. Scheme and host are lowercased by the
/// parser; path and query are kept as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    pub url: Url,
    pub asin: String,
    pub marketplace: Marketplace,
    pub position: BatchPosition,
}

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn with_position(mut self, index: usize, total: usize) -> Self {
        self.position = BatchPosition { index, total };
        self
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Classify `raw` as a scrapeable Amazon product URL.
pub fn validate(raw: &str) -> Result<NormalizedUrl, ValidationError> {
    let input = raw.trim();

    let url = Url::parse(input).map_err(|e| ValidationError::Malformed {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::UnsupportedScheme {
            input: input.to_string(),
            scheme: url.scheme().to_string(),
        });
    }

    let host = url.host_str().unwrap_or_default().to_lowercase();
    let marketplace =
        Marketplace::from_host(&host).ok_or_else(|| ValidationError::UnsupportedHost {
            input: input.to_string(),
            host: host.clone(),
        })?;

    let asin = extract_asin(url.path()).ok_or_else(|| ValidationError::MissingProductId {
        input: input.to_string(),
    })?;

    Ok(NormalizedUrl {
        url,
        asin,
        marketplace,
        position: BatchPosition::default(),
    })
}

/// ASIN from a product path such as `/Echo-Dot/dp/B07FZ8S74R/ref=sr_1_1`.
pub fn extract_asin(path: &str) -> Option<String> {
    PRODUCT_ID_REGEX
        .captures(path)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_uppercase())
}
