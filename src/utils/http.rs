use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, ClientBuilder};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::FetchError;
use crate::validator::NormalizedUrl;

/// Transport seam between the session and the network.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &NormalizedUrl) -> Result<String, FetchError>;
}

pub fn create_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);

    let client = ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .cookie_store(true)
        .timeout(config.request_timeout())
        .build()?;

    Ok(client)
}

/// One GET per call with the browser header set; no retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }

    pub async fn get_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Request failed for {}: {}", url, e);
            FetchError::Network {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error {}: {}", status, url);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read body from {}: {}", url, e);
            FetchError::Network {
                url: url.to_string(),
                source: e,
            }
        })?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &NormalizedUrl) -> Result<String, FetchError> {
        debug!("Fetching product {} ({}) [{}]", url.asin, url.marketplace, url.position);
        self.get_html(url.as_str()).await
    }
}
