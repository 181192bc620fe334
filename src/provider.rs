use common::Sample;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Browser-like agent string; the provider rejects obvious bots.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Public endpoint of the branch data provider.
pub const DEFAULT_PROVIDER_URL: &str = "https://md.tomsk.ru";

/// Error types for talking to the data provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Connection failure, timeout or unreadable body
    #[error("Request to data provider failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status
    #[error("Data provider answered with status {0}")]
    Status(StatusCode),

    /// Body is not JSON or an entry has the wrong shape
    #[error("Data provider response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// JSON without `data.load_history`
    #[error("Data provider response has no data.load_history")]
    MissingLoadHistory,

    /// Base URL that cannot carry a path
    #[error("Data provider URL '{0}' cannot be used as a base")]
    InvalidBaseUrl(String),
}

impl ProviderError {
    /// True when the provider itself could not be reached or refused to
    /// answer, as opposed to answering with unusable data.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, ProviderError::Request(_) | ProviderError::Status(_))
    }
}

/// HTTP client for the branch load-history endpoint.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: Client,
    base_url: Url,
}

impl ProviderClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ProviderError> {
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/v1/data/filials/{slug}?extra_bi=true`, with the slug as a
    /// single encoded path segment.
    pub fn load_history_url(&self, slug: &str) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "v1", "data", "filials", slug]);
        url.query_pairs_mut().append_pair("extra_bi", "true");
        Ok(url)
    }

    /// Fetches the weekly load history of one branch.
    ///
    /// A `null` history is returned as an empty list. No retries.
    #[instrument(skip(self))]
    pub async fn fetch_load_history(&self, slug: &str) -> Result<Vec<Sample>, ProviderError> {
        let url = self.load_history_url(slug)?;
        debug!(%url, "Requesting load history");

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!("Load history request failed: {}", e);
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Data provider returned an error status");
            return Err(ProviderError::Status(status));
        }

        let body = response.bytes().await?;
        let samples = parse_load_history(&body)?;
        info!(samples = samples.len(), "Received load history");
        Ok(samples)
    }
}

/// Extracts `data.load_history` from a provider response body.
pub fn parse_load_history(body: &[u8]) -> Result<Vec<Sample>, ProviderError> {
    let document: Value = serde_json::from_slice(body)?;
    let history = document
        .get("data")
        .and_then(|data| data.get("load_history"))
        .ok_or(ProviderError::MissingLoadHistory)?;

    if history.is_null() {
        return Ok(Vec::new());
    }
    Ok(Vec::<Sample>::deserialize(history)?)
}
