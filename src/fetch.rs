//! Resilient feed retrieval. Walks an ordered list of URL variants; each URL
//! gets a bounded number of attempts with exponential backoff and a rotating
//! User-Agent. The first success short-circuits the whole walk.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::types::{Result, ScoutError};

/// Raw response surfaced by a transport: status plus body text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Seam between the retry walk and the actual HTTP stack, so retry behavior
/// is testable with scripted responses.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn get(&self, url: &str, user_agent: &str) -> Result<TransportResponse>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: Client,
    accept: String,
    referer: String,
}

impl HttpTransport {
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            accept: config.accept.clone(),
            referer: config.referer.clone(),
        }
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get(&self, url: &str, user_agent: &str) -> Result<TransportResponse> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", user_agent)
            .header("Accept", &self.accept)
            .header("Referer", &self.referer)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// Classification of a non-success HTTP status within the retry walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rate-limit/forbidden/server-error class: back off and retry the same
    /// URL.
    Retryable,
    /// Any other non-success status: give up on this URL, move to the next
    /// variant.
    Terminal,
}

/// 403, 429 and 5xx are anti-scraping or transient server conditions worth
/// retrying; everything else non-success is treated as a broken variant.
pub fn classify_status(status: u16) -> FetchOutcome {
    if status == 403 || status == 429 || status >= 500 {
        FetchOutcome::Retryable
    } else {
        FetchOutcome::Terminal
    }
}

pub struct FeedFetcher<T: FeedTransport> {
    transport: T,
    config: FetchConfig,
}

impl FeedFetcher<HttpTransport> {
    pub fn new(config: FetchConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self { transport, config }
    }
}

impl<T: FeedTransport> FeedFetcher<T> {
    pub fn with_transport(transport: T, config: FetchConfig) -> Self {
        Self { transport, config }
    }

    pub fn transport_ref(&self) -> &T {
        &self.transport
    }

    /// Fetch the first URL variant that answers with a success status,
    /// returning its body. Fails with the last observed error once every
    /// variant has exhausted its attempts.
    pub async fn fetch_first(&self, urls: &[String]) -> Result<String> {
        let mut last_error = "unknown fetch error".to_string();

        for url in urls {
            for attempt in 1..=self.config.max_attempts {
                let user_agent = self.user_agent_for(attempt);

                match self.transport.get(url, user_agent).await {
                    Ok(response) if (200..300).contains(&response.status) => {
                        debug!(%url, attempt, "fetched feed ({} bytes)", response.body.len());
                        return Ok(response.body);
                    }
                    Ok(response) => {
                        last_error = format!("HTTP {}", response.status);
                        match classify_status(response.status) {
                            FetchOutcome::Retryable => {
                                warn!(%url, attempt, status = response.status, "retryable status, backing off");
                                self.backoff(attempt).await;
                            }
                            FetchOutcome::Terminal => {
                                warn!(%url, attempt, status = response.status, "terminal status, next variant");
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        last_error = e.to_string();
                        warn!(%url, attempt, error = %last_error, "network error, backing off");
                        self.backoff(attempt).await;
                    }
                }
            }
        }

        Err(ScoutError::Fetch(last_error))
    }

    fn user_agent_for(&self, attempt: u32) -> &str {
        let index = (attempt as usize - 1) % self.config.user_agents.len();
        &self.config.user_agents[index]
    }

    async fn backoff(&self, attempt: u32) {
        let delay = backoff_delay(self.config.backoff_base, attempt) + self.jitter();
        tokio::time::sleep(delay).await;
    }

    fn jitter(&self) -> Duration {
        let cap = self.config.backoff_jitter.as_millis() as u64;
        if cap == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..cap))
    }
}

/// Exponential portion of the backoff: `base * 2^(attempt - 1)`.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt.saturating_sub(1))
}
