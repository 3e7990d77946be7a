// src/feed/client.rs
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;

use crate::feed::types::{FeedPayload, RawAlert};

/// Wire seam for the alert feed. Production goes through reqwest; tests
/// inject canned payloads and failures.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FeedPayload>;
}

/// Delay seam so the backoff schedule is observable in tests without real
/// elapsed time.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        // Public alert feeds require an identifying User-Agent.
        let client = reqwest::Client::builder()
            .user_agent(concat!("storm-herald/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .context("building feed http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<FeedPayload> {
        // Non-success status is treated the same as a network error: both
        // feed into the uniform retry path.
        let rsp = self
            .client
            .get(url)
            .send()
            .await
            .context("feed request failed")?
            .error_for_status()
            .context("feed non-2xx status")?;
        rsp.json::<FeedPayload>()
            .await
            .context("decoding feed payload")
    }
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Fetches the active warnings for one region from the alert feed, with
/// bounded exponential backoff on transient failure.
pub struct AlertsClient {
    url: String,
    max_retries: u32,
    base_delay: Duration,
    transport: Box<dyn FeedTransport>,
    sleeper: Box<dyn Sleeper>,
}

impl AlertsClient {
    pub fn new(
        feed_url: &str,
        region: &str,
        category: &str,
        max_retries: u32,
        base_delay: Duration,
    ) -> Result<Self> {
        Ok(Self::with_parts(
            build_query_url(feed_url, region, category)?,
            max_retries,
            base_delay,
            Box::new(HttpTransport::new()?),
            Box::new(TokioSleeper),
        ))
    }

    /// Assemble from parts; tests use this to inject transport and sleeper.
    pub fn with_parts(
        url: String,
        max_retries: u32,
        base_delay: Duration,
        transport: Box<dyn FeedTransport>,
        sleeper: Box<dyn Sleeper>,
    ) -> Self {
        Self {
            url,
            max_retries,
            base_delay,
            transport,
            sleeper,
        }
    }

    /// Fetch the current active entries. Retry exhaustion degrades to an
    /// empty list; the orchestrator treats that as a quiet cycle.
    pub async fn fetch_active_alerts(&self) -> Vec<RawAlert> {
        for attempt in 0..=self.max_retries {
            match self.transport.fetch(&self.url).await {
                Ok(payload) => {
                    return payload
                        .features
                        .into_iter()
                        .map(|entry| entry.properties)
                        .collect();
                }
                Err(e) if attempt < self.max_retries => {
                    let delay = self.base_delay * 2u32.pow(attempt);
                    tracing::warn!(
                        error = ?e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "feed fetch failed; backing off"
                    );
                    counter!("herald_fetch_retries_total").increment(1);
                    self.sleeper.sleep(delay).await;
                }
                Err(e) => {
                    tracing::warn!(
                        error = ?e,
                        attempts = attempt + 1,
                        "feed fetch exhausted retries; treating cycle as quiet"
                    );
                    counter!("herald_fetch_exhausted_total").increment(1);
                    return Vec::new();
                }
            }
        }
        Vec::new()
    }
}

fn build_query_url(base: &str, region: &str, category: &str) -> Result<String> {
    let url = reqwest::Url::parse_with_params(
        base,
        [
            ("status", "actual"),
            ("event", category),
            ("area", region.to_uppercase().as_str()),
        ],
    )
    .context("building feed query url")?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_url_uppercases_region_and_pins_actual_status() {
        let url = build_query_url(
            "https://alerts.example/api/active",
            "ok",
            "Tornado Warning",
        )
        .unwrap();
        assert!(url.contains("area=OK"));
        assert!(url.contains("status=actual"));
        assert!(url.contains("event=Tornado"));
    }
}
