//! Page retrieval for the site adapters.
//!
//! Two clients cover the storefront split: `StaticFetcher` is a plain HTTP
//! client for sites that serve their product grid in the initial response,
//! and `BrowserFetcher` is a Chrome-emulating client for storefronts that
//! fingerprint and reject ordinary HTTP clients. Both return the raw page
//! body as a `String`; all HTML parsing happens in the adapters, which keeps
//! the futures here `Send`.
//!
//! `fetch_ready` is the bounded content-ready wait: re-fetch the page until
//! a site-specific CSS selector matches, or give up after the ready budget.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use scraper::Html;
use std::time::{Duration, Instant};

use crate::extract::sel;

/// Object-safe page fetcher. One `get` is one HTTP request with its own
/// timeout.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<String>;
}

const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Plain HTTP fetcher for sites that do not gate on client fingerprints.
pub struct StaticFetcher {
    client: reqwest::Client,
}

impl StaticFetcher {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(DESKTOP_UA)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for StaticFetcher {
    async fn get(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request failed: {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("HTTP {status} from {url}");
        }
        resp.text()
            .await
            .with_context(|| format!("Failed to read body: {url}"))
    }
}

/// Chrome-emulating fetcher for storefronts that reject plain HTTP clients.
pub struct BrowserFetcher {
    client: wreq::Client,
}

impl BrowserFetcher {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = wreq::Client::builder()
            .emulation(wreq_util::Emulation::Chrome131)
            .timeout(request_timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build browser-emulation client: {e}"))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for BrowserFetcher {
    async fn get(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request failed: {url}: {e}"))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("HTTP {status} from {url}");
        }
        resp.text()
            .await
            .map_err(|e| anyhow!("Failed to read body: {url}: {e}"))
    }
}

/// Per-site retrieval budgets.
#[derive(Debug, Clone, Copy)]
pub struct ReadyWait {
    /// Total time to wait for the content-ready selector across re-fetches.
    pub ready_timeout: Duration,
    /// Pause between re-fetches.
    pub poll_interval: Duration,
}

impl ReadyWait {
    pub fn new(ready_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            ready_timeout,
            poll_interval,
        }
    }
}

fn selector_matches(html: &str, ready_css: &str) -> bool {
    let doc = Html::parse_document(html);
    doc.select(&sel(ready_css)).next().is_some()
}

/// Fetch `url` until `ready_css` matches the page, re-fetching on a poll
/// interval until the ready budget runs out. Errors if the selector never
/// appears; the caller treats that as an empty result for the site.
pub async fn fetch_ready(
    fetcher: &dyn Fetch,
    url: &str,
    ready_css: &str,
    wait: ReadyWait,
) -> Result<String> {
    let deadline = Instant::now() + wait.ready_timeout;
    let mut last_err: Option<anyhow::Error> = None;

    loop {
        match fetcher.get(url).await {
            Ok(body) => {
                if selector_matches(&body, ready_css) {
                    return Ok(body);
                }
                last_err = Some(anyhow!("selector {ready_css:?} not present yet"));
            }
            Err(e) => last_err = Some(e),
        }

        if Instant::now() >= deadline {
            let reason = last_err
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempt completed".to_string());
            bail!(
                "Timed out waiting for {ready_css:?} at {url} ({}ms budget): {reason}",
                wait.ready_timeout.as_millis()
            );
        }
        tokio::time::sleep(wait.poll_interval).await;
    }
}
