//! Site adapter trait and registry.
//!
//! Each storefront gets one [`SiteAdapter`]. The orchestrator resolves site
//! ids against a [`SiteRegistry`] and fans out across the resolved adapters.
//!
//! Failure policy: `scrape` is the fallible inner operation; [`fetch`]
//! (the public entry point) converts any scrape error into an empty result
//! after logging it, so one broken storefront can never take down a query.
//!
//! [`fetch`]: SiteAdapter::fetch

use anyhow::Result;
use async_trait::async_trait;

use crate::models::ProductRecord;

/// A storefront scraper producing normalized product records for a query.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Stable site id used in config, CLI flags, and query parameters
    /// (e.g. `"myntra"`).
    fn id(&self) -> &str;

    /// One-line description shown in `lookc sites` output.
    fn description(&self) -> &str;

    /// Whether this adapter performs real scraping. Disabled adapters
    /// stay registered so their ids remain valid, but never touch the
    /// network.
    fn enabled(&self) -> bool {
        true
    }

    /// The site search URL for `query`, with the site's own encoding.
    fn search_url(&self, query: &str) -> String;

    /// Retrieve and parse the search results page.
    ///
    /// Errors here mean the page could not be retrieved or never became
    /// ready; a page that loads but matches no product containers is an
    /// empty `Ok`.
    async fn scrape(&self, query: &str) -> Result<Vec<ProductRecord>>;

    /// Infallible entry point: scrape errors are logged with site and
    /// query context and converted to an empty result.
    async fn fetch(&self, query: &str) -> Vec<ProductRecord> {
        match self.scrape(query).await {
            Ok(products) => products,
            Err(e) => {
                eprintln!("[{}] scrape failed for query {query:?}: {e:#}", self.id());
                Vec::new()
            }
        }
    }
}

/// Placeholder adapter for a deliberately disabled site.
///
/// Keeps the site id resolvable and visible in `lookc sites` without any
/// network behavior behind it.
pub struct NullAdapter {
    id: String,
    description: String,
}

impl NullAdapter {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

#[async_trait]
impl SiteAdapter for NullAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn enabled(&self) -> bool {
        false
    }

    fn search_url(&self, _query: &str) -> String {
        String::new()
    }

    async fn scrape(&self, _query: &str) -> Result<Vec<ProductRecord>> {
        Ok(Vec::new())
    }
}

/// Registry of site adapters, looked up by id.
pub struct SiteRegistry {
    adapters: Vec<Box<dyn SiteAdapter>>,
}

impl SiteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Register an adapter. Later registrations with a duplicate id are
    /// ignored; the first registration wins.
    pub fn register(&mut self, adapter: Box<dyn SiteAdapter>) {
        if self.find(adapter.id()).is_none() {
            self.adapters.push(adapter);
        }
    }

    /// Find an adapter by site id.
    pub fn find(&self, id: &str) -> Option<&dyn SiteAdapter> {
        self.adapters
            .iter()
            .find(|a| a.id() == id)
            .map(|a| a.as_ref())
    }

    /// All registered adapters, in registration order.
    pub fn adapters(&self) -> &[Box<dyn SiteAdapter>] {
        &self.adapters
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
