//! Multi-site scrape orchestration.
//!
//! Resolves site ids against the registry, fans the query out across the
//! resolved adapters concurrently, and concatenates their results in
//! request order. An unknown site id is the only error; per-site failures
//! are contained inside [`SiteAdapter::fetch`] and surface as empty slots
//! in the merge.

use anyhow::{anyhow, Result};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::{NullAdapter, SiteAdapter, SiteRegistry};
use crate::config::ScrapeConfig;
use crate::fetch::{BrowserFetcher, ReadyWait, StaticFetcher};
use crate::models::ProductRecord;
use crate::site_ajio::AjioAdapter;
use crate::site_myntra::MyntraAdapter;
use crate::site_snitch::SnitchAdapter;
use crate::site_souled_store::SouledStoreAdapter;

pub struct ScrapeOrchestrator {
    registry: SiteRegistry,
    default_sites: Vec<String>,
}

impl ScrapeOrchestrator {
    /// Orchestrator over an explicit registry. Used by tests; production
    /// callers go through [`from_config`](Self::from_config).
    pub fn new(registry: SiteRegistry, default_sites: Vec<String>) -> Self {
        Self {
            registry,
            default_sites,
        }
    }

    /// Build the orchestrator with all built-in site adapters.
    ///
    /// Myntra and Ajio ride the browser-emulating fetcher; Snitch and
    /// The Souled Store serve their grids to a plain client. Comicsense
    /// and Xenpachi stay registered as disabled placeholders: their
    /// markup was never verified against the live storefronts.
    pub fn from_config(cfg: &ScrapeConfig) -> Result<Self> {
        let nav_timeout = Duration::from_secs(cfg.nav_timeout_secs);
        let wait = ReadyWait::new(
            Duration::from_secs(cfg.ready_timeout_secs),
            Duration::from_millis(cfg.poll_interval_ms),
        );
        let cap = cfg.per_site_cap;

        let browser = Arc::new(BrowserFetcher::new(nav_timeout)?);
        let plain = Arc::new(StaticFetcher::new(nav_timeout)?);

        let mut registry = SiteRegistry::new();
        registry.register(Box::new(MyntraAdapter::new(browser.clone(), wait, cap)));
        registry.register(Box::new(SnitchAdapter::new(plain.clone(), wait, cap)));
        registry.register(Box::new(SouledStoreAdapter::new(plain, wait, cap)));
        registry.register(Box::new(AjioAdapter::new(browser, wait, cap)));
        registry.register(Box::new(NullAdapter::new(
            "comicsense",
            "disabled: unverified markup",
        )));
        registry.register(Box::new(NullAdapter::new(
            "xenpachi",
            "disabled: unverified markup",
        )));

        Ok(Self {
            registry,
            default_sites: cfg.sites.clone(),
        })
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// Sites queried when the caller does not pick any explicitly.
    pub fn default_sites(&self) -> &[String] {
        &self.default_sites
    }

    /// Run `query` against the named sites and merge the results.
    ///
    /// Results keep the request order of `site_ids`: all records from the
    /// first site, then the second, and so on. No dedup, no re-ranking.
    /// An empty merged result is a valid "no results" outcome.
    pub async fn search(&self, query: &str, site_ids: &[String]) -> Result<Vec<ProductRecord>> {
        let adapters = site_ids
            .iter()
            .map(|id| {
                self.registry
                    .find(id)
                    .ok_or_else(|| anyhow!("Unknown site id: {id}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let results = join_all(adapters.iter().map(|a| a.fetch(query))).await;
        Ok(results.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;

    struct CannedAdapter {
        id: &'static str,
        names: Vec<&'static str>,
        fail: bool,
    }

    #[async_trait]
    impl SiteAdapter for CannedAdapter {
        fn id(&self) -> &str {
            self.id
        }
        fn description(&self) -> &str {
            "canned"
        }
        fn search_url(&self, _query: &str) -> String {
            String::new()
        }
        async fn scrape(&self, _query: &str) -> Result<Vec<ProductRecord>> {
            if self.fail {
                bail!("storefront exploded");
            }
            Ok(self
                .names
                .iter()
                .map(|n| ProductRecord {
                    brand: self.id.to_string(),
                    name: n.to_string(),
                    price: "₹1".to_string(),
                    link: format!("https://{}.example/{n}", self.id),
                    image_url: "no image".to_string(),
                })
                .collect())
        }
    }

    fn orchestrator(adapters: Vec<CannedAdapter>) -> ScrapeOrchestrator {
        let mut registry = SiteRegistry::new();
        for a in adapters {
            registry.register(Box::new(a));
        }
        ScrapeOrchestrator::new(registry, vec![])
    }

    #[tokio::test]
    async fn test_unknown_site_id_is_an_error() {
        let orch = orchestrator(vec![]);
        let err = orch
            .search("jeans", &["nope".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown site id"));
    }

    #[tokio::test]
    async fn test_merge_preserves_request_order() {
        let orch = orchestrator(vec![
            CannedAdapter {
                id: "a",
                names: vec!["a1", "a2"],
                fail: false,
            },
            CannedAdapter {
                id: "b",
                names: vec!["b1"],
                fail: false,
            },
        ]);
        let out = orch
            .search("x", &["b".to_string(), "a".to_string()])
            .await
            .unwrap();
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b1", "a1", "a2"]);
    }

    #[tokio::test]
    async fn test_failing_adapter_does_not_disturb_siblings() {
        let orch = orchestrator(vec![
            CannedAdapter {
                id: "ok",
                names: vec!["kept"],
                fail: false,
            },
            CannedAdapter {
                id: "broken",
                names: vec![],
                fail: true,
            },
        ]);
        let out = orch
            .search("x", &["broken".to_string(), "ok".to_string()])
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "kept");
    }

    #[tokio::test]
    async fn test_empty_merged_output_is_ok() {
        let orch = orchestrator(vec![CannedAdapter {
            id: "a",
            names: vec![],
            fail: false,
        }]);
        let out = orch.search("x", &["a".to_string()]).await.unwrap();
        assert!(out.is_empty());
    }
}
