//! The Souled Store adapter.
//!
//! Single-brand storefront (`brand` is the literal `"The Souled Store"`),
//! plain HTTP fetch, spaces as `+` in the `q=` parameter.

use anyhow::Result;
use async_trait::async_trait;
use scraper::{ElementRef, Html};
use std::sync::Arc;
use url::Url;

use crate::adapter::SiteAdapter;
use crate::extract::{absolutize, attr_chain, first_attr, first_text, sel};
use crate::fetch::{fetch_ready, Fetch, ReadyWait};
use crate::models::{ProductRecord, NO_IMAGE};

const ORIGIN: &str = "https://www.thesouledstore.com/";
const READY: &str = "div.product-card";

pub struct SouledStoreAdapter {
    fetcher: Arc<dyn Fetch>,
    wait: ReadyWait,
    cap: usize,
    origin: Url,
}

impl SouledStoreAdapter {
    pub fn new(fetcher: Arc<dyn Fetch>, wait: ReadyWait, cap: usize) -> Self {
        Self {
            fetcher,
            wait,
            cap,
            origin: Url::parse(ORIGIN).unwrap(),
        }
    }

    fn parse(&self, html: &str) -> Vec<ProductRecord> {
        let doc = Html::parse_document(html);
        let container = sel("div.product-card");
        doc.select(&container)
            .take(self.cap)
            .filter_map(|item| self.parse_item(&item))
            .collect()
    }

    fn parse_item(&self, item: &ElementRef) -> Option<ProductRecord> {
        let name = first_text(item, &sel("h4.product-card__title"))?;
        let price = first_text(item, &sel("span.product-card__price"))?;

        let href = first_attr(item, &sel("a"), &["href"])?;
        let link = absolutize(&self.origin, &href)?;

        let img = item.select(&sel("img.product-card__image")).next()?;
        let image_url = attr_chain(&img, &["src", "data-src"])
            .and_then(|src| absolutize(&self.origin, &src))
            .unwrap_or_else(|| NO_IMAGE.to_string());

        Some(ProductRecord {
            brand: "The Souled Store".to_string(),
            name,
            price,
            link,
            image_url,
        })
    }
}

#[async_trait]
impl SiteAdapter for SouledStoreAdapter {
    fn id(&self) -> &str {
        "souledstore"
    }

    fn description(&self) -> &str {
        "The Souled Store search results"
    }

    fn search_url(&self, query: &str) -> String {
        format!("{ORIGIN}search?q={}", query.trim().replace(' ', "+"))
    }

    async fn scrape(&self, query: &str) -> Result<Vec<ProductRecord>> {
        let url = self.search_url(query);
        let html = fetch_ready(self.fetcher.as_ref(), &url, READY, self.wait).await?;
        Ok(self.parse(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::test_support::FixtureFetcher;
    use std::time::Duration;

    fn adapter_with(html: &str, cap: usize) -> SouledStoreAdapter {
        SouledStoreAdapter::new(
            Arc::new(FixtureFetcher::new(html)),
            ReadyWait::new(Duration::from_millis(100), Duration::from_millis(10)),
            cap,
        )
    }

    #[tokio::test]
    async fn test_full_extraction() {
        let html = r#"<div class="product-card">
            <a href="/product/marvel-oversized-tee">
              <img class="product-card__image" src="//images.souled.example/tee.jpg">
              <h4 class="product-card__title">Marvel Oversized Tee</h4>
              <span class="product-card__price">₹999</span>
            </a>
        </div>"#;
        let adapter = adapter_with(html, 5);
        let products = adapter.scrape("marvel tee").await.unwrap();
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.brand, "The Souled Store");
        assert_eq!(
            p.link,
            "https://www.thesouledstore.com/product/marvel-oversized-tee"
        );
        assert_eq!(p.image_url, "https://images.souled.example/tee.jpg");
    }

    #[test]
    fn test_cap_limits_containers() {
        let card = r#"<div class="product-card">
            <a href="/p/x">
              <img class="product-card__image" src="https://img/x.jpg">
              <h4 class="product-card__title">X</h4>
              <span class="product-card__price">₹1</span>
            </a>
        </div>"#;
        let html = card.repeat(7);
        let adapter = adapter_with(&html, 5);
        assert_eq!(adapter.parse(&html).len(), 5);
    }
}
