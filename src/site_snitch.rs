//! Snitch adapter.
//!
//! Snitch is a single-brand storefront, so `brand` is the literal
//! `"Snitch"`. The search page serves its grid in the initial response;
//! the plain HTTP fetcher is enough. Query encoding: spaces become `+`
//! in the `q=` parameter.

use anyhow::Result;
use async_trait::async_trait;
use scraper::{ElementRef, Html};
use std::sync::Arc;
use url::Url;

use crate::adapter::SiteAdapter;
use crate::extract::{absolutize, attr_chain, first_attr, first_text, sel};
use crate::fetch::{fetch_ready, Fetch, ReadyWait};
use crate::models::{ProductRecord, NO_IMAGE};

const ORIGIN: &str = "https://www.snitch.co.in/";
const READY: &str = "div.product-card";

pub struct SnitchAdapter {
    fetcher: Arc<dyn Fetch>,
    wait: ReadyWait,
    cap: usize,
    origin: Url,
}

impl SnitchAdapter {
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
        let name = first_text(item, &sel(".product-card__title"))?;
        let price = first_text(item, &sel(".price-item--regular"))?;

        let href = first_attr(item, &sel("a.product-card-link"), &["href"])?;
        let link = absolutize(&self.origin, &href)?;

        let img = item.select(&sel("img.product-card-image")).next()?;
        let image_url = attr_chain(&img, &["src", "data-src"])
            .and_then(|src| absolutize(&self.origin, &src))
            .unwrap_or_else(|| NO_IMAGE.to_string());

        Some(ProductRecord {
            brand: "Snitch".to_string(),
            name,
            price,
            link,
            image_url,
        })
    }
}

#[async_trait]
impl SiteAdapter for SnitchAdapter {
    fn id(&self) -> &str {
        "snitch"
    }

    fn description(&self) -> &str {
        "Snitch search results"
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
