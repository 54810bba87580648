//! Ajio adapter.
//!
//! Ajio renders its grid client-side behind lazy-loaded images and rejects
//! plain HTTP clients, so this adapter uses the browser-emulating fetcher
//! and waits for the `.products-list` container. Query encoding:
//! percent-encoded `text=` parameter.

use anyhow::Result;
use async_trait::async_trait;
use scraper::{ElementRef, Html};
use std::sync::Arc;
use url::Url;

use crate::adapter::SiteAdapter;
use crate::extract::{absolutize, attr_chain, first_attr, first_text, sel};
use crate::fetch::{fetch_ready, Fetch, ReadyWait};
use crate::models::{ProductRecord, NO_IMAGE};

const ORIGIN: &str = "https://www.ajio.com/";
const READY: &str = ".products-list";

pub struct AjioAdapter {
    fetcher: Arc<dyn Fetch>,
    wait: ReadyWait,
    cap: usize,
    origin: Url,
}

impl AjioAdapter {
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
        let container = sel("div.item.product-card");
        doc.select(&container)
            .take(self.cap)
            .filter_map(|item| self.parse_item(&item))
            .collect()
    }

    fn parse_item(&self, item: &ElementRef) -> Option<ProductRecord> {
        let brand = first_text(item, &sel("div.brand"))?;
        let name = first_text(item, &sel("div.nameCls"))?;
        let price = first_text(item, &sel("span.price"))?;

        let href = first_attr(item, &sel("a"), &["href"])?;
        let link = absolutize(&self.origin, &href)?;

        // Only images the lazy loader has resolved carry this class.
        let img = item.select(&sel("img.ril-lazy-img-loaded")).next()?;
        let image_url = attr_chain(&img, &["src", "data-src"])
            .and_then(|src| absolutize(&self.origin, &src))
            .unwrap_or_else(|| NO_IMAGE.to_string());

        Some(ProductRecord {
            brand,
            name,
            price,
            link,
            image_url,
        })
    }
}

#[async_trait]
impl SiteAdapter for AjioAdapter {
    fn id(&self) -> &str {
        "ajio"
    }

    fn description(&self) -> &str {
        "Ajio search results (browser-emulated fetch)"
    }

    fn search_url(&self, query: &str) -> String {
        format!("{ORIGIN}search/?text={}", urlencoding::encode(query.trim()))
    }

    async fn scrape(&self, query: &str) -> Result<Vec<ProductRecord>> {
        let url = self.search_url(query);
        let html = fetch_ready(self.fetcher.as_ref(), &url, READY, self.wait).await?;
        Ok(self.parse(&html))
    }
}
