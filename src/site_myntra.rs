//! Myntra adapter.
//!
//! Myntra's results grid is rendered client-side and the storefront blocks
//! plain HTTP clients, so this adapter rides the browser-emulating fetcher
//! and waits for the `ul.results-base` grid before parsing.
//!
//! Query encoding: spaces become hyphens in a path segment
//! (`"summer dress"` → `/summer-dress`).

use anyhow::Result;
use async_trait::async_trait;
use scraper::{ElementRef, Html};
use std::sync::Arc;
use url::Url;

use crate::adapter::SiteAdapter;
use crate::extract::{absolutize, attr_chain, first_attr, first_text, sel};
use crate::fetch::{fetch_ready, Fetch, ReadyWait};
use crate::models::{ProductRecord, NO_IMAGE};

const ORIGIN: &str = "https://www.myntra.com/";
const READY: &str = "ul.results-base";

pub struct MyntraAdapter {
    fetcher: Arc<dyn Fetch>,
    wait: ReadyWait,
    cap: usize,
    origin: Url,
}

impl MyntraAdapter {
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
        let container = sel("li.product-base");
        doc.select(&container)
            .take(self.cap)
            .filter_map(|item| self.parse_item(&item))
            .collect()
    }

    fn parse_item(&self, item: &ElementRef) -> Option<ProductRecord> {
        let brand = first_text(item, &sel("h3.product-brand"))?;
        let name = first_text(item, &sel("h4.product-product"))?;

        // Discounted price if present, otherwise the first price span.
        let price_scope = item.select(&sel("div.product-price")).next()?;
        let price = first_text(&price_scope, &sel("span.product-discountedPrice"))
            .or_else(|| first_text(&price_scope, &sel("span")))?;

        let href = first_attr(item, &sel("a"), &["href"])?;
        let link = absolutize(&self.origin, &href)?;

        let img = item.select(&sel("picture.img-responsive img")).next()?;
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
impl SiteAdapter for MyntraAdapter {
    fn id(&self) -> &str {
        "myntra"
    }

    fn description(&self) -> &str {
        "Myntra search results (browser-emulated fetch)"
    }

    fn search_url(&self, query: &str) -> String {
        format!("{ORIGIN}{}", query.trim().replace(' ', "-"))
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

    fn adapter_with(html: &str, cap: usize) -> MyntraAdapter {
        MyntraAdapter::new(
            Arc::new(FixtureFetcher::new(html)),
            ReadyWait::new(Duration::from_millis(100), Duration::from_millis(10)),
            cap,
        )
    }

    fn product_li(brand: &str, name: &str) -> String {
        format!(
            r#"<li class="product-base">
                 <a href="roadster/shirt/123/buy">
                   <picture class="img-responsive"><img src="https://assets.myntassets.com/{name}.jpg"></picture>
                   <h3 class="product-brand">{brand}</h3>
                   <h4 class="product-product">{name}</h4>
                   <div class="product-price">
                     <span class="product-discountedPrice">Rs. 699</span>
                     <span class="product-strike">Rs. 1399</span>
                   </div>
                 </a>
               </li>"#
        )
    }

    #[test]
    fn test_search_url_hyphenates_spaces() {
        let adapter = adapter_with("", 5);
        assert_eq!(
            adapter.search_url("summer dress"),
            "https://www.myntra.com/summer-dress"
        );
    }

    #[tokio::test]
    async fn test_full_extraction() {
        let html = format!(
            r#"<ul class="results-base">{}</ul>"#,
            product_li("Roadster", "slim-shirt")
        );
        let adapter = adapter_with(&html, 5);
        let products = adapter.scrape("shirt").await.unwrap();
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.brand, "Roadster");
        assert_eq!(p.name, "slim-shirt");
        assert_eq!(p.price, "Rs. 699");
        assert_eq!(p.link, "https://www.myntra.com/roadster/shirt/123/buy");
        assert_eq!(p.image_url, "https://assets.myntassets.com/slim-shirt.jpg");
    }

    #[test]
    fn test_price_falls_back_to_first_span() {
        let html = r#"<ul class="results-base"><li class="product-base">
            <a href="x/1/buy">
              <picture class="img-responsive"><img src="https://img/x.jpg"></picture>
              <h3 class="product-brand">HRX</h3>
              <h4 class="product-product">Tee</h4>
              <div class="product-price"><span>Rs. 499</span></div>
            </a></li></ul>"#;
        let adapter = adapter_with(html, 5);
        let products = adapter.parse(html);
        assert_eq!(products[0].price, "Rs. 499");
    }

    #[test]
    fn test_partial_container_is_discarded() {
        // No price block at all.
        let html = r#"<ul class="results-base"><li class="product-base">
            <a href="x/1/buy">
              <picture class="img-responsive"><img src="https://img/x.jpg"></picture>
              <h3 class="product-brand">HRX</h3>
              <h4 class="product-product">Tee</h4>
            </a></li></ul>"#;
        let adapter = adapter_with(html, 5);
        assert!(adapter.parse(html).is_empty());
    }

    #[test]
    fn test_missing_image_src_uses_sentinel() {
        let html = r#"<ul class="results-base"><li class="product-base">
            <a href="x/1/buy">
              <picture class="img-responsive"><img></picture>
              <h3 class="product-brand">HRX</h3>
              <h4 class="product-product">Tee</h4>
              <div class="product-price"><span>Rs. 499</span></div>
            </a></li></ul>"#;
        let adapter = adapter_with(html, 5);
        assert_eq!(adapter.parse(html)[0].image_url, NO_IMAGE);
    }

    #[test]
    fn test_cap_limits_containers() {
        let items: String = (0..8).map(|i| product_li("B", &format!("p{i}"))).collect();
        let html = format!(r#"<ul class="results-base">{items}</ul>"#);
        let adapter = adapter_with(&html, 5);
        assert_eq!(adapter.parse(&html).len(), 5);
    }
}
