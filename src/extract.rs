//! DOM query helpers shared by the site adapters.
//!
//! Adapters parse fetched HTML with `scraper` and pull fields out of each
//! product container through these helpers. Selector strings are compile-time
//! literals owned by the adapters; parsing one is infallible in practice, so
//! `sel` panics on a malformed literal rather than threading a `Result`
//! through every adapter.

use scraper::{ElementRef, Selector};
use url::Url;

/// Parse a CSS selector literal. Panics on invalid input; only call with
/// string literals.
pub fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Collected, whitespace-trimmed text of an element and its descendants.
pub fn own_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first descendant matching `selector`, if any matched
/// and the text is non-empty.
pub fn first_text(scope: &ElementRef, selector: &Selector) -> Option<String> {
    let text = own_text(&scope.select(selector).next()?);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First non-empty value among `attrs` on `el`. Used for image fallback
/// chains (`src`, then `data-src`).
pub fn attr_chain(el: &ElementRef, attrs: &[&str]) -> Option<String> {
    attrs
        .iter()
        .filter_map(|a| el.value().attr(a))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// First non-empty value among `attrs` on the first descendant matching
/// `selector`.
pub fn first_attr(scope: &ElementRef, selector: &Selector, attrs: &[&str]) -> Option<String> {
    attr_chain(&scope.select(selector).next()?, attrs)
}

/// Resolve `href` against a site origin.
///
/// Absolute URLs pass through untouched; protocol-relative (`//cdn…`) and
/// path-relative values are resolved against the origin, which carries the
/// `https` scheme. Unresolvable input yields `None` and the caller discards
/// the record.
pub fn absolutize(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    origin.join(href).ok().map(|u| u.to_string())
}
