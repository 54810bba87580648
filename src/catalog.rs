//! The body-shape recommendation catalog.
//!
//! A JSON resource mapping body shapes to per-category `do`/`dont` styling
//! guidance. Loaded once per process and shared read-only; the filter in
//! [`crate::recommend`] builds fresh output from it and never mutates it.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One `do` entry: either a bare suggestion, or a suggestion tagged with
/// the style tiers it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuidanceItem {
    Plain(String),
    Tagged {
        item: String,
        style_tags: Vec<String>,
    },
}

impl GuidanceItem {
    /// The display text, regardless of tagging.
    pub fn text(&self) -> &str {
        match self {
            GuidanceItem::Plain(s) => s,
            GuidanceItem::Tagged { item, .. } => item,
        }
    }
}

/// Guidance for one garment category (e.g. `"tops"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGuidance {
    #[serde(rename = "do", default)]
    pub do_items: Vec<GuidanceItem>,
    #[serde(default)]
    pub dont: Vec<String>,
}

/// All guidance for one body shape.
///
/// Categories live in a `BTreeMap` so serialized output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeEntry {
    pub recommendations: BTreeMap<String, CategoryGuidance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub body_shapes: BTreeMap<String, ShapeEntry>,
}

impl Catalog {
    /// Load and validate the catalog resource.
    ///
    /// A missing file, undecodable JSON, or an empty `body_shapes` map is
    /// an error; callers surface it as a data-unavailable fault.
    pub fn load(path: &Path) -> Result<Catalog> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
        if catalog.body_shapes.is_empty() {
            bail!("Catalog has no body shapes: {}", path.display());
        }
        Ok(catalog)
    }

    /// Guidance for a body shape, if the catalog knows it.
    pub fn lookup(&self, shape: &str) -> Option<&ShapeEntry> {
        self.body_shapes.get(shape)
    }

    /// All known body shape names, in sorted order.
    pub fn shapes(&self) -> Vec<&str> {
        self.body_shapes.keys().map(String::as_str).collect()
    }
}
