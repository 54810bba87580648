//! The rule-based recommendation filter.
//!
//! [`personalize`] takes the shared catalog, a body shape, and the style
//! questionnaire, and produces an owned, filtered set of suggestions:
//! risk-tier gating over tagged `do` items, pass-through `dont` lists, and
//! an optional color annotation. Pure over its inputs; identical inputs
//! serialize to identical bytes.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{Catalog, GuidanceItem};
use crate::models::StyleGuide;

/// How adventurous the user's taste is. Gates which `style_tags` survive
/// the `do` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Adventurous,
}

impl RiskTolerance {
    /// Parse the questionnaire value. Anything unrecognized, including an
    /// empty answer, reads as moderate.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "conservative" => RiskTolerance::Conservative,
            "adventurous" => RiskTolerance::Adventurous,
            _ => RiskTolerance::Moderate,
        }
    }

    /// Style tags a tagged `do` item may carry to survive the filter.
    pub fn allowed_tags(&self) -> &'static [&'static str] {
        match self {
            RiskTolerance::Conservative => &["classic"],
            RiskTolerance::Moderate => &["classic", "trendy"],
            RiskTolerance::Adventurous => &["classic", "trendy", "adventurous"],
        }
    }
}

/// Faults the filter can report. Callers render these as structured
/// payloads, not crashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The catalog is missing, undecodable, or empty.
    DataUnavailable(String),
    /// The catalog has no entry for the requested shape.
    UnknownBodyShape(String),
    /// The profile has no body shape yet.
    IncompleteProfile,
}

impl fmt::Display for RecommendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendError::DataUnavailable(detail) => {
                write!(f, "Recommendation data is missing or corrupt: {detail}")
            }
            RecommendError::UnknownBodyShape(shape) => {
                write!(f, "No recommendations available for body shape: '{shape}'")
            }
            RecommendError::IncompleteProfile => {
                write!(f, "No body shape on profile. Please complete your profile.")
            }
        }
    }
}

impl std::error::Error for RecommendError {}

/// Filtered guidance for one category: surviving `do` texts and the
/// untouched `dont` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySuggestions {
    #[serde(rename = "do")]
    pub do_items: Vec<String>,
    pub dont: Vec<String>,
}

/// The filter's output for one body shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub body_shape: String,
    pub recommendations: BTreeMap<String, CategorySuggestions>,
}

/// First non-empty entry of a comma-separated color list.
fn first_color(preferred_colors: &str) -> Option<&str> {
    preferred_colors
        .split(',')
        .map(str::trim)
        .find(|c| !c.is_empty())
}

/// Produce personalized suggestions for `body_shape` from the catalog.
///
/// Plain `do` items always survive; tagged items survive only when their
/// tags intersect the risk tier's allowed set, and are reduced to their
/// display text. Order within each category is preserved. When the
/// questionnaire names preferred colors, the first one is appended to
/// every surviving `do` item as `" (consider in <color>)"`.
pub fn personalize(
    catalog: &Catalog,
    body_shape: &str,
    guide: &StyleGuide,
) -> Result<Recommendations, RecommendError> {
    let body_shape = body_shape.trim();
    if body_shape.is_empty() {
        return Err(RecommendError::IncompleteProfile);
    }
    let entry = catalog
        .lookup(body_shape)
        .ok_or_else(|| RecommendError::UnknownBodyShape(body_shape.to_string()))?;

    let risk = RiskTolerance::parse(&guide.fashion_risk_tolerance);
    let allowed = risk.allowed_tags();
    let color = first_color(&guide.preferred_colors);

    let mut recommendations = BTreeMap::new();
    for (category, guidance) in &entry.recommendations {
        let do_items = guidance
            .do_items
            .iter()
            .filter(|item| match item {
                GuidanceItem::Plain(_) => true,
                GuidanceItem::Tagged { style_tags, .. } => {
                    style_tags.iter().any(|t| allowed.contains(&t.as_str()))
                }
            })
            .map(|item| match color {
                Some(c) => format!("{} (consider in {c})", item.text()),
                None => item.text().to_string(),
            })
            .collect();

        recommendations.insert(
            category.clone(),
            CategorySuggestions {
                do_items,
                dont: guidance.dont.clone(),
            },
        );
    }

    Ok(Recommendations {
        body_shape: body_shape.to_string(),
        recommendations,
    })
}
