//! Core data models used throughout the LookCircuit core.
//!
//! These types represent the product records produced by site adapters,
//! the style questionnaire consumed by the recommendation filter, and the
//! interaction events that feed the collaborative recommender.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel image URL used when a matched product container carries an
/// image element with no usable `src`/`data-src`.
pub const NO_IMAGE: &str = "no image";

/// A normalized product listing scraped from one storefront.
///
/// Records are transient: produced fresh per query and handed to the
/// caller, never persisted. An adapter emits a record only when every
/// required field resolved to non-empty text — a partial DOM match is
/// discarded, not emitted with empty fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub brand: String,
    pub name: String,
    /// Opaque, locale-formatted price text (e.g. `"₹2,699"`). Not
    /// guaranteed to be numeric.
    pub price: String,
    /// Absolute product page URL.
    pub link: String,
    /// Absolute image URL, or [`NO_IMAGE`].
    pub image_url: String,
}

/// The style questionnaire a user fills in.
///
/// All fields are free text and optional. Only `fashion_risk_tolerance`
/// and `preferred_colors` are consumed by the recommendation filter; the
/// rest ride along for profile round-trips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleGuide {
    #[serde(default)]
    pub fashion_preferences: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub lifestyle: String,
    #[serde(default)]
    pub social_activities: String,
    /// `"conservative"`, `"moderate"`, or `"adventurous"`. Anything else
    /// (including empty) is treated as moderate.
    #[serde(default)]
    pub fashion_risk_tolerance: String,
    #[serde(default)]
    pub comfort_vs_style: String,
    /// Comma-separated colors; the first entry drives color annotation.
    #[serde(default)]
    pub preferred_colors: String,
    #[serde(default)]
    pub avoided_colors: String,
    #[serde(default)]
    pub brand_preferences: String,
    #[serde(default)]
    pub preferred_stores: String,
}

/// Kind of a recorded user-item interaction.
///
/// Only [`InteractionKind::Save`] participates in similarity computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Save,
    Like,
    Dislike,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Save => "save",
            InteractionKind::Like => "like",
            InteractionKind::Dislike => "dislike",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "save" => Some(InteractionKind::Save),
            "like" => Some(InteractionKind::Like),
            "dislike" => Some(InteractionKind::Dislike),
            _ => None,
        }
    }
}

/// A single user-item interaction event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub user_id: i64,
    pub item_id: i64,
    pub kind: InteractionKind,
    pub created_at: DateTime<Utc>,
}
