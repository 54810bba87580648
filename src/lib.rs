//! # LookCircuit Core
//!
//! The scraping and recommendation core of the LookCircuit fashion
//! assistant: a multi-site storefront scraping layer, a rule-based
//! recommendation filter over a body-shape catalog, and an item-based
//! collaborative-filtering fallback over saved items.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ SiteAdapters │──▶│ Orchestrator   │   │ Catalog +      │
//! │ Myntra/Ajio/ │   │ fan-out/merge │   │ personalize   │
//! │ Snitch/TSS   │   └──────┬────────┘   └──────┬────────┘
//! └──────────────┘          │                   │
//!                           ▼                   ▼
//!                      ┌──────────┐       ┌──────────┐
//!                      │   CLI    │       │   HTTP   │
//!                      │ (lookc)  │       │  (axum)  │
//!                      └──────────┘       └──────────┘
//!                           ▲
//!                           │
//!                 ┌─────────┴─────────┐
//!                 │ SQLite save log → │
//!                 │ item-based CF     │
//!                 └───────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`fetch`] | Page retrieval (plain + browser-emulated clients) |
//! | [`extract`] | DOM query helpers |
//! | [`adapter`] | `SiteAdapter` trait and registry |
//! | [`orchestrator`] | Concurrent multi-site scrape |
//! | [`catalog`] | Body-shape recommendation catalog |
//! | [`recommend`] | Rule-based recommendation filter |
//! | [`interactions`] | Interaction persistence |
//! | [`similar`] | Item-based collaborative filtering |
//! | [`classifier`] | Black-box image classification interface |
//! | [`server`] | HTTP API |

pub mod adapter;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod interactions;
pub mod models;
pub mod orchestrator;
pub mod recommend;
pub mod server;
pub mod similar;
pub mod site_ajio;
pub mod site_myntra;
pub mod site_snitch;
pub mod site_souled_store;
