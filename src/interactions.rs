//! Persistence for user-item interactions.
//!
//! The [`InteractionStore`] trait abstracts over backends: [`SqliteStore`]
//! is the production store (WAL-mode SQLite behind a small pool), and
//! [`MemoryStore`] backs unit tests. Only `save` interactions feed the
//! collaborative recommender, so `saves()` is the one read path.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tokio::sync::Mutex;

use crate::models::{InteractionKind, InteractionRecord};

#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Append one interaction event, timestamped now.
    async fn record(&self, user_id: i64, item_id: i64, kind: InteractionKind) -> Result<()>;

    /// All `save` interactions, oldest first (timestamp, then insertion
    /// order).
    async fn saves(&self) -> Result<Vec<InteractionRecord>>;
}

/// In-memory store for tests.
pub struct MemoryStore {
    events: Mutex<Vec<InteractionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Append an event with an explicit timestamp. Lets tests control
    /// recency without sleeping.
    pub async fn record_at(
        &self,
        user_id: i64,
        item_id: i64,
        kind: InteractionKind,
        created_at: DateTime<Utc>,
    ) {
        self.events.lock().await.push(InteractionRecord {
            user_id,
            item_id,
            kind,
            created_at,
        });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InteractionStore for MemoryStore {
    async fn record(&self, user_id: i64, item_id: i64, kind: InteractionKind) -> Result<()> {
        self.record_at(user_id, item_id, kind, Utc::now()).await;
        Ok(())
    }

    async fn saves(&self) -> Result<Vec<InteractionRecord>> {
        let events = self.events.lock().await;
        let mut saves: Vec<InteractionRecord> = events
            .iter()
            .filter(|e| e.kind == InteractionKind::Save)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps.
        saves.sort_by_key(|e| e.created_at);
        Ok(saves)
    }
}

/// SQLite-backed store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `path`.
    pub async fn connect(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        Ok(Self { pool })
    }

    /// Create the schema. Idempotent; `lookc init` runs this.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS interactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                item_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_interactions_kind ON interactions(kind)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl InteractionStore for SqliteStore {
    async fn record(&self, user_id: i64, item_id: i64, kind: InteractionKind) -> Result<()> {
        sqlx::query(
            "INSERT INTO interactions (user_id, item_id, kind, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(item_id)
        .bind(kind.as_str())
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn saves(&self) -> Result<Vec<InteractionRecord>> {
        let rows = sqlx::query_as::<_, (i64, i64, String, i64)>(
            "SELECT user_id, item_id, kind, created_at FROM interactions
             WHERE kind = 'save' ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(user_id, item_id, kind, ts)| {
                Some(InteractionRecord {
                    user_id,
                    item_id,
                    kind: InteractionKind::parse(&kind)?,
                    created_at: DateTime::<Utc>::from_timestamp(ts, 0)?,
                })
            })
            .collect())
    }
}
