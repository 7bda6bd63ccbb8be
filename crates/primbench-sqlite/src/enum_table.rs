//! INT vs TEXT enum columns
//!
//! The same status value is stored twice per row, once as its integer code and
//! once as its name, with an index on each column. Queries then compare lookup
//! cost by column type.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use primbench_core::config::{SqliteConfig, SqliteEnumConfig};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::options;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Active,
    Pending,
    Processing,
    Canceled,
    Completed,
    AnotherValue,
    SomethingElse,
    Draft,
    Unknown,
}

impl Status {
    /// Insertion order; row `i` holds `ALL[i % 9]`.
    pub const ALL: [Status; 9] = [
        Status::Active,
        Status::Pending,
        Status::Processing,
        Status::Canceled,
        Status::Completed,
        Status::AnotherValue,
        Status::SomethingElse,
        Status::Draft,
        Status::Unknown,
    ];

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Pending => "pending",
            Status::Processing => "processing",
            Status::Canceled => "canceled",
            Status::Completed => "completed",
            Status::AnotherValue => "anothervalue",
            Status::SomethingElse => "somethingelse",
            Status::Draft => "draft",
            Status::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown status: {s}"))
    }
}

const SCHEMA: &str = "CREATE TABLE test_enum (
    value_int INT NOT NULL,
    value_text TEXT NOT NULL
) STRICT";

const INDEXES: &[&str] = &[
    "CREATE INDEX index_test_enum_on_value_int ON test_enum (value_int)",
    "CREATE INDEX index_test_enum_on_value_text ON test_enum (value_text)",
];

/// A populated, indexed and analyzed in-memory `test_enum` table.
pub struct EnumTable {
    pool: SqlitePool,
    rows: usize,
}

impl EnumTable {
    /// Build the table: insert `rows` rows in transactions of `batch_size`
    /// (0 = one transaction), then index both columns and `ANALYZE`.
    pub async fn create(sqlite: &SqliteConfig, config: &SqliteEnumConfig) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options::memory_options(sqlite)?)
            .await
            .context("opening in-memory database")?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .context("creating test_enum")?;

        let batch_size = match config.batch_size {
            0 => usize::MAX,
            n => n,
        };

        let mut tx = pool.begin().await?;
        for i in 0..config.rows {
            let status = Status::ALL[i % Status::ALL.len()];
            sqlx::query("INSERT INTO test_enum (value_int, value_text) VALUES (?, ?)")
                .bind(status.code())
                .bind(status.as_str())
                .execute(&mut *tx)
                .await
                .with_context(|| format!("inserting row {i}"))?;

            if (i + 1) % batch_size == 0 {
                tx.commit().await?;
                debug!(rows = i + 1, "committed batch");
                tx = pool.begin().await?;
            }
        }
        tx.commit().await?;

        for index in INDEXES {
            sqlx::query(index).execute(&pool).await.context("creating index")?;
        }
        sqlx::query("ANALYZE").execute(&pool).await.context("ANALYZE")?;

        info!(rows = config.rows, batch_size = config.batch_size, "test_enum ready");
        Ok(Self {
            pool,
            rows: config.rows,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn count_by_int(&self, status: Status) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM test_enum WHERE value_int = ?")
            .bind(status.code())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Stops at the first matching row.
    pub async fn exists_by_int(&self, status: Status) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM (SELECT 1 FROM test_enum WHERE value_int = ? LIMIT 1)",
        )
        .bind(status.code())
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn count_by_text(&self, status: Status) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM test_enum WHERE value_text = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
