//! Concurrent read/write load against one SQLite database
//!
//! Readers share a pool of `max(4, cpus)` connections and repeatedly fetch a
//! single row. Writers share a pool of exactly one connection, so SQLite never
//! sees two writers contend for the lock. Every task counts its own operations
//! and adds them to the shared totals once, after the timer fires.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use primbench_core::config::SqliteConfig;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::options;
use crate::timestamp::Timestamp;

pub const SCHEMA: &str = "CREATE TABLE test (
    id BLOB NOT NULL PRIMARY KEY,
    created_at INTEGER NOT NULL,
    counter INT NOT NULL
) STRICT";

const SELECT_ONE: &str = "SELECT id, created_at, counter FROM test LIMIT 1";
const INSERT: &str = "INSERT INTO test (id, created_at, counter) VALUES (?, ?, ?)";

/// One row of the `test` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Entity {
    pub id: Uuid,
    pub created_at: Timestamp,
    pub counter: i64,
}

/// Totals for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadReport {
    pub elapsed: Duration,
    pub reads: u64,
    pub writes: u64,
}

impl LoadReport {
    pub fn reads_per_sec(&self) -> f64 {
        per_sec(self.reads, self.elapsed)
    }

    pub fn writes_per_sec(&self) -> f64 {
        per_sec(self.writes, self.elapsed)
    }
}

fn per_sec(count: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "elapsed: {:.3?}", self.elapsed)?;
        writeln!(f, "----------------------")?;
        writeln!(f, "{} reads", self.reads)?;
        writeln!(f, "{:.2} reads/s", self.reads_per_sec())?;
        writeln!(f, "----------------------")?;
        writeln!(f, "{} writes", self.writes)?;
        write!(f, "{:.2} writes/s", self.writes_per_sec())
    }
}

/// Drives one load run from a `[sqlite]` config section.
#[derive(Debug, Clone)]
pub struct LoadRunner {
    config: SqliteConfig,
    duration: Duration,
}

impl LoadRunner {
    pub fn new(config: SqliteConfig) -> Self {
        let duration = Duration::from_secs(config.duration_secs);
        Self { config, duration }
    }

    /// Override `duration_secs` with a finer-grained run length.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    /// Run until the timer fires.
    pub async fn run(&self) -> Result<LoadReport> {
        self.run_until(CancellationToken::new()).await
    }

    /// Run until the timer fires or `stop` is cancelled, whichever comes first.
    pub async fn run_until(&self, stop: CancellationToken) -> Result<LoadReport> {
        let path = &self.config.path;
        options::remove_database(path)?;

        let opts = options::file_options(path, &self.config);
        let write_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts.clone())
            .await
            .with_context(|| format!("opening write pool on {}", path.display()))?;
        let read_connections = self.config.effective_read_connections();
        let read_pool = SqlitePoolOptions::new()
            .max_connections(read_connections)
            .connect_with(opts)
            .await
            .with_context(|| format!("opening read pool on {}", path.display()))?;

        sqlx::query(SCHEMA)
            .execute(&write_pool)
            .await
            .context("creating test table")?;

        info!(
            path = %path.display(),
            readers = self.config.readers,
            writers = self.config.writers,
            read_connections,
            duration = ?self.duration,
            "starting"
        );

        let reads = Arc::new(AtomicU64::new(0));
        let writes = Arc::new(AtomicU64::new(0));
        let start = Instant::now();
        let created_at = Timestamp::now();

        let timer = {
            let stop = stop.clone();
            let duration = self.duration;
            tokio::spawn(async move {
                tokio::select! {
                    _ = tokio::time::sleep(duration) => stop.cancel(),
                    _ = stop.cancelled() => {}
                }
            })
        };

        let mut tasks = JoinSet::new();
        for _ in 0..self.config.readers {
            tasks.spawn(read_loop(read_pool.clone(), stop.clone(), reads.clone()));
        }
        for _ in 0..self.config.writers {
            tasks.spawn(write_loop(
                write_pool.clone(),
                stop.clone(),
                writes.clone(),
                created_at,
            ));
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let result = joined.context("load task panicked").and_then(|r| r);
            if let Err(e) = result {
                warn!(error = %e, "load task failed, stopping run");
                stop.cancel();
                first_error.get_or_insert(e);
            }
        }
        let elapsed = start.elapsed();
        timer.abort();

        write_pool.close().await;
        read_pool.close().await;

        if let Some(e) = first_error {
            return Err(e);
        }

        let report = LoadReport {
            elapsed,
            reads: reads.load(Ordering::Relaxed),
            writes: writes.load(Ordering::Relaxed),
        };
        info!(
            elapsed = ?report.elapsed,
            reads = report.reads,
            reads_per_sec = report.reads_per_sec(),
            writes = report.writes,
            writes_per_sec = report.writes_per_sec(),
            "load finished"
        );
        Ok(report)
    }
}

async fn read_loop(pool: SqlitePool, stop: CancellationToken, reads: Arc<AtomicU64>) -> Result<()> {
    let mut local = 0u64;
    while !stop.is_cancelled() {
        let row: Option<Entity> = sqlx::query_as(SELECT_ONE)
            .fetch_optional(&pool)
            .await
            .context("reading test row")?;
        // an empty table is not a read
        if row.is_some() {
            local += 1;
        }
    }
    reads.fetch_add(local, Ordering::Relaxed);
    debug!(reads = local, "reader done");
    Ok(())
}

async fn write_loop(
    pool: SqlitePool,
    stop: CancellationToken,
    writes: Arc<AtomicU64>,
    created_at: Timestamp,
) -> Result<()> {
    let mut local = 0u64;
    while !stop.is_cancelled() {
        sqlx::query(INSERT)
            .bind(Uuid::new_v4())
            .bind(created_at)
            .bind(local as i64)
            .execute(&pool)
            .await
            .context("inserting test row")?;
        local += 1;
    }
    writes.fetch_add(local, Ordering::Relaxed);
    debug!(writes = local, "writer done");
    Ok(())
}
