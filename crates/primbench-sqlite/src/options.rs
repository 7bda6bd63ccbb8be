//! Connection options: WAL, busy timeout, NORMAL sync, large page cache

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use primbench_core::config::SqliteConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};

/// Options for a file-backed database, created if missing.
pub fn file_options(path: &Path, config: &SqliteConfig) -> SqliteConnectOptions {
    apply(
        SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true),
        config,
    )
}

/// Options for an in-memory database.
///
/// The database lives only as long as a connection to it, so pools built
/// from these must never retire their last connection.
pub fn memory_options(config: &SqliteConfig) -> Result<SqliteConnectOptions> {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")
        .context("parsing in-memory sqlite url")?;
    Ok(apply(opts, config))
}

fn apply(opts: SqliteConnectOptions, config: &SqliteConfig) -> SqliteConnectOptions {
    let mut opts = opts
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .pragma("cache_size", config.cache_size.to_string());

    for (key, value) in &config.pragmas {
        opts = opts.pragma(key.clone(), value.clone());
    }
    opts
}

/// Remove a database file and its `-wal`/`-shm` companions. Missing files are fine.
pub fn remove_database(path: &Path) -> Result<()> {
    let mut targets = vec![path.to_path_buf()];
    for suffix in ["-shm", "-wal"] {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        targets.push(name.into());
    }

    for target in targets {
        match std::fs::remove_file(&target) {
            Ok(()) => tracing::debug!(path = %target.display(), "removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("removing {}", target.display()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_database_takes_companions() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("test.db");
        for name in ["test.db", "test.db-shm", "test.db-wal", "other.db"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        remove_database(&db).unwrap();

        assert!(!db.exists());
        assert!(!dir.path().join("test.db-shm").exists());
        assert!(!dir.path().join("test.db-wal").exists());
        assert!(dir.path().join("other.db").exists());
    }

    #[test]
    fn remove_database_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        remove_database(&dir.path().join("never-created.db")).unwrap();
    }

    #[test]
    fn file_options_keep_path() {
        let config = SqliteConfig::default();
        let opts = file_options(Path::new("/tmp/x.db"), &config);
        assert_eq!(opts.get_filename(), Path::new("/tmp/x.db"));
    }
}
