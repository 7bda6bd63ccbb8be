use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{BenchError, BenchResult};
use crate::sizes::{ByteSize, GIB};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "PRIMBENCH_CONFIG";

/// Config path used when `PRIMBENCH_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "primbench.toml";

/// Top-level configuration (loaded from primbench.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimbenchConfig {
    pub log: LogConfig,
    pub bench: BenchConfig,
    pub sqlite: SqliteConfig,
    pub sqlite_enum: SqliteEnumConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Largest input size any benchmark family will allocate (default: 1GiB)
    pub max_size: ByteSize,
    /// Directory holding the gzipped compression corpus
    pub testdata_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Database file; removed together with its -wal/-shm files before a run
    pub path: PathBuf,
    /// Concurrent reader tasks (default: 500)
    pub readers: usize,
    /// Concurrent writer tasks (default: 1)
    pub writers: usize,
    /// How long the load runs before the timer fires
    pub duration_secs: u64,
    /// Read pool size (0 = max(4, cpu_count))
    pub read_connections: u32,
    /// SQLite busy timeout in milliseconds
    pub busy_timeout_ms: u64,
    /// `PRAGMA cache_size` value
    pub cache_size: i64,
    /// Extra pragmas applied to every connection
    pub pragmas: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteEnumConfig {
    /// Rows inserted into the enum table
    pub rows: usize,
    /// Rows per insert transaction
    pub batch_size: usize,
}

impl PrimbenchConfig {
    /// Parse the config file at `path`. `None` when the file does not exist.
    pub fn load(path: &Path) -> BenchResult<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| BenchError::Config(format!("parsing {}: {e}", path.display())))
    }

    /// Config file path: `PRIMBENCH_CONFIG` if set, else `primbench.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Config the benches run with.
    ///
    /// Bench binaries have no flags of their own, so a missing or invalid file
    /// falls back to defaults with a warning instead of aborting the run.
    pub fn load_default() -> Self {
        let path = Self::default_path();
        match Self::load(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }
}

impl SqliteConfig {
    /// Read pool size after resolving the `0 = auto` default.
    pub fn effective_read_connections(&self) -> u32 {
        if self.read_connections > 0 {
            self.read_connections
        } else {
            num_cpus::get().max(4) as u32
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            max_size: ByteSize(GIB),
            testdata_dir: PathBuf::from("testdata"),
        }
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        let mut pragmas = BTreeMap::new();
        pragmas.insert("temp_store".into(), "memory".into());

        Self {
            path: PathBuf::from("./test.db"),
            readers: 500,
            writers: 1,
            duration_secs: 10,
            read_connections: 0,
            busy_timeout_ms: 5000,
            cache_size: 1_000_000_000,
            pragmas,
        }
    }
}

impl Default for SqliteEnumConfig {
    fn default() -> Self {
        Self {
            rows: 2_000_000,
            batch_size: 200_000,
        }
    }
}
