//! primbench: library microbenchmark driver
//!
//! The benchmarks themselves are divan benches (`cargo bench -p <crate>`).
//! This binary covers everything around them:
//!   system-info   - print the host description that goes with a result set
//!   list          - benchmark families, algorithms and effective size matrices
//!   sqlite-load   - run the concurrent SQLite read/write harness
//!   config show   - display the effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use primbench_core::config::PrimbenchConfig;
use primbench_core::sizes::{self, ByteSize, Family, MAX_SIZE_ENV};
use primbench_core::system::SystemInfo;
use primbench_data::corpus;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "primbench",
    version,
    about = "Microbenchmarks for checksum, compression, crypto and storage libraries"
)]
struct Cli {
    /// Path to primbench.toml configuration file
    #[arg(long, short = 'c', env = "PRIMBENCH_CONFIG", default_value = "primbench.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides [log] level
    #[arg(long, env = "PRIMBENCH_LOG")]
    log: Option<String>,

    /// Log format; overrides [log] format
    #[arg(long, env = "PRIMBENCH_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print date, toolchain, OS, cores and CPU features
    #[command(name = "system-info")]
    SystemInfo,

    /// List benchmark families, algorithms and size matrices
    List,

    /// Hammer one SQLite database with concurrent readers and writers
    #[command(name = "sqlite-load")]
    SqliteLoad {
        /// Database file (overrides [sqlite] path)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Concurrent reader tasks
        #[arg(long)]
        readers: Option<usize>,
        /// Concurrent writer tasks
        #[arg(long)]
        writers: Option<usize>,
        /// Run length in seconds
        #[arg(long)]
        duration: Option<u64>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(&cli.config).await?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    let level = cli.log.clone().unwrap_or_else(|| config.log.level.clone());
    let format = match cli.log_format {
        Some(format) => format,
        None => parse_log_format(&config.log.format),
    };
    init_logging(&level, format);

    if !found {
        warn!("config file not found: {}  (using defaults)", cli.config.display());
    }

    match cli.command {
        Commands::SystemInfo => cmd_system_info(),
        Commands::List => cmd_list(&config),
        Commands::SqliteLoad {
            db,
            readers,
            writers,
            duration,
        } => cmd_sqlite_load(config, db, readers, writers, duration).await,
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &cli.config),
    }
}

/// `None` when the file does not exist; a present but invalid file is an error.
async fn load_config(path: &Path) -> Result<Option<PrimbenchConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config: {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("parsing config: {}", path.display()))?;
    Ok(Some(config))
}

fn parse_log_format(raw: &str) -> LogFormat {
    match raw.to_ascii_lowercase().as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Text,
    }
}

fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn make_spinner(prefix: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} {spinner} [{elapsed}] {msg}")
            .context("building spinner style")?,
    );
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

// ── `primbench system-info` ───────────────────────────────────────────────────

fn cmd_system_info() -> Result<()> {
    print!("{}", SystemInfo::collect());
    Ok(())
}

// ── `primbench list` ──────────────────────────────────────────────────────────

/// `PRIMBENCH_MAX_SIZE` wins over `[bench] max_size`, matching what the benches see.
fn effective_max_size(config: &PrimbenchConfig) -> ByteSize {
    let raw = std::env::var(MAX_SIZE_ENV).ok();
    sizes::resolve_max_size(raw.as_deref(), || config.bench.max_size)
}

fn effective_testdata_dir(config: &PrimbenchConfig) -> PathBuf {
    let env = std::env::var_os(corpus::TESTDATA_ENV).map(PathBuf::from);
    corpus::resolve_testdata_dir(env, || config.clone())
}

fn algorithms(family: Family) -> Vec<&'static str> {
    use primbench_crypto::{aead, cipher, hashing, kdf, mac, signatures};
    use primbench_data::{checksum, chunking, compression, encoding};

    match family {
        Family::Checksum => checksum::ALGORITHMS.to_vec(),
        Family::Chunking => chunking::ALGORITHMS.to_vec(),
        Family::Compression => compression::ALGORITHMS.to_vec(),
        Family::Encoding => encoding::ALGORITHMS.to_vec(),
        Family::Hashing => [hashing::ALGORITHMS_256, hashing::ALGORITHMS_512].concat(),
        Family::Kdf => kdf::ALGORITHMS.to_vec(),
        Family::Mac => mac::ALGORITHMS.to_vec(),
        Family::Signatures => signatures::ALGORITHMS.to_vec(),
        Family::Aead => aead::ALGORITHMS.to_vec(),
        Family::Cipher => cipher::ALGORITHMS.to_vec(),
    }
}

fn join_sizes(sizes: &[ByteSize]) -> String {
    sizes.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn cmd_list(config: &PrimbenchConfig) -> Result<()> {
    let max = effective_max_size(config);
    println!("max size: {max}");
    println!("(bench rows are labelled by adapter type, e.g. Zstd<1> for zstd_1)");
    println!();

    for family in Family::ALL {
        println!("{}", family.name());
        println!("  algorithms: {}", algorithms(family).join(", "));
        if family == Family::Compression {
            let dir = effective_testdata_dir(config);
            let present: Vec<&str> = corpus::FILES
                .iter()
                .copied()
                .filter(|name| dir.join(format!("{name}.gz")).exists())
                .collect();
            if present.is_empty() {
                println!(
                    "  corpus:     {} (no files in {}, synthetic fallback)",
                    corpus::SYNTHETIC_NAME,
                    dir.display()
                );
            } else {
                println!("  corpus:     {} ({})", present.join(", "), dir.display());
            }
        } else {
            let capped = sizes::capped(family.matrix(), max);
            if capped.is_empty() {
                println!("  sizes:      (none under {max})");
            } else {
                println!("  sizes:      {}", join_sizes(&capped));
            }
        }
    }

    println!("memory");
    let blob_sizes: Vec<String> = primbench_mem::memory::SIZES.iter().map(|n| n.to_string()).collect();
    println!("  blob bytes: {}", blob_sizes.join(", "));
    println!("shared");
    println!("  algorithms: {}", primbench_mem::shared::ALGORITHMS.join(", "));
    println!("ffi");
    println!("  algorithms: c_noop, rust_noop");
    println!("sqlite_enum");
    println!(
        "  rows:       {} (batches of {})",
        config.sqlite_enum.rows, config.sqlite_enum.batch_size
    );
    Ok(())
}

// ── `primbench sqlite-load` ───────────────────────────────────────────────────

async fn cmd_sqlite_load(
    config: PrimbenchConfig,
    db: Option<PathBuf>,
    readers: Option<usize>,
    writers: Option<usize>,
    duration: Option<u64>,
) -> Result<()> {
    let mut sqlite = config.sqlite;
    if let Some(db) = db {
        sqlite.path = db;
    }
    if let Some(readers) = readers {
        sqlite.readers = readers;
    }
    if let Some(writers) = writers {
        sqlite.writers = writers;
    }
    if let Some(duration) = duration {
        sqlite.duration_secs = duration;
    }

    let runner = primbench_sqlite::LoadRunner::new(sqlite.clone());
    let stop = CancellationToken::new();
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupted, stopping load");
                stop.cancel();
            }
        });
    }

    let pb = make_spinner("sqlite")?;
    pb.set_message(format!(
        "{} readers, {} writers, {}s on {}",
        sqlite.readers,
        sqlite.writers,
        sqlite.duration_secs,
        sqlite.path.display()
    ));
    let result = runner.run_until(stop).await;
    pb.finish_and_clear();

    let report = result?;
    println!("{report}");
    Ok(())
}

// ── `primbench config show` ───────────────────────────────────────────────────

fn cmd_config_show(config: &PrimbenchConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sqlite_load_overrides() {
        let cli = Cli::try_parse_from([
            "primbench",
            "--log",
            "debug",
            "sqlite-load",
            "--readers",
            "16",
            "--duration",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.log.as_deref(), Some("debug"));
        match cli.command {
            Commands::SqliteLoad {
                readers, duration, writers, db,
            } => {
                assert_eq!(readers, Some(16));
                assert_eq!(duration, Some(2));
                assert_eq!(writers, None);
                assert_eq!(db, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_config_show() {
        let cli = Cli::try_parse_from(["primbench", "--log-format", "json", "config", "show"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));
    }

    #[test]
    fn log_format_from_config() {
        assert_eq!(parse_log_format("json"), LogFormat::Json);
        assert_eq!(parse_log_format("JSON"), LogFormat::Json);
        assert_eq!(parse_log_format("text"), LogFormat::Text);
        assert_eq!(parse_log_format("pretty"), LogFormat::Text);
    }

    #[test]
    fn every_family_lists_algorithms() {
        for family in Family::ALL {
            assert!(!algorithms(family).is_empty(), "{}", family.name());
        }
        assert_eq!(
            algorithms(Family::Hashing).len(),
            primbench_crypto::hashing::ALGORITHMS_256.len()
                + primbench_crypto::hashing::ALGORITHMS_512.len()
        );
    }

    #[tokio::test]
    async fn missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("primbench.toml");
        std::fs::write(&path, "[sqlite]\nreaders = \"many\"\n").unwrap();
        assert!(load_config(&path).await.is_err());
    }
}
