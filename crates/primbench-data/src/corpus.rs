//! Compression corpus
//!
//! The compression benches run over a fixed set of real-world files (books,
//! CSV/JSON tables, a MaxMind database) stored gzipped as `<name>.gz` in the
//! testdata directory. The files are large and not shipped in the repository;
//! when none are present a deterministic synthetic text is used instead so the
//! benches still run.

use anyhow::{Context, Result};
use primbench_core::config::PrimbenchConfig;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the testdata directory
pub const TESTDATA_ENV: &str = "PRIMBENCH_TESTDATA";

/// Corpus file names, without the `.gz` suffix
pub const FILES: &[&str] = &[
    "alices_adventures_in_wonderland.txt",
    "illiad.txt",
    "country_asn.csv",
    "country_asn.json",
    "country_asn.mmdb",
];

/// Name used for the fallback corpus entry
pub const SYNTHETIC_NAME: &str = "synthetic.txt";

/// Size of the fallback corpus entry
pub const SYNTHETIC_SIZE: usize = 1024 * 1024;

/// One decompressed corpus file
#[derive(Debug, Clone)]
pub struct CorpusFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl fmt::Display for CorpusFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Testdata directory: `PRIMBENCH_TESTDATA` if set, else `[bench] testdata_dir`
/// from the config file.
pub fn testdata_dir() -> PathBuf {
    resolve_testdata_dir(std::env::var_os(TESTDATA_ENV).map(PathBuf::from), || {
        PrimbenchConfig::load_default()
    })
}

pub fn resolve_testdata_dir(
    env: Option<PathBuf>,
    config: impl FnOnce() -> PrimbenchConfig,
) -> PathBuf {
    env.unwrap_or_else(|| config().bench.testdata_dir)
}

/// Read and gunzip a file, pre-sizing the output at 3x the compressed size.
pub fn read_gzipped_file(path: &Path) -> Result<Vec<u8>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening corpus file: {}", path.display()))?;
    let compressed_len = file
        .metadata()
        .with_context(|| format!("stat corpus file: {}", path.display()))?
        .len() as usize;

    let mut data = Vec::with_capacity(compressed_len.saturating_mul(3));
    flate2::read::GzDecoder::new(file)
        .read_to_end(&mut data)
        .with_context(|| format!("decompressing corpus file: {}", path.display()))?;
    Ok(data)
}

/// Load every corpus file present in `dir`.
///
/// Missing files are skipped; unreadable ones are logged and skipped. If
/// nothing could be loaded the result is a single synthetic entry.
pub fn load(dir: &Path) -> Vec<CorpusFile> {
    let mut files = Vec::new();

    for name in FILES {
        let path = dir.join(format!("{name}.gz"));
        if !path.exists() {
            debug!(path = %path.display(), "corpus file missing");
            continue;
        }
        match read_gzipped_file(&path) {
            Ok(data) => files.push(CorpusFile {
                name: (*name).to_string(),
                data,
            }),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping corpus file"),
        }
    }

    if files.is_empty() {
        warn!(dir = %dir.display(), "no corpus files found, using synthetic text");
        files.push(CorpusFile {
            name: SYNTHETIC_NAME.into(),
            data: synthetic(SYNTHETIC_SIZE),
        });
    }

    files
}

const WORDS: &[&str] = &[
    "the", "of", "and", "to", "in", "a", "is", "that", "for", "it", "as", "was", "with", "be",
    "by", "on", "not", "he", "this", "are", "or", "his", "from", "at", "which", "but", "have",
    "an", "had", "they", "you", "were", "their", "one", "all", "we", "can", "her", "has",
    "there", "been", "if", "more", "when", "will", "would", "who", "so", "no", "alice",
    "rabbit", "queen", "achilles", "troy", "ships", "spear", "garden", "tea", "cat", "king",
];

/// Deterministic English-like text of exactly `size` bytes.
pub fn synthetic(size: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(size + 16);
    // xorshift64, fixed seed
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut words_in_line = 0;

    while out.len() < size {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;

        let word = WORDS[(state % WORDS.len() as u64) as usize];
        out.extend_from_slice(word.as_bytes());

        words_in_line += 1;
        if words_in_line == 12 {
            out.extend_from_slice(b".\n");
            words_in_line = 0;
        } else {
            out.push(b' ');
        }
    }

    out.truncate(size);
    out
}
