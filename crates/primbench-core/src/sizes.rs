//! Input size matrices and the `ByteSize` label type
//!
//! Every benchmark family runs over a fixed list of input sizes. The lists can
//! be capped at runtime with `PRIMBENCH_MAX_SIZE` (e.g. `100MiB`) or with
//! `[bench] max_size` in the config file, so a quick run does not have to
//! allocate gigabyte buffers. The environment variable wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::PrimbenchConfig;
use crate::error::BenchError;

pub const KIB: usize = 1024;
pub const MIB: usize = 1024 * KIB;
pub const GIB: usize = 1024 * MIB;

/// Environment variable capping every size matrix
pub const MAX_SIZE_ENV: &str = "PRIMBENCH_MAX_SIZE";

/// Checksum, chunking, MAC and AEAD inputs
pub const THROUGHPUT: &[usize] = &[64, KIB, 16 * KIB, 64 * KIB, MIB, 10 * MIB, 100 * MIB, GIB];

/// Hashing and unauthenticated cipher inputs
pub const HASHING: &[usize] = &[64, KIB, 16 * KIB, 64 * KIB, MIB, 10 * MIB, GIB];

/// Encoding inputs (base58 is quadratic, so these stay small)
pub const ENCODING: &[usize] = &[64, KIB, 64 * KIB, 100 * KIB];

/// KDF output lengths
pub const KDF_OUTPUT: &[usize] = &[32, 64, 128, 256];

/// Signed message lengths
pub const SIGNATURES: &[usize] = &[64, KIB, 64 * KIB, MIB, GIB];

/// Format a byte count with binary units: `64B`, `16KiB`, `10MiB`, `1GiB`.
pub fn bytes_count(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes}B");
    }

    let mut div = UNIT;
    let mut exp = 0usize;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    let prefix = b"KMGTPE"[exp] as char;
    format!("{:.0}{}iB", bytes as f64 / div as f64, prefix)
}

/// A byte size that displays as its `bytes_count` label.
///
/// Used as the divan argument type so benchmark rows read `1KiB` rather than
/// `1024`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ByteSize(pub usize);

impl ByteSize {
    pub const fn bytes(self) -> usize {
        self.0
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bytes_count(self.0 as u64))
    }
}

impl fmt::Debug for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<ByteSize> for String {
    fn from(size: ByteSize) -> Self {
        size.to_string()
    }
}

impl TryFrom<String> for ByteSize {
    type Error = BenchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for ByteSize {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (digits, unit) = s.split_at(split);

        let value: usize = digits
            .parse()
            .map_err(|_| BenchError::Config(format!("invalid size '{s}'")))?;

        let multiplier = match unit.trim().to_ascii_lowercase().as_str() {
            "" | "b" => 1,
            "k" | "kb" | "kib" => KIB,
            "m" | "mb" | "mib" => MIB,
            "g" | "gb" | "gib" => GIB,
            other => {
                return Err(BenchError::Config(format!(
                    "invalid size unit '{other}' in '{s}'"
                )))
            }
        };

        value
            .checked_mul(multiplier)
            .map(ByteSize)
            .ok_or_else(|| BenchError::Config(format!("size '{s}' overflows")))
    }
}

/// Upper bound applied to every matrix: `PRIMBENCH_MAX_SIZE` if set, else
/// `[bench] max_size` from the config file (default 1GiB).
pub fn max_size() -> ByteSize {
    let raw = std::env::var(MAX_SIZE_ENV).ok();
    resolve_max_size(raw.as_deref(), || PrimbenchConfig::load_default().bench.max_size)
}

/// Parse an override, falling back to `configured` when it is absent or invalid.
pub fn resolve_max_size(raw: Option<&str>, configured: impl FnOnce() -> ByteSize) -> ByteSize {
    let Some(raw) = raw else {
        return configured();
    };
    raw.parse().unwrap_or_else(|e: BenchError| {
        tracing::warn!(value = %raw, error = %e, "ignoring invalid {MAX_SIZE_ENV}");
        configured()
    })
}

/// Keep the sizes of `matrix` that do not exceed `max`.
pub fn capped(matrix: &[usize], max: ByteSize) -> Vec<ByteSize> {
    matrix
        .iter()
        .copied()
        .filter(|&size| size <= max.0)
        .map(ByteSize)
        .collect()
}

/// Benchmark families with a size matrix, in the order they are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Checksum,
    Chunking,
    Compression,
    Encoding,
    Hashing,
    Kdf,
    Mac,
    Signatures,
    Aead,
    Cipher,
}

impl Family {
    pub const ALL: [Family; 10] = [
        Family::Checksum,
        Family::Chunking,
        Family::Compression,
        Family::Encoding,
        Family::Hashing,
        Family::Kdf,
        Family::Mac,
        Family::Signatures,
        Family::Aead,
        Family::Cipher,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Family::Checksum => "checksum",
            Family::Chunking => "chunking",
            Family::Compression => "compression",
            Family::Encoding => "encoding",
            Family::Hashing => "hashing",
            Family::Kdf => "kdf",
            Family::Mac => "mac",
            Family::Signatures => "signatures",
            Family::Aead => "aead",
            Family::Cipher => "cipher",
        }
    }

    /// Raw matrix for this family. Compression runs over a file corpus instead.
    pub fn matrix(self) -> &'static [usize] {
        match self {
            Family::Checksum | Family::Chunking | Family::Mac | Family::Aead => THROUGHPUT,
            Family::Hashing | Family::Cipher => HASHING,
            Family::Encoding => ENCODING,
            Family::Kdf => KDF_OUTPUT,
            Family::Signatures => SIGNATURES,
            Family::Compression => &[],
        }
    }

    /// Matrix capped by `max_size()`. This is what the benches iterate.
    pub fn sizes(self) -> Vec<ByteSize> {
        capped(self.matrix(), max_size())
    }
}
