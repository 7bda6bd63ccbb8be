//! primbench-core: pieces shared by every benchmark family
//!
//! - `error`: the adapter error type
//! - `config`: `primbench.toml` schema
//! - `sizes`: input size matrices and the `ByteSize` label type
//! - `system`: host description printed alongside results

pub mod config;
pub mod error;
pub mod sizes;
pub mod system;

pub use error::{BenchError, BenchResult};
pub use sizes::{bytes_count, ByteSize};

use rand::RngCore;

/// Fill a fresh buffer of `n` bytes from the thread-local CSPRNG.
///
/// Benchmarks generate their inputs with this before timing starts.
pub fn rand_bytes(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

/// Fixed-size random array, for keys and nonces.
pub fn rand_array<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}
