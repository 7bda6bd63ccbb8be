//! primbench-data: adapters over checksum, chunking, compression and encoding crates
//!
//! # Overview
//! - `checksum`: CRC and xxHash families behind `Checksummer`
//! - `chunking`: FastCDC variants behind `Chunker`, with a fixed 64KiB average target
//! - `compression`: streaming zstd, gzip, lz4 and snappy behind `Compressor`
//! - `corpus`: the gzipped text/binary files the compression benches run over
//! - `encoding`: hex, base32, base58 and base64 behind `Encoder`
//!
//! Every adapter is a zero-sized `Default` type so a single generic divan bench
//! can be instantiated once per implementation.
//!
//! # Bench labels
//! divan labels each row with the adapter type, while `primbench list` prints
//! the adapter's `NAME`. The name is the type in snake_case with any const
//! level appended:
//! ```text
//! XxHash64            xxhash64
//! Xxh3_128            xxh3_128
//! Zstd<19>            zstd_19
//! Gzip<6>             gzip_6
//! FastCdc2020Blake3   fastcdc_2020_blake3
//! DataEncodingBase64  data_encoding_base64
//! Base32NoPad         base32_nopad
//! ```

pub mod checksum;
pub mod chunking;
pub mod compression;
pub mod corpus;
pub mod encoding;

pub use checksum::Checksummer;
pub use chunking::{ChunkSizes, ChunkStats, Chunker};
pub use compression::Compressor;
pub use corpus::CorpusFile;
pub use encoding::Encoder;
