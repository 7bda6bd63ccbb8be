//! FastCDC content-defined chunking
//!
//! Splits input into variable-size chunks whose boundaries depend on content,
//! so inserting bytes near the start of a buffer does not move every later
//! boundary. All adapters here are variants shipped by the `fastcdc` crate and
//! run with the same size targets so their throughput is comparable:
//!   - min 16KiB, avg 64KiB, max 256KiB
//!
//! `fastcdc_2020_blake3` adds the usual next step of a dedup pipeline: every
//! chunk is BLAKE3-hashed, in parallel with rayon.

use primbench_core::{BenchError, BenchResult};
use rayon::prelude::*;
use std::io::Cursor;

/// Chunk size configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSizes {
    pub min_size: u32,
    pub avg_size: u32,
    pub max_size: u32,
}

impl ChunkSizes {
    pub const DEFAULT: ChunkSizes = ChunkSizes {
        min_size: 16 * 1024,  // 16KiB
        avg_size: 64 * 1024,  // 64KiB
        max_size: 256 * 1024, // 256KiB
    };
}

impl Default for ChunkSizes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What a chunking pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkStats {
    /// Number of chunks
    pub count: usize,
    /// Total bytes covered by the chunks
    pub bytes: usize,
}

impl ChunkStats {
    fn push(&mut self, length: usize) {
        self.count += 1;
        self.bytes += length;
    }
}

/// A chunking algorithm under benchmark.
pub trait Chunker: Default {
    const NAME: &'static str;

    fn chunk(&self, input: &[u8]) -> BenchResult<ChunkStats>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FastCdc2016 {
    pub sizes: ChunkSizes,
}

impl Chunker for FastCdc2016 {
    const NAME: &'static str = "fastcdc_2016";

    fn chunk(&self, input: &[u8]) -> BenchResult<ChunkStats> {
        let s = self.sizes;
        let mut stats = ChunkStats::default();
        for c in fastcdc::v2016::FastCDC::new(input, s.min_size, s.avg_size, s.max_size) {
            stats.push(c.length);
        }
        Ok(stats)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FastCdc2020 {
    pub sizes: ChunkSizes,
}

impl Chunker for FastCdc2020 {
    const NAME: &'static str = "fastcdc_2020";

    fn chunk(&self, input: &[u8]) -> BenchResult<ChunkStats> {
        let s = self.sizes;
        let mut stats = ChunkStats::default();
        for c in fastcdc::v2020::FastCDC::new(input, s.min_size, s.avg_size, s.max_size) {
            stats.push(c.length);
        }
        Ok(stats)
    }
}

/// FastCDC as ported from the ronomon JavaScript library (`fastcdc::ronomon`)
#[derive(Debug, Default, Clone, Copy)]
pub struct Ronomon {
    pub sizes: ChunkSizes,
}

impl Chunker for Ronomon {
    const NAME: &'static str = "ronomon";

    fn chunk(&self, input: &[u8]) -> BenchResult<ChunkStats> {
        let s = self.sizes;
        let mut stats = ChunkStats::default();
        let chunker = fastcdc::ronomon::FastCDC::new(
            input,
            s.min_size as usize,
            s.avg_size as usize,
            s.max_size as usize,
        );
        for c in chunker {
            stats.push(c.length);
        }
        Ok(stats)
    }
}

/// FastCDC 2020 over a reader, copying every chunk into an owned buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastCdc2020Stream {
    pub sizes: ChunkSizes,
}

impl Chunker for FastCdc2020Stream {
    const NAME: &'static str = "fastcdc_2020_stream";

    fn chunk(&self, input: &[u8]) -> BenchResult<ChunkStats> {
        let s = self.sizes;
        let mut stats = ChunkStats::default();
        let chunker =
            fastcdc::v2020::StreamCDC::new(Cursor::new(input), s.min_size, s.avg_size, s.max_size);
        for result in chunker {
            let c = result.map_err(|e| BenchError::Codec(format!("stream chunking: {e}")))?;
            stats.push(c.data.len());
        }
        Ok(stats)
    }
}

/// FastCDC 2020 followed by a parallel BLAKE3 hash of every chunk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastCdc2020Blake3 {
    pub sizes: ChunkSizes,
}

impl FastCdc2020Blake3 {
    /// Chunk `input` and return each chunk's length and BLAKE3 hash, in order.
    pub fn chunk_hashes(&self, input: &[u8]) -> Vec<(usize, blake3::Hash)> {
        let s = self.sizes;
        let chunks: Vec<_> =
            fastcdc::v2020::FastCDC::new(input, s.min_size, s.avg_size, s.max_size).collect();

        chunks
            .par_iter()
            .map(|c| (c.length, blake3::hash(&input[c.offset..c.offset + c.length])))
            .collect()
    }
}

impl Chunker for FastCdc2020Blake3 {
    const NAME: &'static str = "fastcdc_2020_blake3";

    fn chunk(&self, input: &[u8]) -> BenchResult<ChunkStats> {
        let hashed = std::hint::black_box(self.chunk_hashes(input));
        Ok(ChunkStats {
            count: hashed.len(),
            bytes: hashed.iter().map(|(len, _)| len).sum(),
        })
    }
}

pub const ALGORITHMS: &[&str] = &[
    FastCdc2016::NAME,
    FastCdc2020::NAME,
    Ronomon::NAME,
    FastCdc2020Stream::NAME,
    FastCdc2020Blake3::NAME,
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SMALL: ChunkSizes = ChunkSizes {
        min_size: 2 * 1024,
        avg_size: 4 * 1024,
        max_size: 16 * 1024,
    };

    fn all_stats(data: &[u8], sizes: ChunkSizes) -> [ChunkStats; 5] {
        [
            FastCdc2016 { sizes }.chunk(data).unwrap(),
            FastCdc2020 { sizes }.chunk(data).unwrap(),
            Ronomon { sizes }.chunk(data).unwrap(),
            FastCdc2020Stream { sizes }.chunk(data).unwrap(),
            FastCdc2020Blake3 { sizes }.chunk(data).unwrap(),
        ]
    }

    #[test]
    fn empty_data_yields_no_chunks() {
        for stats in all_stats(&[], ChunkSizes::DEFAULT) {
            assert_eq!(stats, ChunkStats::default());
        }
    }

    #[test]
    fn chunks_cover_random_megabyte() {
        let data = primbench_core::rand_bytes(1024 * 1024);
        for stats in all_stats(&data, ChunkSizes::DEFAULT) {
            assert_eq!(stats.bytes, data.len());
            // 1MiB at 256KiB max needs at least 4 chunks
            assert!(stats.count >= 4, "got {} chunks", stats.count);
        }
    }

    #[test]
    fn stream_matches_in_memory() {
        let data: Vec<u8> = (0u8..=255).cycle().take(512 * 1024).collect();
        let in_memory = FastCdc2020::default().chunk(&data).unwrap();
        let streamed = FastCdc2020Stream::default().chunk(&data).unwrap();
        assert_eq!(in_memory, streamed);
    }

    #[test]
    fn chunk_hashes_follow_chunk_order() {
        let data = primbench_core::rand_bytes(300 * 1024);
        let chunker = FastCdc2020Blake3 { sizes: SMALL };
        let hashes = chunker.chunk_hashes(&data);

        let s = SMALL;
        let expected: Vec<_> = fastcdc::v2020::FastCDC::new(&data, s.min_size, s.avg_size, s.max_size)
            .map(|c| (c.length, blake3::hash(&data[c.offset..c.offset + c.length])))
            .collect();
        assert_eq!(hashes, expected);

        let stats = chunker.chunk(&data).unwrap();
        assert_eq!(stats.count, hashes.len());
        assert_eq!(stats.bytes, data.len());
        assert_eq!(stats, FastCdc2020 { sizes: SMALL }.chunk(&data).unwrap());
    }

    proptest! {
        /// Same input, same boundaries
        #[test]
        fn chunking_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..=32768)) {
            prop_assert_eq!(all_stats(&data, SMALL), all_stats(&data, SMALL));
        }

        /// Chunks must cover the full input without gaps or overlap
        #[test]
        fn chunks_cover_full_input(data in proptest::collection::vec(any::<u8>(), 1..=65536)) {
            for stats in all_stats(&data, SMALL) {
                prop_assert_eq!(stats.bytes, data.len(), "chunks must cover full input");
                prop_assert!(stats.count >= 1);
                prop_assert!(stats.count * SMALL.max_size as usize >= data.len());
            }
        }
    }
}
