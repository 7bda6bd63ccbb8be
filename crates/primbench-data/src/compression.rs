//! Streaming compression adapters
//!
//! Every adapter copies from a reader to a writer through the library's
//! streaming API, single-threaded, so callers can reuse source and destination
//! buffers between runs.

use primbench_core::{BenchError, BenchResult};
use std::io::{self, Read, Write};

/// A compression codec under benchmark.
pub trait Compressor: Default {
    const NAME: &'static str;

    fn compress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()>;

    fn decompress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()>;
}

/// Compress a whole slice into a new buffer.
pub fn compress_to_vec<C: Compressor>(codec: &C, mut input: &[u8]) -> BenchResult<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() / 2 + 1024);
    codec.compress(&mut out, &mut input)?;
    Ok(out)
}

/// Decompress a whole slice into a new buffer.
pub fn decompress_to_vec<C: Compressor>(codec: &C, mut input: &[u8]) -> BenchResult<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() * 3);
    codec.decompress(&mut out, &mut input)?;
    Ok(out)
}

/// zstd at a fixed level
#[derive(Debug, Default, Clone, Copy)]
pub struct Zstd<const LEVEL: i32>;

impl<const LEVEL: i32> Compressor for Zstd<LEVEL> {
    const NAME: &'static str = match LEVEL {
        1 => "zstd_1",
        3 => "zstd_3",
        7 => "zstd_7",
        19 => "zstd_19",
        _ => "zstd",
    };

    fn compress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()> {
        zstd::stream::copy_encode(src, dst, LEVEL)?;
        Ok(())
    }

    fn decompress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()> {
        zstd::stream::copy_decode(src, dst)?;
        Ok(())
    }
}

/// gzip (flate2, miniz_oxide backend) at a fixed level
#[derive(Debug, Default, Clone, Copy)]
pub struct Gzip<const LEVEL: u32>;

impl<const LEVEL: u32> Compressor for Gzip<LEVEL> {
    const NAME: &'static str = match LEVEL {
        1 => "gzip_1",
        6 => "gzip_6",
        9 => "gzip_9",
        _ => "gzip",
    };

    fn compress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()> {
        let mut encoder = flate2::write::GzEncoder::new(dst, flate2::Compression::new(LEVEL));
        io::copy(src, &mut encoder)?;
        encoder.finish()?;
        Ok(())
    }

    fn decompress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()> {
        let mut decoder = flate2::read::GzDecoder::new(src);
        io::copy(&mut decoder, dst)?;
        Ok(())
    }
}

/// LZ4 frame format
#[derive(Debug, Default, Clone, Copy)]
pub struct Lz4;

impl Compressor for Lz4 {
    const NAME: &'static str = "lz4";

    fn compress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()> {
        let mut encoder = lz4_flex::frame::FrameEncoder::new(dst);
        io::copy(src, &mut encoder)?;
        encoder
            .finish()
            .map_err(|e| BenchError::Codec(format!("lz4 finish: {e}")))?;
        Ok(())
    }

    fn decompress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()> {
        let mut decoder = lz4_flex::frame::FrameDecoder::new(src);
        io::copy(&mut decoder, dst)?;
        Ok(())
    }
}

/// Snappy frame format
#[derive(Debug, Default, Clone, Copy)]
pub struct Snappy;

impl Compressor for Snappy {
    const NAME: &'static str = "snappy";

    fn compress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()> {
        let mut encoder = snap::write::FrameEncoder::new(dst);
        io::copy(src, &mut encoder)?;
        // The frame format has no trailer; flushing emits the last block.
        encoder.flush()?;
        Ok(())
    }

    fn decompress(&self, dst: &mut dyn Write, src: &mut dyn Read) -> BenchResult<()> {
        let mut decoder = snap::read::FrameDecoder::new(src);
        io::copy(&mut decoder, dst)?;
        Ok(())
    }
}

pub const ALGORITHMS: &[&str] = &[
    Zstd::<1>::NAME,
    Zstd::<3>::NAME,
    Zstd::<7>::NAME,
    Zstd::<19>::NAME,
    Gzip::<1>::NAME,
    Gzip::<6>::NAME,
    Gzip::<9>::NAME,
    Lz4::NAME,
    Snappy::NAME,
];
