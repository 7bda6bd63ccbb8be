use divan::counter::BytesCount;
use divan::Bencher;
use primbench_data::compression::{compress_to_vec, Compressor, Gzip, Lz4, Snappy, Zstd};
use primbench_data::corpus::{self, CorpusFile};
use std::io::Cursor;
use std::sync::OnceLock;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

/// Loaded once per process; files come from `PRIMBENCH_TESTDATA`.
fn corpus() -> &'static [CorpusFile] {
    static CORPUS: OnceLock<Vec<CorpusFile>> = OnceLock::new();
    CORPUS.get_or_init(|| corpus::load(&corpus::testdata_dir()))
}

#[divan::bench(
    types = [Zstd<1>, Zstd<3>, Zstd<7>, Zstd<19>, Gzip<1>, Gzip<6>, Gzip<9>, Lz4, Snappy],
    args = corpus(),
)]
fn compress<C: Compressor>(bencher: Bencher, file: &CorpusFile) {
    let codec = C::default();
    let len = file.data.len();
    bencher
        .counter(BytesCount::new(len))
        .with_inputs(|| (Cursor::new(file.data.as_slice()), Vec::with_capacity(len * 2)))
        .bench_local_refs(|(src, dst)| codec.compress(dst, src).unwrap());
}

#[divan::bench(
    types = [Zstd<1>, Zstd<3>, Zstd<7>, Zstd<19>, Gzip<1>, Gzip<6>, Gzip<9>, Lz4, Snappy],
    args = corpus(),
)]
fn decompress<C: Compressor>(bencher: Bencher, file: &CorpusFile) {
    let codec = C::default();
    let len = file.data.len();
    let packed = compress_to_vec(&codec, &file.data).unwrap();
    bencher
        .counter(BytesCount::new(len))
        .with_inputs(|| (Cursor::new(packed.as_slice()), Vec::with_capacity(len)))
        .bench_local_refs(|(src, dst)| codec.decompress(dst, src).unwrap());
}

fn main() {
    divan::main();
}
