use divan::counter::BytesCount;
use divan::Bencher;
use primbench_core::sizes::Family;
use primbench_core::ByteSize;
use primbench_data::chunking::{
    Chunker, FastCdc2016, FastCdc2020, FastCdc2020Blake3, FastCdc2020Stream, Ronomon,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn sizes() -> Vec<ByteSize> {
    Family::Chunking.sizes()
}

#[divan::bench(
    types = [FastCdc2016, FastCdc2020, Ronomon, FastCdc2020Stream, FastCdc2020Blake3],
    args = sizes(),
)]
fn chunk<C: Chunker>(bencher: Bencher, size: ByteSize) {
    let input = primbench_core::rand_bytes(size.bytes());
    let chunker = C::default();
    bencher
        .counter(BytesCount::new(size.bytes()))
        .bench_local(|| chunker.chunk(divan::black_box(&input)).unwrap());
}

fn main() {
    divan::main();
}
