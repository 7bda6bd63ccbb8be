use divan::counter::BytesCount;
use divan::Bencher;
use primbench_core::sizes::Family;
use primbench_core::ByteSize;
use primbench_data::encoding::{
    Base32, Base32NoPad, Base58, Base64, DataEncodingBase64, DataEncodingHex, Encoder, Hex,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn sizes() -> Vec<ByteSize> {
    Family::Encoding.sizes()
}

#[divan::bench(
    types = [Hex, DataEncodingHex, Base64, DataEncodingBase64, Base32, Base32NoPad, Base58],
    args = sizes(),
)]
fn encode<E: Encoder>(bencher: Bencher, size: ByteSize) {
    let input = primbench_core::rand_bytes(size.bytes());
    let encoder = E::default();
    bencher
        .counter(BytesCount::new(size.bytes()))
        .bench_local(|| encoder.encode(divan::black_box(&input)));
}

#[divan::bench(
    types = [Hex, DataEncodingHex, Base64, DataEncodingBase64, Base32, Base32NoPad, Base58],
    args = sizes(),
)]
fn decode<E: Encoder>(bencher: Bencher, size: ByteSize) {
    let encoder = E::default();
    let text = encoder.encode(&primbench_core::rand_bytes(size.bytes()));
    bencher
        .counter(BytesCount::new(size.bytes()))
        .bench_local(|| encoder.decode(divan::black_box(&text)).unwrap());
}

fn main() {
    divan::main();
}
