use divan::counter::BytesCount;
use divan::Bencher;
use primbench_core::sizes::Family;
use primbench_core::{rand_bytes, ByteSize};
use primbench_crypto::cipher::{Aes256Cbc, Aes256Cfb, Aes256Ctr, ChaCha20, Cipher, XChaCha12, XChaCha20};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

/// Room for CBC padding
const DST_EXTRA: usize = 64;

fn sizes() -> Vec<ByteSize> {
    Family::Cipher.sizes()
}

#[divan::bench(
    types = [ChaCha20, XChaCha20, XChaCha12, Aes256Ctr, Aes256Cbc, Aes256Cfb],
    args = sizes(),
)]
fn encrypt<C: Cipher>(bencher: Bencher, size: ByteSize) {
    let cipher = C::new(&rand_bytes(C::KEY_LEN)).unwrap();
    let iv = rand_bytes(C::IV_LEN);
    let plaintext = rand_bytes(size.bytes());
    bencher
        .counter(BytesCount::new(size.bytes()))
        .with_inputs(|| vec![0u8; size.bytes() + DST_EXTRA])
        .bench_local_refs(|dst| cipher.encrypt(dst, &iv, divan::black_box(&plaintext)).unwrap());
}

#[divan::bench(
    types = [ChaCha20, XChaCha20, XChaCha12, Aes256Ctr, Aes256Cbc, Aes256Cfb],
    args = sizes(),
)]
fn decrypt<C: Cipher>(bencher: Bencher, size: ByteSize) {
    let cipher = C::new(&rand_bytes(C::KEY_LEN)).unwrap();
    let iv = rand_bytes(C::IV_LEN);
    let mut ciphertext = vec![0u8; size.bytes() + DST_EXTRA];
    let n = cipher
        .encrypt(&mut ciphertext, &iv, &rand_bytes(size.bytes()))
        .unwrap();
    ciphertext.truncate(n);
    bencher
        .counter(BytesCount::new(size.bytes()))
        .with_inputs(|| vec![0u8; ciphertext.len()])
        .bench_local_refs(|dst| cipher.decrypt(dst, &iv, divan::black_box(&ciphertext)).unwrap());
}

fn main() {
    divan::main();
}
