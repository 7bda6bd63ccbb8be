use divan::counter::BytesCount;
use divan::Bencher;
use primbench_core::sizes::Family;
use primbench_core::{rand_bytes, ByteSize};
use primbench_crypto::aead::{
    AeadCipher, Aes128Gcm, Aes256Gcm, Aes256Siv, ChaCha20Poly1305, RingAes128Gcm, RingAes256Gcm,
    RingChaCha20Poly1305, XChaCha20Poly1305,
};
use primbench_crypto::AAD_SIZE;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

/// Headroom for the tag so the destination never reallocates
const DST_EXTRA: usize = 512;

fn sizes() -> Vec<ByteSize> {
    Family::Aead.sizes()
}

#[divan::bench(
    types = [
        ChaCha20Poly1305, XChaCha20Poly1305, Aes128Gcm, Aes256Gcm, Aes256Siv,
        RingAes128Gcm, RingAes256Gcm, RingChaCha20Poly1305,
    ],
    args = sizes(),
)]
fn encrypt<A: AeadCipher>(bencher: Bencher, size: ByteSize) {
    let cipher = A::new(&rand_bytes(A::KEY_LEN)).unwrap();
    let nonce = rand_bytes(A::NONCE_LEN);
    let aad = rand_bytes(AAD_SIZE);
    let plaintext = rand_bytes(size.bytes());
    bencher
        .counter(BytesCount::new(size.bytes()))
        .with_inputs(|| Vec::with_capacity(size.bytes() + DST_EXTRA))
        .bench_local_refs(|dst| {
            cipher
                .encrypt(dst, &nonce, divan::black_box(&plaintext), &aad)
                .unwrap()
        });
}

#[divan::bench(
    types = [
        ChaCha20Poly1305, XChaCha20Poly1305, Aes128Gcm, Aes256Gcm, Aes256Siv,
        RingAes128Gcm, RingAes256Gcm, RingChaCha20Poly1305,
    ],
    args = sizes(),
)]
fn decrypt<A: AeadCipher>(bencher: Bencher, size: ByteSize) {
    let cipher = A::new(&rand_bytes(A::KEY_LEN)).unwrap();
    let nonce = rand_bytes(A::NONCE_LEN);
    let aad = rand_bytes(AAD_SIZE);
    let mut ciphertext = Vec::with_capacity(size.bytes() + DST_EXTRA);
    cipher
        .encrypt(&mut ciphertext, &nonce, &rand_bytes(size.bytes()), &aad)
        .unwrap();
    bencher
        .counter(BytesCount::new(size.bytes()))
        .with_inputs(|| Vec::with_capacity(size.bytes() + DST_EXTRA))
        .bench_local_refs(|dst| {
            cipher
                .decrypt(dst, &nonce, divan::black_box(&ciphertext), &aad)
                .unwrap()
        });
}

fn main() {
    divan::main();
}
