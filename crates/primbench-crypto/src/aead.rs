//! Authenticated encryption with associated data
//!
//! All adapters encrypt into a caller-owned `Vec<u8>` that is cleared and
//! reused, so the benchmark measures the cipher and not the allocator:
//! ```text
//! encrypt: dst = plaintext || tag      (AES-SIV: tag || plaintext)
//! decrypt: dst = plaintext, tag checked before returning
//! ```
//! A nonce of the wrong length is an error, never a panic.

use chacha20poly1305::aead::{AeadInPlace, KeyInit, Nonce};
use primbench_core::{BenchError, BenchResult};
use ring::aead::{Aad, LessSafeKey, UnboundKey};

/// Poly1305 and GCM tag size
pub const TAG_LEN: usize = 16;

/// An AEAD under benchmark, holding one key.
pub trait AeadCipher: Sized {
    const NAME: &'static str;
    const KEY_LEN: usize;
    const NONCE_LEN: usize;

    fn new(key: &[u8]) -> BenchResult<Self>;

    fn encrypt(&self, dst: &mut Vec<u8>, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> BenchResult<()>;

    fn decrypt(&self, dst: &mut Vec<u8>, nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> BenchResult<()>;
}

fn seal<A: AeadInPlace>(
    cipher: &A,
    name: &str,
    nonce_len: usize,
    dst: &mut Vec<u8>,
    nonce: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> BenchResult<()> {
    BenchError::check_length("nonce", nonce_len, nonce.len())?;
    dst.clear();
    dst.extend_from_slice(plaintext);
    cipher
        .encrypt_in_place(Nonce::<A>::from_slice(nonce), aad, dst)
        .map_err(|_| BenchError::Crypto(format!("{name}: encryption failed")))
}

fn open<A: AeadInPlace>(
    cipher: &A,
    name: &str,
    nonce_len: usize,
    dst: &mut Vec<u8>,
    nonce: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> BenchResult<()> {
    BenchError::check_length("nonce", nonce_len, nonce.len())?;
    dst.clear();
    dst.extend_from_slice(ciphertext);
    cipher
        .decrypt_in_place(Nonce::<A>::from_slice(nonce), aad, dst)
        .map_err(|_| {
            dst.clear();
            BenchError::Crypto(format!("{name}: authentication failed"))
        })
}

/// RustCrypto AEAD wrapper
macro_rules! rustcrypto_aead {
    ($(#[$doc:meta])* $name:ident, $inner:ty, $label:literal, key = $key_len:literal, nonce = $nonce_len:literal) => {
        $(#[$doc])*
        pub struct $name {
            cipher: $inner,
        }

        impl AeadCipher for $name {
            const NAME: &'static str = $label;
            const KEY_LEN: usize = $key_len;
            const NONCE_LEN: usize = $nonce_len;

            fn new(key: &[u8]) -> BenchResult<Self> {
                BenchError::check_length("key", Self::KEY_LEN, key.len())?;
                let cipher = <$inner as KeyInit>::new_from_slice(key)
                    .map_err(|_| BenchError::invalid_length("key", Self::KEY_LEN, key.len()))?;
                Ok(Self { cipher })
            }

            fn encrypt(&self, dst: &mut Vec<u8>, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> BenchResult<()> {
                seal(&self.cipher, Self::NAME, Self::NONCE_LEN, dst, nonce, plaintext, aad)
            }

            fn decrypt(&self, dst: &mut Vec<u8>, nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> BenchResult<()> {
                open(&self.cipher, Self::NAME, Self::NONCE_LEN, dst, nonce, ciphertext, aad)
            }
        }
    };
}

rustcrypto_aead!(ChaCha20Poly1305, chacha20poly1305::ChaCha20Poly1305, "chacha20_poly1305", key = 32, nonce = 12);
rustcrypto_aead!(
    /// 192-bit nonces: safe to pick at random
    XChaCha20Poly1305,
    chacha20poly1305::XChaCha20Poly1305,
    "xchacha20_poly1305",
    key = 32,
    nonce = 24
);
rustcrypto_aead!(Aes128Gcm, aes_gcm::Aes128Gcm, "aes_128_gcm", key = 16, nonce = 12);
rustcrypto_aead!(Aes256Gcm, aes_gcm::Aes256Gcm, "aes_256_gcm", key = 32, nonce = 12);
rustcrypto_aead!(
    /// Nonce-misuse-resistant; the 512-bit key is split into MAC and CTR halves
    Aes256Siv,
    aes_siv::Aes256SivAead,
    "aes_256_siv",
    key = 64,
    nonce = 16
);

/// ring AEAD wrapper (`LessSafeKey`: the caller supplies every nonce)
macro_rules! ring_aead {
    ($name:ident, $alg:expr, $label:literal, key = $key_len:literal) => {
        pub struct $name {
            key: LessSafeKey,
        }

        impl AeadCipher for $name {
            const NAME: &'static str = $label;
            const KEY_LEN: usize = $key_len;
            const NONCE_LEN: usize = ring::aead::NONCE_LEN;

            fn new(key: &[u8]) -> BenchResult<Self> {
                BenchError::check_length("key", Self::KEY_LEN, key.len())?;
                let key = UnboundKey::new($alg, key)
                    .map_err(|_| BenchError::invalid_length("key", Self::KEY_LEN, key.len()))?;
                Ok(Self {
                    key: LessSafeKey::new(key),
                })
            }

            fn encrypt(&self, dst: &mut Vec<u8>, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> BenchResult<()> {
                let nonce = ring_nonce(nonce)?;
                dst.clear();
                dst.extend_from_slice(plaintext);
                self.key
                    .seal_in_place_append_tag(nonce, Aad::from(aad), dst)
                    .map_err(|_| BenchError::Crypto(format!("{}: encryption failed", Self::NAME)))
            }

            fn decrypt(&self, dst: &mut Vec<u8>, nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> BenchResult<()> {
                let nonce = ring_nonce(nonce)?;
                dst.clear();
                dst.extend_from_slice(ciphertext);
                let len = match self.key.open_in_place(nonce, Aad::from(aad), dst) {
                    Ok(plaintext) => plaintext.len(),
                    Err(_) => {
                        dst.clear();
                        return Err(BenchError::Crypto(format!("{}: authentication failed", Self::NAME)));
                    }
                };
                dst.truncate(len);
                Ok(())
            }
        }
    };
}

fn ring_nonce(nonce: &[u8]) -> BenchResult<ring::aead::Nonce> {
    ring::aead::Nonce::try_assume_unique_for_key(nonce)
        .map_err(|_| BenchError::invalid_length("nonce", ring::aead::NONCE_LEN, nonce.len()))
}

ring_aead!(RingAes128Gcm, &ring::aead::AES_128_GCM, "ring_aes_128_gcm", key = 16);
ring_aead!(RingAes256Gcm, &ring::aead::AES_256_GCM, "ring_aes_256_gcm", key = 32);
ring_aead!(RingChaCha20Poly1305, &ring::aead::CHACHA20_POLY1305, "ring_chacha20_poly1305", key = 32);

pub const ALGORITHMS: &[&str] = &[
    ChaCha20Poly1305::NAME,
    XChaCha20Poly1305::NAME,
    Aes128Gcm::NAME,
    Aes256Gcm::NAME,
    Aes256Siv::NAME,
    RingAes128Gcm::NAME,
    RingAes256Gcm::NAME,
    RingChaCha20Poly1305::NAME,
];
