//! Unauthenticated encryption: stream ciphers and AES block modes
//!
//! These provide no integrity; they are benchmarked to show what the AEAD
//! constructions in `aead` pay for authentication. Output goes into a
//! caller-provided slice and the number of bytes written is returned.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{AsyncStreamCipher, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use primbench_core::{BenchError, BenchResult};
use zeroize::Zeroizing;

/// AES block size, and the IV length of every AES mode here
pub const AES_BLOCK: usize = 16;

/// An unauthenticated cipher under benchmark, holding one key.
pub trait Cipher: Sized {
    const NAME: &'static str;
    const KEY_LEN: usize;
    const IV_LEN: usize;

    fn new(key: &[u8]) -> BenchResult<Self>;

    /// Encrypt `plaintext` into the front of `dst`, returning the bytes written.
    fn encrypt(&self, dst: &mut [u8], iv: &[u8], plaintext: &[u8]) -> BenchResult<usize>;

    /// Decrypt `ciphertext` into the front of `dst`, returning the bytes written.
    fn decrypt(&self, dst: &mut [u8], iv: &[u8], ciphertext: &[u8]) -> BenchResult<usize>;
}

type Key = Zeroizing<[u8; 32]>;

fn load_key(key: &[u8]) -> BenchResult<Key> {
    let bytes: [u8; 32] = key
        .try_into()
        .map_err(|_| BenchError::invalid_length("key", 32, key.len()))?;
    Ok(Zeroizing::new(bytes))
}

fn output<'a>(dst: &'a mut [u8], len: usize) -> BenchResult<&'a mut [u8]> {
    let available = dst.len();
    dst.get_mut(..len)
        .ok_or_else(|| BenchError::invalid_length("destination", len, available))
}

/// Apply a keystream from `input` into `dst`. Encryption and decryption are the same operation.
fn apply_stream<C: KeyIvInit + StreamCipher>(
    key: &[u8],
    iv: &[u8],
    iv_len: usize,
    dst: &mut [u8],
    input: &[u8],
) -> BenchResult<usize> {
    BenchError::check_length("iv", iv_len, iv.len())?;
    let out = output(dst, input.len())?;
    let mut cipher = C::new_from_slices(key, iv)
        .map_err(|_| BenchError::invalid_length("iv", iv_len, iv.len()))?;
    cipher
        .apply_keystream_b2b(input, out)
        .map_err(|e| BenchError::Crypto(format!("keystream: {e}")))?;
    Ok(input.len())
}

macro_rules! stream_cipher {
    ($(#[$doc:meta])* $name:ident, $inner:ty, $label:literal, iv = $iv_len:expr) => {
        $(#[$doc])*
        pub struct $name {
            key: Key,
        }

        impl Cipher for $name {
            const NAME: &'static str = $label;
            const KEY_LEN: usize = 32;
            const IV_LEN: usize = $iv_len;

            fn new(key: &[u8]) -> BenchResult<Self> {
                Ok(Self { key: load_key(key)? })
            }

            fn encrypt(&self, dst: &mut [u8], iv: &[u8], plaintext: &[u8]) -> BenchResult<usize> {
                apply_stream::<$inner>(&self.key[..], iv, Self::IV_LEN, dst, plaintext)
            }

            fn decrypt(&self, dst: &mut [u8], iv: &[u8], ciphertext: &[u8]) -> BenchResult<usize> {
                apply_stream::<$inner>(&self.key[..], iv, Self::IV_LEN, dst, ciphertext)
            }
        }
    };
}

stream_cipher!(
    /// ChaCha20, IETF variant (96-bit nonce)
    ChaCha20,
    chacha20::ChaCha20,
    "chacha20",
    iv = 12
);
stream_cipher!(XChaCha20, chacha20::XChaCha20, "xchacha20", iv = 24);
stream_cipher!(
    /// XChaCha with 12 rounds instead of 20
    XChaCha12,
    chacha20::XChaCha12,
    "xchacha12",
    iv = 24
);
stream_cipher!(
    /// AES-256 in CTR mode with a 128-bit big-endian counter
    Aes256Ctr,
    ctr::Ctr128BE<Aes256>,
    "aes_256_ctr",
    iv = AES_BLOCK
);

/// AES-256-CBC with PKCS#7 padding: output is rounded up to the next full block
pub struct Aes256Cbc {
    key: Key,
}

impl Aes256Cbc {
    /// Ciphertext length for a plaintext of `len` bytes (always adds 1..=16 bytes of padding)
    pub fn padded_len(len: usize) -> usize {
        (len / AES_BLOCK + 1) * AES_BLOCK
    }
}

impl Cipher for Aes256Cbc {
    const NAME: &'static str = "aes_256_cbc";
    const KEY_LEN: usize = 32;
    const IV_LEN: usize = AES_BLOCK;

    fn new(key: &[u8]) -> BenchResult<Self> {
        Ok(Self { key: load_key(key)? })
    }

    fn encrypt(&self, dst: &mut [u8], iv: &[u8], plaintext: &[u8]) -> BenchResult<usize> {
        BenchError::check_length("iv", Self::IV_LEN, iv.len())?;
        let padded = Self::padded_len(plaintext.len());
        let out = output(dst, padded)?;
        let cipher = cbc::Encryptor::<Aes256>::new_from_slices(&self.key[..], iv)
            .map_err(|_| BenchError::invalid_length("iv", Self::IV_LEN, iv.len()))?;
        let written = cipher
            .encrypt_padded_b2b_mut::<Pkcs7>(plaintext, out)
            .map_err(|e| BenchError::Crypto(format!("cbc pad: {e}")))?;
        Ok(written.len())
    }

    fn decrypt(&self, dst: &mut [u8], iv: &[u8], ciphertext: &[u8]) -> BenchResult<usize> {
        BenchError::check_length("iv", Self::IV_LEN, iv.len())?;
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK != 0 {
            return Err(BenchError::Crypto(format!(
                "cbc ciphertext length {} is not a positive multiple of {AES_BLOCK}",
                ciphertext.len()
            )));
        }
        let out = output(dst, ciphertext.len())?;
        let cipher = cbc::Decryptor::<Aes256>::new_from_slices(&self.key[..], iv)
            .map_err(|_| BenchError::invalid_length("iv", Self::IV_LEN, iv.len()))?;
        let written = cipher
            .decrypt_padded_b2b_mut::<Pkcs7>(ciphertext, out)
            .map_err(|e| BenchError::Crypto(format!("cbc unpad: {e}")))?;
        Ok(written.len())
    }
}

/// AES-256 in full-block CFB mode; no padding, output length equals input length
pub struct Aes256Cfb {
    key: Key,
}

impl Cipher for Aes256Cfb {
    const NAME: &'static str = "aes_256_cfb";
    const KEY_LEN: usize = 32;
    const IV_LEN: usize = AES_BLOCK;

    fn new(key: &[u8]) -> BenchResult<Self> {
        Ok(Self { key: load_key(key)? })
    }

    fn encrypt(&self, dst: &mut [u8], iv: &[u8], plaintext: &[u8]) -> BenchResult<usize> {
        BenchError::check_length("iv", Self::IV_LEN, iv.len())?;
        let out = output(dst, plaintext.len())?;
        cfb_mode::Encryptor::<Aes256>::new_from_slices(&self.key[..], iv)
            .map_err(|_| BenchError::invalid_length("iv", Self::IV_LEN, iv.len()))?
            .encrypt_b2b(plaintext, out)
            .map_err(|e| BenchError::Crypto(format!("cfb: {e}")))?;
        Ok(plaintext.len())
    }

    fn decrypt(&self, dst: &mut [u8], iv: &[u8], ciphertext: &[u8]) -> BenchResult<usize> {
        BenchError::check_length("iv", Self::IV_LEN, iv.len())?;
        let out = output(dst, ciphertext.len())?;
        cfb_mode::Decryptor::<Aes256>::new_from_slices(&self.key[..], iv)
            .map_err(|_| BenchError::invalid_length("iv", Self::IV_LEN, iv.len()))?
            .decrypt_b2b(ciphertext, out)
            .map_err(|e| BenchError::Crypto(format!("cfb: {e}")))?;
        Ok(ciphertext.len())
    }
}

pub const ALGORITHMS: &[&str] = &[
    ChaCha20::NAME,
    XChaCha20::NAME,
    XChaCha12::NAME,
    Aes256Ctr::NAME,
    Aes256Cbc::NAME,
    Aes256Cfb::NAME,
];
