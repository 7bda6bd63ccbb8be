//! Key derivation: secret + info -> output key material of any length
//!
//! The benchmark feeds a 32-byte secret and a 24-byte `info` string and asks
//! for 32 to 256 bytes of output, so every adapter takes the output buffer
//! from the caller.

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20::cipher::{KeyIvInit, StreamCipher};
use primbench_core::{BenchError, BenchResult};

/// Context string for BLAKE3 derive-key mode
pub const BLAKE3_CONTEXT: &str = "primbench 2024-01-01 kdf benchmark derived key";

/// A key derivation function under benchmark.
pub trait Kdf: Default {
    const NAME: &'static str;

    /// Fill `out` with key material derived from `secret` and `info`.
    fn derive_key(&self, secret: &[u8], info: &[u8], out: &mut [u8]) -> BenchResult<()>;
}

/// HKDF-SHA256 with no salt, `info` as the HKDF info
#[derive(Debug, Default, Clone, Copy)]
pub struct HkdfSha256;

impl Kdf for HkdfSha256 {
    const NAME: &'static str = "hkdf_sha256";

    fn derive_key(&self, secret: &[u8], info: &[u8], out: &mut [u8]) -> BenchResult<()> {
        hkdf::Hkdf::<sha2::Sha256>::new(None, secret)
            .expand(info, out)
            .map_err(|e| BenchError::Crypto(format!("hkdf-sha256 expand {} bytes: {e}", out.len())))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HkdfSha512;

impl Kdf for HkdfSha512 {
    const NAME: &'static str = "hkdf_sha512";

    fn derive_key(&self, secret: &[u8], info: &[u8], out: &mut [u8]) -> BenchResult<()> {
        hkdf::Hkdf::<sha2::Sha512>::new(None, secret)
            .expand(info, out)
            .map_err(|e| BenchError::Crypto(format!("hkdf-sha512 expand {} bytes: {e}", out.len())))
    }
}

/// Output length adapter for ring's typed HKDF API
struct OutputLen(usize);

impl ring::hkdf::KeyType for OutputLen {
    fn len(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RingHkdfSha256;

impl Kdf for RingHkdfSha256 {
    const NAME: &'static str = "ring_hkdf_sha256";

    fn derive_key(&self, secret: &[u8], info: &[u8], out: &mut [u8]) -> BenchResult<()> {
        let prk = ring::hkdf::Salt::new(ring::hkdf::HKDF_SHA256, &[]).extract(secret);
        let info = [info];
        let okm = prk
            .expand(&info, OutputLen(out.len()))
            .map_err(|_| BenchError::Crypto(format!("ring hkdf expand {} bytes", out.len())))?;
        okm.fill(out)
            .map_err(|_| BenchError::Crypto("ring hkdf fill".into()))
    }
}

/// BLAKE3 derive-key mode over `secret || info`
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3Kdf;

impl Kdf for Blake3Kdf {
    const NAME: &'static str = "blake3";

    fn derive_key(&self, secret: &[u8], info: &[u8], out: &mut [u8]) -> BenchResult<()> {
        let mut hasher = blake3::Hasher::new_derive_key(BLAKE3_CONTEXT);
        hasher.update(secret);
        hasher.update(info);
        hasher.finalize_xof().fill(out);
        Ok(())
    }
}

/// XChaCha20 keystream: key = secret (32 bytes), nonce = info (24 bytes)
#[derive(Debug, Default, Clone, Copy)]
pub struct XChaCha20Kdf;

impl Kdf for XChaCha20Kdf {
    const NAME: &'static str = "xchacha20";

    fn derive_key(&self, secret: &[u8], info: &[u8], out: &mut [u8]) -> BenchResult<()> {
        BenchError::check_length("xchacha20 key", 32, secret.len())?;
        BenchError::check_length("xchacha20 nonce", 24, info.len())?;

        let mut cipher = chacha20::XChaCha20::new(secret.into(), info.into());
        out.fill(0);
        cipher.apply_keystream(out);
        Ok(())
    }
}

/// Argon2id parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub mem_cost_kib: u32,
    /// Time cost / iterations (default: 3)
    pub time_cost: u32,
    /// Parallelism (default: 4)
    pub parallelism: u32,
}

impl KdfParams {
    /// Cheap enough to sit next to HKDF in one benchmark table
    pub const LIGHT: KdfParams = KdfParams {
        mem_cost_kib: 1024,
        time_cost: 1,
        parallelism: 1,
    };

    fn derive(&self, secret: &[u8], salt: &[u8], out: &mut [u8]) -> BenchResult<()> {
        let params = Params::new(self.mem_cost_kib, self.time_cost, self.parallelism, None)
            .map_err(|e| BenchError::Crypto(format!("invalid Argon2id params: {e}")))?;

        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(secret, salt, out)
            .map_err(|e| BenchError::Crypto(format!("Argon2id KDF failed: {e}")))
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            mem_cost_kib: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

/// Argon2id with `secret` as the password and `info` as the salt
#[derive(Debug, Clone, Copy)]
pub struct Argon2id {
    pub params: KdfParams,
}

impl Default for Argon2id {
    fn default() -> Self {
        Self {
            params: KdfParams::LIGHT,
        }
    }
}

impl Kdf for Argon2id {
    const NAME: &'static str = "argon2id";

    fn derive_key(&self, secret: &[u8], info: &[u8], out: &mut [u8]) -> BenchResult<()> {
        self.params.derive(secret, info, out)
    }
}

/// Argon2id at the interactive login cost (`KdfParams::default()`)
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2idInteractive;

impl Kdf for Argon2idInteractive {
    const NAME: &'static str = "argon2id_interactive";

    fn derive_key(&self, secret: &[u8], info: &[u8], out: &mut [u8]) -> BenchResult<()> {
        KdfParams::default().derive(secret, info, out)
    }
}

pub const ALGORITHMS: &[&str] = &[
    HkdfSha256::NAME,
    HkdfSha512::NAME,
    RingHkdfSha256::NAME,
    Blake3Kdf::NAME,
    XChaCha20Kdf::NAME,
    Argon2id::NAME,
    Argon2idInteractive::NAME,
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: [u8; 32] = [7u8; 32];
    const INFO: [u8; 24] = [9u8; 24];

    fn derive<K: Kdf>(len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        K::default().derive_key(&SECRET, &INFO, &mut out).unwrap();
        out
    }

    #[test]
    fn test_kdf_deterministic() {
        assert_eq!(derive::<HkdfSha256>(64), derive::<HkdfSha256>(64));
        assert_eq!(derive::<Blake3Kdf>(64), derive::<Blake3Kdf>(64));
        assert_eq!(derive::<XChaCha20Kdf>(64), derive::<XChaCha20Kdf>(64));
        assert_eq!(derive::<Argon2id>(32), derive::<Argon2id>(32), "KDF must be deterministic");
    }

    #[test]
    fn test_argon2id_interactive_uses_default_params() {
        let interactive = derive::<Argon2idInteractive>(32);
        assert_eq!(interactive, derive::<Argon2idInteractive>(32));
        assert_ne!(interactive, derive::<Argon2id>(32));

        let mut explicit = [0u8; 32];
        Argon2id {
            params: KdfParams::default(),
        }
        .derive_key(&SECRET, &INFO, &mut explicit)
        .unwrap();
        assert_eq!(interactive, explicit);
        assert_eq!(KdfParams::default().mem_cost_kib, 64 * 1024);
    }

    #[test]
    fn test_ring_matches_rustcrypto_hkdf() {
        for len in [32, 64, 128, 256] {
            assert_eq!(derive::<RingHkdfSha256>(len), derive::<HkdfSha256>(len));
        }
    }

    #[test]
    fn test_hkdf_rfc5869_case3() {
        // RFC 5869 A.3: no salt, no info
        let ikm = [0x0bu8; 22];
        let mut okm = [0u8; 42];
        HkdfSha256.derive_key(&ikm, &[], &mut okm).unwrap();
        assert_eq!(
            hex::encode(okm),
            "8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d\
             9d201395faa4b61a96c8"
        );
    }

    #[test]
    fn test_kdf_different_info() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        Blake3Kdf.derive_key(&SECRET, b"info-a", &mut a).unwrap();
        Blake3Kdf.derive_key(&SECRET, b"info-b", &mut b).unwrap();
        assert_ne!(a, b, "different info must produce different keys");
    }

    #[test]
    fn test_hkdf_output_too_long() {
        // 255 * hash length is the HKDF ceiling
        let mut out = vec![0u8; 255 * 32 + 1];
        assert!(HkdfSha256.derive_key(&SECRET, &INFO, &mut out).is_err());
        assert!(RingHkdfSha256.derive_key(&SECRET, &INFO, &mut out).is_err());
    }

    #[test]
    fn test_xchacha20_rejects_wrong_lengths() {
        let mut out = [0u8; 32];
        assert!(matches!(
            XChaCha20Kdf.derive_key(&SECRET[..16], &INFO, &mut out),
            Err(BenchError::InvalidLength { expected: 32, actual: 16, .. })
        ));
        assert!(matches!(
            XChaCha20Kdf.derive_key(&SECRET, &INFO[..12], &mut out),
            Err(BenchError::InvalidLength { expected: 24, actual: 12, .. })
        ));
    }

    #[test]
    fn test_argon2_rejects_short_salt() {
        let mut out = [0u8; 32];
        assert!(Argon2id::default().derive_key(&SECRET, b"short", &mut out).is_err());
    }

    proptest! {
        /// BLAKE3 XOF output is prefix-stable: a shorter request is a prefix of a longer one
        #[test]
        fn blake3_output_is_prefix_stable(len in 1usize..=256) {
            let full = derive::<Blake3Kdf>(256);
            let short = derive::<Blake3Kdf>(len);
            prop_assert_eq!(&short[..], &full[..len]);
        }
    }
}
