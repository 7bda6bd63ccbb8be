//! Message authentication codes
//!
//! Every adapter computes its full tag, then copies as much of it as `out`
//! holds. Asking for more bytes than the tag has is an error.

use blake2::digest::consts::U32;
use poly1305::universal_hash::KeyInit as _;
use primbench_core::{BenchError, BenchResult};

/// A MAC under benchmark.
pub trait Mac: Default {
    const NAME: &'static str;
    /// Full tag length in bytes
    const OUTPUT_LEN: usize;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()>;
}

fn write_tag(tag: &[u8], out: &mut [u8]) -> BenchResult<()> {
    if out.len() > tag.len() {
        return Err(BenchError::invalid_length("mac output", tag.len(), out.len()));
    }
    let len = out.len();
    out.copy_from_slice(&tag[..len]);
    Ok(())
}

fn rejected_key(name: &str, len: usize) -> BenchError {
    BenchError::Crypto(format!("{name}: rejected {len}-byte key"))
}

/// Run any `digest::Mac` implementation (HMAC, keyed BLAKE2) over `input`.
fn digest_mac<M: hmac::Mac + hmac::digest::KeyInit>(
    name: &str,
    key: &[u8],
    input: &[u8],
    out: &mut [u8],
) -> BenchResult<()> {
    let mut mac = <M as hmac::Mac>::new_from_slice(key).map_err(|_| rejected_key(name, key.len()))?;
    mac.update(input);
    write_tag(&mac.finalize().into_bytes(), out)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HmacSha256;

impl Mac for HmacSha256 {
    const NAME: &'static str = "hmac_sha256";
    const OUTPUT_LEN: usize = 32;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        digest_mac::<hmac::Hmac<sha2::Sha256>>(Self::NAME, key, input, out)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HmacSha512;

impl Mac for HmacSha512 {
    const NAME: &'static str = "hmac_sha512";
    const OUTPUT_LEN: usize = 64;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        digest_mac::<hmac::Hmac<sha2::Sha512>>(Self::NAME, key, input, out)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HmacSha3_256;

impl Mac for HmacSha3_256 {
    const NAME: &'static str = "hmac_sha3_256";
    const OUTPUT_LEN: usize = 32;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        digest_mac::<hmac::Hmac<sha3::Sha3_256>>(Self::NAME, key, input, out)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HmacSha3_512;

impl Mac for HmacSha3_512 {
    const NAME: &'static str = "hmac_sha3_512";
    const OUTPUT_LEN: usize = 64;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        digest_mac::<hmac::Hmac<sha3::Sha3_512>>(Self::NAME, key, input, out)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RingHmacSha256;

impl Mac for RingHmacSha256 {
    const NAME: &'static str = "ring_hmac_sha256";
    const OUTPUT_LEN: usize = 32;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        let key = ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key);
        write_tag(ring::hmac::sign(&key, input).as_ref(), out)
    }
}

fn blake3_key(key: &[u8]) -> BenchResult<&[u8; 32]> {
    key.try_into()
        .map_err(|_| BenchError::invalid_length("blake3 key", 32, key.len()))
}

/// BLAKE3 keyed mode; the key must be exactly 32 bytes
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3_256;

impl Mac for Blake3_256 {
    const NAME: &'static str = "blake3_256";
    const OUTPUT_LEN: usize = 32;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        let tag = blake3::keyed_hash(blake3_key(key)?, input);
        write_tag(tag.as_bytes(), out)
    }
}

/// BLAKE3 keyed mode with 64 bytes of extended output
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3_512;

impl Mac for Blake3_512 {
    const NAME: &'static str = "blake3_512";
    const OUTPUT_LEN: usize = 64;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        let mut tag = [0u8; 64];
        let mut hasher = blake3::Hasher::new_keyed(blake3_key(key)?);
        hasher.update(input);
        hasher.finalize_xof().fill(&mut tag);
        write_tag(&tag, out)
    }
}

/// Keyed BLAKE2b (key up to 64 bytes), 32-byte tag
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake2b256;

impl Mac for Blake2b256 {
    const NAME: &'static str = "blake2b_256";
    const OUTPUT_LEN: usize = 32;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        digest_mac::<blake2::Blake2bMac<U32>>(Self::NAME, key, input, out)
    }
}

/// Keyed BLAKE2s (key up to 32 bytes), 32-byte tag
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake2s256;

impl Mac for Blake2s256 {
    const NAME: &'static str = "blake2s_256";
    const OUTPUT_LEN: usize = 32;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        digest_mac::<blake2::Blake2sMac<U32>>(Self::NAME, key, input, out)
    }
}

/// Poly1305 one-time authenticator keyed with the first 32 bytes of `key`
#[derive(Debug, Default, Clone, Copy)]
pub struct Poly1305;

impl Mac for Poly1305 {
    const NAME: &'static str = "poly1305";
    const OUTPUT_LEN: usize = 16;

    fn mac(&self, key: &[u8], input: &[u8], out: &mut [u8]) -> BenchResult<()> {
        let key = key
            .get(..32)
            .ok_or_else(|| BenchError::invalid_length("poly1305 key", 32, key.len()))?;
        let mac = poly1305::Poly1305::new_from_slice(key).map_err(|_| rejected_key(Self::NAME, key.len()))?;
        write_tag(&mac.compute_unpadded(input), out)
    }
}

pub const ALGORITHMS: &[&str] = &[
    HmacSha256::NAME,
    HmacSha512::NAME,
    HmacSha3_256::NAME,
    HmacSha3_512::NAME,
    RingHmacSha256::NAME,
    Blake3_256::NAME,
    Blake3_512::NAME,
    Blake2b256::NAME,
    Blake2s256::NAME,
    Poly1305::NAME,
];
