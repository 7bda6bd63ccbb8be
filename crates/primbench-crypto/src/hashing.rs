//! Cryptographic hash functions
//!
//! Digests are returned by value so the benchmark loop cannot discard the work.
//! 256-bit and 512-bit outputs are listed separately; BLAKE3 is an XOF and
//! provides both.

use sha2::digest::Output as DigestOutput;
use sha2::Digest;

type Blake2b256Core = blake2::Blake2b<blake2::digest::consts::U32>;

/// A hash function under benchmark.
pub trait Hasher: Default {
    const NAME: &'static str;
    type Output: AsRef<[u8]>;

    fn hash(&self, input: &[u8]) -> Self::Output;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256;

impl Hasher for Sha256 {
    const NAME: &'static str = "sha256";
    type Output = DigestOutput<sha2::Sha256>;

    fn hash(&self, input: &[u8]) -> DigestOutput<sha2::Sha256> {
        sha2::Sha256::digest(input)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RingSha256;

impl Hasher for RingSha256 {
    const NAME: &'static str = "ring_sha256";
    type Output = ring::digest::Digest;

    fn hash(&self, input: &[u8]) -> ring::digest::Digest {
        ring::digest::digest(&ring::digest::SHA256, input)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3_256;

impl Hasher for Blake3_256 {
    const NAME: &'static str = "blake3_256";
    type Output = [u8; 32];

    fn hash(&self, input: &[u8]) -> [u8; 32] {
        *blake3::hash(input).as_bytes()
    }
}

/// BLAKE3 with `update_rayon`: splits large inputs across the rayon pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3_256Rayon;

impl Hasher for Blake3_256Rayon {
    const NAME: &'static str = "blake3_256_rayon";
    type Output = [u8; 32];

    fn hash(&self, input: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update_rayon(input);
        *hasher.finalize().as_bytes()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Blake2b256;

impl Hasher for Blake2b256 {
    const NAME: &'static str = "blake2b_256";
    type Output = DigestOutput<Blake2b256Core>;

    fn hash(&self, input: &[u8]) -> DigestOutput<Blake2b256Core> {
        Blake2b256Core::digest(input)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Blake2s256;

impl Hasher for Blake2s256 {
    const NAME: &'static str = "blake2s_256";
    type Output = DigestOutput<blake2::Blake2s256>;

    fn hash(&self, input: &[u8]) -> DigestOutput<blake2::Blake2s256> {
        blake2::Blake2s256::digest(input)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha3_256;

impl Hasher for Sha3_256 {
    const NAME: &'static str = "sha3_256";
    type Output = DigestOutput<sha3::Sha3_256>;

    fn hash(&self, input: &[u8]) -> DigestOutput<sha3::Sha3_256> {
        sha3::Sha3_256::digest(input)
    }
}

/// SHA-1, for reference only
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha1;

impl Hasher for Sha1 {
    const NAME: &'static str = "sha1";
    type Output = DigestOutput<sha1::Sha1>;

    fn hash(&self, input: &[u8]) -> DigestOutput<sha1::Sha1> {
        sha1::Sha1::digest(input)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha2_512;

impl Hasher for Sha2_512 {
    const NAME: &'static str = "sha2_512";
    type Output = DigestOutput<sha2::Sha512>;

    fn hash(&self, input: &[u8]) -> DigestOutput<sha2::Sha512> {
        sha2::Sha512::digest(input)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RingSha512;

impl Hasher for RingSha512 {
    const NAME: &'static str = "ring_sha512";
    type Output = ring::digest::Digest;

    fn hash(&self, input: &[u8]) -> ring::digest::Digest {
        ring::digest::digest(&ring::digest::SHA512, input)
    }
}

/// 64 bytes of BLAKE3 extended output
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3_512;

impl Hasher for Blake3_512 {
    const NAME: &'static str = "blake3_512";
    type Output = [u8; 64];

    fn hash(&self, input: &[u8]) -> [u8; 64] {
        let mut out = [0u8; 64];
        let mut hasher = blake3::Hasher::new();
        hasher.update(input);
        hasher.finalize_xof().fill(&mut out);
        out
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Blake2b512;

impl Hasher for Blake2b512 {
    const NAME: &'static str = "blake2b_512";
    type Output = DigestOutput<blake2::Blake2b512>;

    fn hash(&self, input: &[u8]) -> DigestOutput<blake2::Blake2b512> {
        blake2::Blake2b512::digest(input)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha3_512;

impl Hasher for Sha3_512 {
    const NAME: &'static str = "sha3_512";
    type Output = DigestOutput<sha3::Sha3_512>;

    fn hash(&self, input: &[u8]) -> DigestOutput<sha3::Sha3_512> {
        sha3::Sha3_512::digest(input)
    }
}

pub const ALGORITHMS_256: &[&str] = &[
    Sha256::NAME,
    RingSha256::NAME,
    Blake3_256::NAME,
    Blake3_256Rayon::NAME,
    Blake2b256::NAME,
    Blake2s256::NAME,
    Sha3_256::NAME,
    Sha1::NAME,
];

pub const ALGORITHMS_512: &[&str] = &[
    Sha2_512::NAME,
    RingSha512::NAME,
    Blake3_512::NAME,
    Blake2b512::NAME,
    Sha3_512::NAME,
];
