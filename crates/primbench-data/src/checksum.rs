//! Non-cryptographic checksums
//!
//! CRC variants come from `crc32fast` (IEEE, with hardware acceleration) and
//! `crc` (table-driven, any polynomial); xxHash variants from `xxhash-rust`.

use crc::{Crc, CRC_32_ISCSI, CRC_64_GO_ISO};
use std::fmt;

/// A checksum algorithm under benchmark.
pub trait Checksummer: Default {
    const NAME: &'static str;
    type Output: Copy + Eq + fmt::Debug;

    fn checksum(&self, input: &[u8]) -> Self::Output;
}

const CASTAGNOLI: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);
const ISO_64: Crc<u64> = Crc::<u64>::new(&CRC_64_GO_ISO);

/// CRC-32 (IEEE 802.3 polynomial)
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc32;

impl Checksummer for Crc32 {
    const NAME: &'static str = "crc32";
    type Output = u32;

    fn checksum(&self, input: &[u8]) -> u32 {
        crc32fast::hash(input)
    }
}

/// CRC-32C (Castagnoli polynomial)
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc32c;

impl Checksummer for Crc32c {
    const NAME: &'static str = "crc32c";
    type Output = u32;

    fn checksum(&self, input: &[u8]) -> u32 {
        CASTAGNOLI.checksum(input)
    }
}

/// CRC-64 with the ISO 3309 polynomial
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc64;

impl Checksummer for Crc64 {
    const NAME: &'static str = "crc64";
    type Output = u64;

    fn checksum(&self, input: &[u8]) -> u64 {
        ISO_64.checksum(input)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Xxh3;

impl Checksummer for Xxh3 {
    const NAME: &'static str = "xxh3";
    type Output = u64;

    fn checksum(&self, input: &[u8]) -> u64 {
        xxhash_rust::xxh3::xxh3_64(input)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Xxh3_128;

impl Checksummer for Xxh3_128 {
    const NAME: &'static str = "xxh3_128";
    type Output = u128;

    fn checksum(&self, input: &[u8]) -> u128 {
        xxhash_rust::xxh3::xxh3_128(input)
    }
}

/// XXH64 with seed 0
#[derive(Debug, Default, Clone, Copy)]
pub struct XxHash64;

impl Checksummer for XxHash64 {
    const NAME: &'static str = "xxhash64";
    type Output = u64;

    fn checksum(&self, input: &[u8]) -> u64 {
        xxhash_rust::xxh64::xxh64(input, 0)
    }
}

pub const ALGORITHMS: &[&str] = &[
    Crc32::NAME,
    Crc32c::NAME,
    Crc64::NAME,
    Xxh3::NAME,
    Xxh3_128::NAME,
    XxHash64::NAME,
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CHECK: &[u8] = b"123456789";

    #[test]
    fn crc_check_values() {
        assert_eq!(Crc32.checksum(CHECK), 0xCBF4_3926);
        assert_eq!(Crc32c.checksum(CHECK), 0xE306_9283);
        assert_eq!(Crc64.checksum(CHECK), 0xB909_56C7_75A4_1001);
    }

    #[test]
    fn xxhash_empty_input() {
        assert_eq!(XxHash64.checksum(b""), 0xEF46_DB37_51D8_E999);
        assert_eq!(Xxh3.checksum(b""), 0x2D06_8005_38D3_94C2);
    }

    #[test]
    fn crc32_matches_between_crates() {
        let ieee = Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
        let data = primbench_core::rand_bytes(4096);
        assert_eq!(Crc32.checksum(&data), ieee.checksum(&data));
    }

    #[test]
    fn names_are_unique() {
        let mut names = ALGORITHMS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALGORITHMS.len());
    }

    proptest! {
        #[test]
        fn single_bit_flip_changes_checksum(
            data in proptest::collection::vec(any::<u8>(), 1..=4096),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let mut flipped = data.clone();
            let i = index.index(flipped.len());
            flipped[i] ^= 1 << bit;

            prop_assert_ne!(Crc32.checksum(&data), Crc32.checksum(&flipped));
            prop_assert_ne!(Crc32c.checksum(&data), Crc32c.checksum(&flipped));
            prop_assert_ne!(Crc64.checksum(&data), Crc64.checksum(&flipped));
        }

        #[test]
        fn checksums_are_deterministic(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
            prop_assert_eq!(Xxh3.checksum(&data), Xxh3.checksum(&data));
            prop_assert_eq!(Xxh3_128.checksum(&data), Xxh3_128.checksum(&data));
            prop_assert_eq!(XxHash64.checksum(&data), XxHash64.checksum(&data));
        }
    }
}
