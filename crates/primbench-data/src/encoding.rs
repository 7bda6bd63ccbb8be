//! Binary-to-text encodings
//!
//! `hex` and `base64` are the dedicated single-purpose crates; `data-encoding`
//! covers the same alphabets (plus base32) with one generic implementation, so
//! both are benchmarked side by side.

use base64::Engine as _;
use primbench_core::{BenchError, BenchResult};

/// A binary-to-text encoding under benchmark.
pub trait Encoder: Default {
    const NAME: &'static str;

    fn encode(&self, data: &[u8]) -> String;

    fn decode(&self, text: &str) -> BenchResult<Vec<u8>>;
}

fn decode_err(name: &str, e: impl std::fmt::Display) -> BenchError {
    BenchError::Decode(format!("{name}: {e}"))
}

/// Lowercase hex (`hex` crate)
#[derive(Debug, Default, Clone, Copy)]
pub struct Hex;

impl Encoder for Hex {
    const NAME: &'static str = "hex";

    fn encode(&self, data: &[u8]) -> String {
        hex::encode(data)
    }

    fn decode(&self, text: &str) -> BenchResult<Vec<u8>> {
        hex::decode(text).map_err(|e| decode_err(Self::NAME, e))
    }
}

/// Lowercase hex (`data-encoding`)
#[derive(Debug, Default, Clone, Copy)]
pub struct DataEncodingHex;

impl Encoder for DataEncodingHex {
    const NAME: &'static str = "data_encoding_hex";

    fn encode(&self, data: &[u8]) -> String {
        data_encoding::HEXLOWER.encode(data)
    }

    fn decode(&self, text: &str) -> BenchResult<Vec<u8>> {
        data_encoding::HEXLOWER
            .decode(text.as_bytes())
            .map_err(|e| decode_err(Self::NAME, e))
    }
}

/// Standard padded base64 (`base64` crate)
#[derive(Debug, Default, Clone, Copy)]
pub struct Base64;

impl Encoder for Base64 {
    const NAME: &'static str = "base64";

    fn encode(&self, data: &[u8]) -> String {
        base64::engine::general_purpose::STANDARD.encode(data)
    }

    fn decode(&self, text: &str) -> BenchResult<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(text)
            .map_err(|e| decode_err(Self::NAME, e))
    }
}

/// Standard padded base64 (`data-encoding`)
#[derive(Debug, Default, Clone, Copy)]
pub struct DataEncodingBase64;

impl Encoder for DataEncodingBase64 {
    const NAME: &'static str = "data_encoding_base64";

    fn encode(&self, data: &[u8]) -> String {
        data_encoding::BASE64.encode(data)
    }

    fn decode(&self, text: &str) -> BenchResult<Vec<u8>> {
        data_encoding::BASE64
            .decode(text.as_bytes())
            .map_err(|e| decode_err(Self::NAME, e))
    }
}

/// RFC 4648 base32 with padding
#[derive(Debug, Default, Clone, Copy)]
pub struct Base32;

impl Encoder for Base32 {
    const NAME: &'static str = "base32";

    fn encode(&self, data: &[u8]) -> String {
        data_encoding::BASE32.encode(data)
    }

    fn decode(&self, text: &str) -> BenchResult<Vec<u8>> {
        data_encoding::BASE32
            .decode(text.as_bytes())
            .map_err(|e| decode_err(Self::NAME, e))
    }
}

/// RFC 4648 base32 without padding
#[derive(Debug, Default, Clone, Copy)]
pub struct Base32NoPad;

impl Encoder for Base32NoPad {
    const NAME: &'static str = "base32_nopad";

    fn encode(&self, data: &[u8]) -> String {
        data_encoding::BASE32_NOPAD.encode(data)
    }

    fn decode(&self, text: &str) -> BenchResult<Vec<u8>> {
        data_encoding::BASE32_NOPAD
            .decode(text.as_bytes())
            .map_err(|e| decode_err(Self::NAME, e))
    }
}

/// Base58, Bitcoin alphabet. Quadratic in the input length.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base58;

impl Encoder for Base58 {
    const NAME: &'static str = "base58";

    fn encode(&self, data: &[u8]) -> String {
        bs58::encode(data).into_string()
    }

    fn decode(&self, text: &str) -> BenchResult<Vec<u8>> {
        bs58::decode(text)
            .into_vec()
            .map_err(|e| decode_err(Self::NAME, e))
    }
}

pub const ALGORITHMS: &[&str] = &[
    Hex::NAME,
    DataEncodingHex::NAME,
    Base64::NAME,
    DataEncodingBase64::NAME,
    Base32::NAME,
    Base32NoPad::NAME,
    Base58::NAME,
];
