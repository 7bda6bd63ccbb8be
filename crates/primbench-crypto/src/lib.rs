//! primbench-crypto: adapters over cryptographic primitive crates
//!
//! Each family defines one small trait and a zero-cost wrapper type per
//! implementation, so a single generic divan bench covers them all:
//! ```text
//! hashing     Hasher       sha2, sha3, blake2, blake3, sha1, ring
//! kdf         Kdf          hkdf, ring, blake3, chacha20, argon2
//! mac         Mac          hmac, ring, blake3, blake2, poly1305
//! signatures  Signer       ed25519-dalek, ring
//! aead        AeadCipher   chacha20poly1305, aes-gcm, aes-siv, ring
//! cipher      Cipher       chacha20, aes + ctr/cbc/cfb-mode
//! ```
//! RustCrypto and ring implementations of the same algorithm are checked
//! against each other in the unit tests.
//!
//! # Bench labels
//! divan labels each row with the adapter type, while `primbench list` prints
//! the adapter's `NAME`, its snake_case form. The KDF adapters drop the `Kdf`
//! suffix:
//! ```text
//! Blake3_256Rayon      blake3_256_rayon
//! RingHkdfSha256       ring_hkdf_sha256
//! Blake3Kdf            blake3
//! XChaCha20Kdf         xchacha20
//! Argon2idInteractive  argon2id_interactive
//! RingEcdsaP256        ring_ecdsa_p256
//! ```

pub mod aead;
pub mod cipher;
pub mod hashing;
pub mod kdf;
pub mod mac;
pub mod signatures;

pub use aead::AeadCipher;
pub use cipher::Cipher;
pub use hashing::Hasher;
pub use kdf::{Kdf, KdfParams};
pub use mac::Mac;
pub use signatures::Signer;

/// Size of every symmetric key the benches generate, unless an algorithm needs another
pub const KEY_SIZE: usize = 32;

/// Associated data length used by the AEAD benches
pub const AAD_SIZE: usize = 100;
