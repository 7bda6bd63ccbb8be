//! Digital signatures: Ed25519 (dalek and ring) and ECDSA P-256 (ring)

use ed25519_dalek::{Signer as _, Verifier as _};
use primbench_core::{BenchError, BenchResult};
use ring::rand::SystemRandom;
use ring::signature::{self as ring_sig, KeyPair as _};
use zeroize::Zeroizing;

/// A signature scheme under benchmark, holding one key pair.
pub trait Signer: Sized {
    const NAME: &'static str;
    type Signature: AsRef<[u8]>;

    /// Fresh random key pair.
    fn generate() -> BenchResult<Self>;

    fn sign(&self, msg: &[u8]) -> BenchResult<Self::Signature>;

    /// `true` iff `sig` is a valid signature of `msg` under this key pair.
    fn verify(&self, msg: &[u8], sig: &[u8]) -> bool;
}

/// Ed25519 via `ed25519-dalek`
pub struct Ed25519 {
    signing: ed25519_dalek::SigningKey,
    verifying: ed25519_dalek::VerifyingKey,
}

impl Ed25519 {
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing = ed25519_dalek::SigningKey::from_bytes(seed);
        let verifying = signing.verifying_key();
        Self { signing, verifying }
    }
}

impl Signer for Ed25519 {
    const NAME: &'static str = "ed25519";
    type Signature = [u8; 64];

    fn generate() -> BenchResult<Self> {
        let seed = Zeroizing::new(primbench_core::rand_array::<32>());
        Ok(Self::from_seed(&seed))
    }

    fn sign(&self, msg: &[u8]) -> BenchResult<[u8; 64]> {
        Ok(self.signing.sign(msg).to_bytes())
    }

    fn verify(&self, msg: &[u8], sig: &[u8]) -> bool {
        match ed25519_dalek::Signature::from_slice(sig) {
            Ok(sig) => self.verifying.verify(msg, &sig).is_ok(),
            Err(_) => false,
        }
    }
}

/// Ed25519 via `ring`
pub struct RingEd25519 {
    pair: ring_sig::Ed25519KeyPair,
}

impl RingEd25519 {
    pub fn from_seed(seed: &[u8; 32]) -> BenchResult<Self> {
        let pair = ring_sig::Ed25519KeyPair::from_seed_unchecked(seed)
            .map_err(|e| BenchError::Crypto(format!("ring ed25519 seed: {e}")))?;
        Ok(Self { pair })
    }
}

impl Signer for RingEd25519 {
    const NAME: &'static str = "ring_ed25519";
    type Signature = ring_sig::Signature;

    fn generate() -> BenchResult<Self> {
        let seed = Zeroizing::new(primbench_core::rand_array::<32>());
        Self::from_seed(&seed)
    }

    fn sign(&self, msg: &[u8]) -> BenchResult<ring_sig::Signature> {
        Ok(self.pair.sign(msg))
    }

    fn verify(&self, msg: &[u8], sig: &[u8]) -> bool {
        ring_sig::UnparsedPublicKey::new(&ring_sig::ED25519, self.pair.public_key().as_ref())
            .verify(msg, sig)
            .is_ok()
    }
}

/// ECDSA over P-256 with SHA-256, fixed-length (r || s) signatures
pub struct RingEcdsaP256 {
    pair: ring_sig::EcdsaKeyPair,
    rng: SystemRandom,
}

impl Signer for RingEcdsaP256 {
    const NAME: &'static str = "ring_ecdsa_p256";
    type Signature = ring_sig::Signature;

    fn generate() -> BenchResult<Self> {
        let rng = SystemRandom::new();
        let alg = &ring_sig::ECDSA_P256_SHA256_FIXED_SIGNING;
        let pkcs8 = ring_sig::EcdsaKeyPair::generate_pkcs8(alg, &rng)
            .map_err(|e| BenchError::Crypto(format!("ecdsa p256 keygen: {e}")))?;
        let pair = ring_sig::EcdsaKeyPair::from_pkcs8(alg, pkcs8.as_ref(), &rng)
            .map_err(|e| BenchError::Crypto(format!("ecdsa p256 pkcs8: {e}")))?;
        Ok(Self { pair, rng })
    }

    fn sign(&self, msg: &[u8]) -> BenchResult<ring_sig::Signature> {
        self.pair
            .sign(&self.rng, msg)
            .map_err(|e| BenchError::Crypto(format!("ecdsa p256 sign: {e}")))
    }

    fn verify(&self, msg: &[u8], sig: &[u8]) -> bool {
        ring_sig::UnparsedPublicKey::new(
            &ring_sig::ECDSA_P256_SHA256_FIXED,
            self.pair.public_key().as_ref(),
        )
        .verify(msg, sig)
        .is_ok()
    }
}

pub const ALGORITHMS: &[&str] = &[Ed25519::NAME, RingEd25519::NAME, RingEcdsaP256::NAME];

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_and_verify<S: Signer>() {
        let signer = S::generate().unwrap();
        let msg = primbench_core::rand_bytes(1024);
        let sig = signer.sign(&msg).unwrap();

        assert!(signer.verify(&msg, sig.as_ref()), "{} must verify its own signature", S::NAME);

        let mut tampered = msg.clone();
        tampered[0] ^= 1;
        assert!(!signer.verify(&tampered, sig.as_ref()), "{} accepted a modified message", S::NAME);

        let mut bad_sig = sig.as_ref().to_vec();
        bad_sig[5] ^= 0x80;
        assert!(!signer.verify(&msg, &bad_sig));
        assert!(!signer.verify(&msg, &bad_sig[..10]), "truncated signature must not verify");
    }

    #[test]
    fn ed25519_roundtrip() {
        sign_and_verify::<Ed25519>();
    }

    #[test]
    fn ring_ed25519_roundtrip() {
        sign_and_verify::<RingEd25519>();
    }

    #[test]
    fn ring_ecdsa_p256_roundtrip() {
        sign_and_verify::<RingEcdsaP256>();
    }

    #[test]
    fn ed25519_implementations_agree() {
        // Ed25519 is deterministic: same seed, same message, same signature
        let seed = [42u8; 32];
        let dalek = Ed25519::from_seed(&seed);
        let ring = RingEd25519::from_seed(&seed).unwrap();
        let msg = b"cross-implementation check";

        let a = dalek.sign(msg).unwrap();
        let b = ring.sign(msg).unwrap();
        assert_eq!(&a[..], b.as_ref());
        assert!(dalek.verify(msg, b.as_ref()));
        assert!(ring.verify(msg, &a));
    }

    #[test]
    fn signature_lengths() {
        assert_eq!(Ed25519::generate().unwrap().sign(b"m").unwrap().len(), 64);
        assert_eq!(RingEcdsaP256::generate().unwrap().sign(b"m").unwrap().as_ref().len(), 64);
    }
}
