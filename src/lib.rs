// Copyright (c) 2024 Botho Foundation

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

//! ML-KEM (FIPS 203) key-encapsulation mechanism for Botho.
//!
//! This crate implements the ML-KEM post-quantum key-encapsulation
//! mechanism (formerly CRYSTALS-Kyber) across its three standardized
//! parameter sets:
//!
//! - **K2** (ML-KEM-512)
//! - **K3** (ML-KEM-768)
//! - **K4** (ML-KEM-1024)
//!
//! The core is an IND-CPA public-key scheme over the ring
//! `R_q = Z_q[X]/(X^256+1)`, `q = 3329`, compiled into an IND-CCA2 KEM via a
//! Fujisaki-Okamoto-style transform with constant-time implicit rejection:
//! decapsulation never signals failure on a malformed ciphertext, it instead
//! returns a pseudo-random-but-deterministic key derived from the secret
//! key's rejection seed.
//!
//! # Example
//!
//! ```rust,no_run
//! use bth_crypto_kyber::{kem::KeyPair, params::Algorithm};
//! use rand::rngs::OsRng;
//!
//! let keypair = KeyPair::generate(Algorithm::K3, &mut OsRng).expect("keygen");
//! let (ciphertext, sender_secret) = keypair.encapsulate(&mut OsRng).expect("encapsulate");
//! let receiver_secret = keypair.decapsulate(&ciphertext).expect("decapsulate");
//! assert_eq!(sender_secret.as_bytes(), receiver_secret.as_bytes());
//! ```
//!
//! # Security parameters
//!
//! | Param | k | η₁ | η₂ | pk bytes | sk bytes | ct bytes |
//! |-------|---|----|----|---------:|---------:|---------:|
//! | K2    | 2 | 3  | 2  | 800      | 1632     | 768      |
//! | K3    | 3 | 2  | 2  | 1184     | 2400     | 1088     |
//! | K4    | 4 | 2  | 2  | 1568     | 3168     | 1568     |
//!
//! Shared secrets are always 32 bytes.
//!
//! # Scope
//!
//! This crate implements the algorithmic core only: S-expression key
//! parsing, FIPS-mode gating, and high-level algorithm negotiation belong to
//! a calling layer, not here. There is no side-channel hardening beyond
//! timing/cache constant-time discipline (no power/EM countermeasures), no
//! on-disk key format beyond the raw byte layouts above, no hybrid KEM
//! negotiation, and no streaming API.

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod ct;
pub mod error;
pub mod indcpa;
pub mod kem;
pub mod params;
pub mod poly;
pub mod polyvec;
pub mod reduce;
pub mod symmetric;

pub use error::{Error, Result};
pub use kem::{Ciphertext, KeyPair, PublicKey, SecretKey, SharedSecret};
pub use params::Algorithm;

use rand_core::CryptoRngCore;

/// `keypair(algo, out pk[pkLen], out sk[skLen])`, the dispatcher-facing entry
/// point from §6: `pk`/`sk` must be exactly `algo.public_key_bytes()` /
/// `algo.secret_key_bytes()` long or [`Error::InvalidLength`] is returned.
pub fn keypair(
    algo: Algorithm,
    rng: &mut dyn CryptoRngCore,
    pk: &mut [u8],
    sk: &mut [u8],
) -> Result<()> {
    kem::keypair(algo, rng, pk, sk)
}

/// `encapsulate(algo, in pk[pkLen], out ct[ctLen], out ss[32])`.
pub fn encapsulate(
    algo: Algorithm,
    pk: &[u8],
    rng: &mut dyn CryptoRngCore,
    ct: &mut [u8],
    ss: &mut [u8; 32],
) -> Result<()> {
    kem::encapsulate(algo, pk, rng, ct, ss)
}

/// `decapsulate(algo, in sk[skLen], in ct[ctLen], out ss[32])`. Never fails
/// on a malformed ciphertext — see [`kem::decapsulate`].
pub fn decapsulate(algo: Algorithm, sk: &[u8], ct: &[u8], ss: &mut [u8; 32]) -> Result<()> {
    kem::decapsulate(algo, sk, ct, ss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn dispatcher_roundtrip_raw_buffers() {
        for algo in [Algorithm::K2, Algorithm::K3, Algorithm::K4] {
            let mut rng = ChaCha20Rng::seed_from_u64(2024);
            let mut pk = alloc::vec![0u8; algo.public_key_bytes()];
            let mut sk = alloc::vec![0u8; algo.secret_key_bytes()];
            keypair(algo, &mut rng, &mut pk, &mut sk).expect("keypair");

            let mut ct = alloc::vec![0u8; algo.ciphertext_bytes()];
            let mut ss_enc = [0u8; 32];
            encapsulate(algo, &pk, &mut rng, &mut ct, &mut ss_enc).expect("encapsulate");

            let mut ss_dec = [0u8; 32];
            decapsulate(algo, &sk, &ct, &mut ss_dec).expect("decapsulate");

            assert_eq!(ss_enc, ss_dec);
        }
    }

    #[test]
    fn dispatcher_rejects_cross_variant_buffers() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut pk = alloc::vec![0u8; Algorithm::K3.public_key_bytes()];
        let mut sk = alloc::vec![0u8; Algorithm::K2.secret_key_bytes()];
        assert!(keypair(Algorithm::K2, &mut rng, &mut pk, &mut sk).is_err());
    }
}
