//! IND-CCA2 KEM: the Fujisaki-Okamoto transform over the IND-CPA scheme in
//! [`crate::indcpa`].
//!
//! The secret key layout (§6) is `sk_cpa ‖ pk ‖ H(pk) ‖ z`. Decapsulation
//! never fails — a tampered ciphertext is folded into implicit rejection via
//! the constant-time selector in [`crate::ct`], grounded on the same
//! `subtle` usage the host workspace already relies on for this purpose.

extern crate alloc;
use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use subtle::Choice;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ct::{ct_memequal, ct_select_bytes};
use crate::error::{Error, Result};
use crate::indcpa;
use crate::params::{Algorithm, SYM_BYTES};
use crate::symmetric::{g, h, j};

/// A 32-byte shared secret. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct SharedSecret(pub [u8; 32]);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

/// Validate that `buf.len()` matches `expected`, the one buffer-length check
/// every entry point performs before touching key material.
fn check_len(buf_len: usize, expected: usize) -> Result<()> {
    if buf_len != expected {
        return Err(Error::InvalidLength {
            expected,
            got: buf_len,
        });
    }
    Ok(())
}

/// `keypair(algo, out pk, out sk)`.
///
/// `pk` and `sk` must be exactly `algo.public_key_bytes()` and
/// `algo.secret_key_bytes()` long.
pub fn keypair(
    algo: Algorithm,
    rng: &mut dyn CryptoRngCore,
    pk: &mut [u8],
    sk: &mut [u8],
) -> Result<()> {
    check_len(pk.len(), algo.public_key_bytes())?;
    check_len(sk.len(), algo.secret_key_bytes())?;

    let mut d = [0u8; SYM_BYTES];
    let mut z = [0u8; SYM_BYTES];
    rng.try_fill_bytes(&mut d).map_err(|_| Error::Rng)?;
    rng.try_fill_bytes(&mut z).map_err(|_| Error::Rng)?;

    let (pk_bytes, sk_cpa) = match algo.k() {
        2 => indcpa::keypair_derand::<2>(algo, &d),
        3 => indcpa::keypair_derand::<3>(algo, &d),
        4 => indcpa::keypair_derand::<4>(algo, &d),
        _ => unreachable!("Algorithm only takes k in {{2,3,4}}"),
    };

    pk.copy_from_slice(&pk_bytes);

    let h_pk = h(&pk_bytes);
    let mut offset = 0usize;
    sk[offset..offset + sk_cpa.len()].copy_from_slice(&sk_cpa);
    offset += sk_cpa.len();
    sk[offset..offset + pk_bytes.len()].copy_from_slice(&pk_bytes);
    offset += pk_bytes.len();
    sk[offset..offset + 32].copy_from_slice(&h_pk);
    offset += 32;
    sk[offset..offset + 32].copy_from_slice(&z);

    d.zeroize();
    z.zeroize();
    Ok(())
}

/// `encapsulate(algo, in pk, out ct, out ss)`.
pub fn encapsulate(
    algo: Algorithm,
    pk: &[u8],
    rng: &mut dyn CryptoRngCore,
    ct: &mut [u8],
    ss: &mut [u8; 32],
) -> Result<()> {
    check_len(pk.len(), algo.public_key_bytes())?;
    check_len(ct.len(), algo.ciphertext_bytes())?;

    let mut m = [0u8; SYM_BYTES];
    rng.try_fill_bytes(&mut m).map_err(|_| Error::Rng)?;

    let h_pk = h(pk);
    let mut m_h_pk = Vec::with_capacity(64);
    m_h_pk.extend_from_slice(&m);
    m_h_pk.extend_from_slice(&h_pk);
    let k_r = g(&m_h_pk);
    let k: [u8; 32] = k_r[..32].try_into().unwrap();
    let r: [u8; 32] = k_r[32..].try_into().unwrap();

    let ct_bytes = match algo.k() {
        2 => indcpa::encrypt::<2>(algo, pk, &m, &r),
        3 => indcpa::encrypt::<3>(algo, pk, &m, &r),
        4 => indcpa::encrypt::<4>(algo, pk, &m, &r),
        _ => unreachable!(),
    };
    ct.copy_from_slice(&ct_bytes);
    ss.copy_from_slice(&k);

    m.zeroize();
    Ok(())
}

/// `decapsulate(algo, in sk, in ct, out ss)`. Never fails: a tampered
/// ciphertext yields the implicit-rejection pseudo-random key instead of an
/// error.
pub fn decapsulate(algo: Algorithm, sk: &[u8], ct: &[u8], ss: &mut [u8; 32]) -> Result<()> {
    check_len(sk.len(), algo.secret_key_bytes())?;
    check_len(ct.len(), algo.ciphertext_bytes())?;

    let sk_cpa_len = algo.indcpa_secret_key_bytes();
    let pk_len = algo.public_key_bytes();

    let sk_cpa = &sk[..sk_cpa_len];
    let pk = &sk[sk_cpa_len..sk_cpa_len + pk_len];
    let h_pk = &sk[sk_cpa_len + pk_len..sk_cpa_len + pk_len + 32];
    let z: [u8; 32] = sk[sk_cpa_len + pk_len + 32..sk_cpa_len + pk_len + 64]
        .try_into()
        .unwrap();

    let m_prime = match algo.k() {
        2 => indcpa::decrypt::<2>(algo, sk_cpa, ct),
        3 => indcpa::decrypt::<3>(algo, sk_cpa, ct),
        4 => indcpa::decrypt::<4>(algo, sk_cpa, ct),
        _ => unreachable!(),
    };

    let mut m_h = Vec::with_capacity(64);
    m_h.extend_from_slice(&m_prime);
    m_h.extend_from_slice(h_pk);
    let k_r_prime = g(&m_h);
    let k_prime: [u8; 32] = k_r_prime[..32].try_into().unwrap();
    let r_prime: [u8; 32] = k_r_prime[32..].try_into().unwrap();

    let ct_prime = match algo.k() {
        2 => indcpa::encrypt::<2>(algo, pk, &m_prime, &r_prime),
        3 => indcpa::encrypt::<3>(algo, pk, &m_prime, &r_prime),
        4 => indcpa::encrypt::<4>(algo, pk, &m_prime, &r_prime),
        _ => unreachable!(),
    };

    let k_bar = j(&z, ct);

    // Constant-time selector: eq = 1 iff ct == ct_prime. Both candidates are
    // always computed and always copied with equal memory traffic; the
    // branch on `eq` never happens, a mask blend does.
    let eq: Choice = ct_memequal(ct, &ct_prime);
    ct_select_bytes(ss, &k_prime, &k_bar, eq);

    Ok(())
}

/// Owned, `Zeroize`-protected secret key: `sk_cpa ‖ pk ‖ H(pk) ‖ z`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: Vec<u8>,
}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

impl SecretKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Owned public key bytes: `polyvec_tobytes(t̂) ‖ ρ`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Owned ciphertext bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    bytes: Vec<u8>,
}

impl Ciphertext {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Typed convenience layer over a single fixed parameter set, mirroring the
/// newtype ergonomics of `crypto/pq`'s `MlKem768KeyPair` generalized to all
/// three parameter sets via `algo`.
pub struct KeyPair {
    algo: Algorithm,
    public_key: PublicKey,
    secret_key: SecretKey,
}

impl KeyPair {
    pub fn generate(algo: Algorithm, rng: &mut dyn CryptoRngCore) -> Result<Self> {
        let mut pk = alloc::vec![0u8; algo.public_key_bytes()];
        let mut sk = alloc::vec![0u8; algo.secret_key_bytes()];
        keypair(algo, rng, &mut pk, &mut sk)?;
        Ok(Self {
            algo,
            public_key: PublicKey { bytes: pk },
            secret_key: SecretKey { bytes: sk },
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn encapsulate(&self, rng: &mut dyn CryptoRngCore) -> Result<(Ciphertext, SharedSecret)> {
        let mut ct = alloc::vec![0u8; self.algo.ciphertext_bytes()];
        let mut ss = [0u8; 32];
        encapsulate(self.algo, &self.public_key.bytes, rng, &mut ct, &mut ss)?;
        Ok((Ciphertext { bytes: ct }, SharedSecret(ss)))
    }

    pub fn decapsulate(&self, ct: &Ciphertext) -> Result<SharedSecret> {
        let mut ss = [0u8; 32];
        decapsulate(self.algo, &self.secret_key.bytes, &ct.bytes, &mut ss)?;
        Ok(SharedSecret(ss))
    }
}
