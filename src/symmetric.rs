//! Symmetric primitives adapter: H, G, PRF, J, and the matrix-expansion XOF.
//!
//! Grounded on the same `sha3` usage as `PolyMatrix::expand_a` and
//! `ring_signature::signer::compute_challenge_seed` in the host workspace's
//! `crypto/lion` crate: `Shake128`/`Shake256` driven through
//! `digest::{ExtendableOutput, Update, XofReader}`.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

/// `H(x) = SHA3-256(x)`.
pub fn h(x: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha3_256::digest(x));
    out
}

/// `G(x) = SHA3-512(x)`, split by the caller into `(K̄, r)` or `(ρ, σ)`.
pub fn g(x: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha3_512::digest(x));
    out
}

/// `PRF_η(key, nonce) = SHAKE-256(key ‖ nonce)`, truncated to `out.len()`
/// bytes (`out` is sized `64·η` bytes by the caller, per FIPS 203).
pub fn prf(key: &[u8; 32], nonce: u8, out: &mut [u8]) {
    let mut hasher = Shake256::default();
    hasher.update(key);
    hasher.update(&[nonce]);
    let mut reader = hasher.finalize_xof();
    reader.read(out);
}

/// `J(z, c) = SHAKE-256(z ‖ c)`, the implicit-rejection KDF.
pub fn j(z: &[u8; 32], c: &[u8]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(z);
    hasher.update(c);
    let mut reader = hasher.finalize_xof();
    let mut out = [0u8; 32];
    reader.read(&mut out);
    out
}

/// SHAKE-128 XOF state absorbing `ρ ‖ i ‖ j`, squeezed one 168-byte block
/// (the SHAKE-128 rate) at a time, for matrix-coefficient rejection
/// sampling. The underlying `sha3` reader happily serves arbitrary-length
/// reads; block-sizing here only mirrors how the source describes the
/// sampling loop, not a hard requirement of the crate we depend on.
pub struct MatrixXof {
    reader: sha3::Shake128Reader,
}

/// SHAKE-128 squeeze block size (the rate of the underlying Keccak sponge).
pub const XOF_BLOCK_BYTES: usize = 168;

impl MatrixXof {
    /// Absorb `ρ ‖ i ‖ j`, the FIPS 203 `XOF.Init`/`XOF.Absorb(ρ, i, j)` step.
    pub fn new(rho: &[u8; 32], i: u8, j: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[i, j]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Squeeze the next block of output.
    pub fn squeeze_block(&mut self) -> [u8; XOF_BLOCK_BYTES] {
        let mut block = [0u8; XOF_BLOCK_BYTES];
        self.reader.read(&mut block);
        block
    }
}
