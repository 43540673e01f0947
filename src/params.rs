//! Parameter sets for ML-KEM: K2 (ML-KEM-512), K3 (ML-KEM-768), K4 (ML-KEM-1024).
//!
//! Only `k`, η₁, η₂, d_u, d_v vary across the three sets; everything else
//! (n, q, the zetas table) is shared. Byte sizes are derived `const fn`s of
//! those four numbers so there is exactly one place that can get them wrong.

/// Ring dimension: degree of X^N + 1. Power of two, required for the NTT.
pub const N: usize = 256;

/// Modulus of R_q = Z_q[X]/(X^N + 1).
pub const Q: i16 = 3329;

/// Bytes needed to pack one polynomial's 256 coefficients at 12 bits each.
pub const POLY_BYTES: usize = 384;

/// Length of a shared secret, a seed, and an H/PRF-nonce key: 32 bytes.
pub const SYM_BYTES: usize = 32;

/// One named parameter set. `K` is threaded as a const generic everywhere a
/// fixed-size stack array depends on it (`PolyVec<K>`); the fields below
/// cover the values that don't affect array sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// ML-KEM-512.
    K2,
    /// ML-KEM-768.
    K3,
    /// ML-KEM-1024.
    K4,
}

impl Algorithm {
    #[inline]
    pub const fn k(self) -> usize {
        match self {
            Algorithm::K2 => 2,
            Algorithm::K3 => 3,
            Algorithm::K4 => 4,
        }
    }

    /// Noise parameter for the secret/error vectors sampled at keygen.
    #[inline]
    pub const fn eta1(self) -> usize {
        match self {
            Algorithm::K2 => 3,
            Algorithm::K3 | Algorithm::K4 => 2,
        }
    }

    /// Noise parameter for the error terms sampled at encryption.
    #[inline]
    pub const fn eta2(self) -> usize {
        2
    }

    /// Compression depth (bits/coefficient) for the ciphertext's `u` vector.
    #[inline]
    pub const fn du(self) -> u32 {
        match self {
            Algorithm::K2 | Algorithm::K3 => 10,
            Algorithm::K4 => 11,
        }
    }

    /// Compression depth (bits/coefficient) for the ciphertext's `v` polynomial.
    #[inline]
    pub const fn dv(self) -> u32 {
        match self {
            Algorithm::K2 | Algorithm::K3 => 4,
            Algorithm::K4 => 5,
        }
    }

    #[inline]
    pub const fn public_key_bytes(self) -> usize {
        POLY_BYTES * self.k() + SYM_BYTES
    }

    #[inline]
    pub const fn indcpa_secret_key_bytes(self) -> usize {
        POLY_BYTES * self.k()
    }

    /// `sk_cpa ‖ pk ‖ H(pk) ‖ z`.
    #[inline]
    pub const fn secret_key_bytes(self) -> usize {
        self.indcpa_secret_key_bytes() + self.public_key_bytes() + SYM_BYTES + SYM_BYTES
    }

    #[inline]
    pub const fn ciphertext_bytes(self) -> usize {
        polyvec_compressed_bytes(self.k(), self.du()) + poly_compressed_bytes(self.dv())
    }

    /// Every other entry point takes the algorithm tag by value; this one
    /// gives the dispatcher a value to match on when recovering `Algorithm`
    /// from a tag stored as e.g. a protocol byte.
    #[inline]
    pub const fn from_k(k: usize) -> Option<Self> {
        match k {
            2 => Some(Algorithm::K2),
            3 => Some(Algorithm::K3),
            4 => Some(Algorithm::K4),
            _ => None,
        }
    }
}

#[inline]
pub const fn poly_compressed_bytes(d: u32) -> usize {
    (N as u32 * d / 8) as usize
}

#[inline]
pub const fn polyvec_compressed_bytes(k: usize, d: u32) -> usize {
    k * poly_compressed_bytes(d)
}

// ============================================================================
// Domain separation tags
// ============================================================================

/// Domain separator byte appended to `d` before `G` at keygen (§9 open
/// question 2): `G(d ‖ k)`.
#[inline]
pub const fn keygen_domain_byte(algo: Algorithm) -> u8 {
    algo.k() as u8
}
