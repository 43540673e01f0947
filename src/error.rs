//! Error type for ML-KEM operations.
//!
//! Hand-rolled rather than `thiserror`-derived, to stay `no_std`-friendly —
//! the same choice the host workspace's `crypto/lion` crate makes in its own
//! `error.rs`.

use core::fmt;

/// Errors that can occur in ML-KEM operations.
///
/// Decapsulation never fails: a tampered or malformed ciphertext is folded
/// into the implicit-rejection path and still returns a (wrong) shared
/// secret. The only failures are the ones §7 names: the host's randomness
/// source running dry, and the dispatcher receiving buffers of the wrong
/// size for the requested parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The host-supplied randomness source failed to fill a buffer.
    Rng,
    /// A caller-supplied buffer did not match the size required by the
    /// requested parameter set.
    InvalidLength { expected: usize, got: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rng => write!(f, "randomness source failed"),
            Self::InvalidLength { expected, got } => {
                write!(f, "invalid buffer length: expected {expected}, got {got}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for ML-KEM operations.
pub type Result<T> = core::result::Result<T, Error>;
