//! Constant-time primitives used by the decapsulation selector.
//!
//! Named after the source's own `ct_memequal`/`ct_memmov_cond`, but backed by
//! `subtle` rather than hand-rolled bit tricks — the same crate the host
//! workspace already reaches for at this exact seam (see
//! `util/grpc-tonic/src/auth/token_authenticator.rs`'s use of
//! `subtle::ConstantTimeEq`). `subtle`'s primitives are marked
//! `#[inline(never)]` internally and use volatile-style barriers the
//! optimiser cannot see through, which a hand-written branch-free comparison
//! cannot guarantee across LLVM optimization levels.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Returns 1 (as a `Choice`) iff `a == b`, 0 otherwise. Scans the full
/// width of both slices regardless of where they first differ.
#[inline]
pub fn ct_memequal(a: &[u8], b: &[u8]) -> Choice {
    if a.len() != b.len() {
        return Choice::from(0);
    }
    a.ct_eq(b)
}

/// Copies `src` over `dst` when `cond` is true, leaves `dst` unchanged
/// otherwise, performing the same memory traffic in both cases.
#[inline]
pub fn ct_select_bytes(dst: &mut [u8], src_if_true: &[u8], src_if_false: &[u8], cond: Choice) {
    debug_assert_eq!(dst.len(), src_if_true.len());
    debug_assert_eq!(dst.len(), src_if_false.len());
    for ((d, t), f) in dst.iter_mut().zip(src_if_true).zip(src_if_false) {
        *d = u8::conditional_select(f, t, cond);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memequal_detects_equal_and_unequal() {
        assert_eq!(ct_memequal(b"abcd", b"abcd").unwrap_u8(), 1);
        assert_eq!(ct_memequal(b"abcd", b"abce").unwrap_u8(), 0);
        assert_eq!(ct_memequal(b"abcd", b"abc").unwrap_u8(), 0);
    }

    #[test]
    fn select_bytes_picks_correct_branch() {
        let t = [1u8; 4];
        let f = [2u8; 4];
        let mut dst = [0u8; 4];

        ct_select_bytes(&mut dst, &t, &f, Choice::from(1));
        assert_eq!(dst, t);

        ct_select_bytes(&mut dst, &t, &f, Choice::from(0));
        assert_eq!(dst, f);
    }
}
