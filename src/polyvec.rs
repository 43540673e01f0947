//! Vector-of-polynomials, length `K` fixed at compile time (`K` ∈ {2, 3, 4}).
//!
//! Generalizes the host workspace's fixed `PolyVecK`/`PolyVecL` (`[Poly; 4]`)
//! into a const generic so that each parameter set still monomorphises into a
//! fixed-size, stack-allocated array rather than a heap `Vec`.

extern crate alloc;

use crate::params::N;
use crate::poly::{CompressedPoly, Poly};
use crate::reduce::canonical_unsigned;
use zeroize::Zeroize;

#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct PolyVec<const K: usize> {
    pub polys: [Poly; K],
}

impl<const K: usize> PolyVec<K> {
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    pub fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    pub fn inv_ntt_to_mont(&mut self) {
        for p in self.polys.iter_mut() {
            p.inv_ntt_to_mont();
        }
    }

    pub fn reduce(&mut self) {
        for p in self.polys.iter_mut() {
            p.reduce();
        }
    }

    pub fn to_mont(&mut self) {
        for p in self.polys.iter_mut() {
            p.to_mont();
        }
    }

    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.add_assign(b);
        }
    }

    /// `r = Σᵢ a[i] ·NTT b[i]`: pointwise-multiply-accumulate in NTT domain,
    /// with a single Barrett reduce applied to the result at the end.
    pub fn basemul_acc(a: &Self, b: &Self) -> Poly {
        let mut acc = Poly::zero();
        let mut term = Poly::zero();
        for i in 0..K {
            term.basemul(&a.polys[i], &b.polys[i]);
            acc.add_assign(&term);
        }
        acc.reduce();
        acc
    }

    pub fn to_bytes(&self) -> alloc::vec::Vec<u8> {
        let mut out = alloc::vec::Vec::with_capacity(K * 384);
        for p in self.polys.iter() {
            out.extend_from_slice(&p.to_bytes());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), K * 384);
        let mut v = Self::zero();
        for (i, chunk) in bytes.chunks_exact(384).enumerate() {
            let mut arr = [0u8; 384];
            arr.copy_from_slice(chunk);
            v.polys[i] = Poly::from_bytes(&arr);
        }
        v
    }

    /// Compress and serialize each element with `d_u` bits/coefficient,
    /// concatenated in order.
    pub fn compress_to_bytes(&self, d: u32) -> alloc::vec::Vec<u8> {
        let per_poly = (N as u32 * d / 8) as usize;
        let mut out = alloc::vec![0u8; per_poly * K];
        for (i, p) in self.polys.iter().enumerate() {
            let c = p.compress(d);
            c.to_bytes(&mut out[i * per_poly..(i + 1) * per_poly]);
        }
        out
    }

    pub fn decompress_from_bytes(bytes: &[u8], d: u32) -> Self {
        let per_poly = (N as u32 * d / 8) as usize;
        debug_assert_eq!(bytes.len(), per_poly * K);
        let mut v = Self::zero();
        for (i, chunk) in bytes.chunks_exact(per_poly).enumerate() {
            let c = CompressedPoly::from_bytes(chunk, d);
            v.polys[i] = Poly::decompress(&c);
        }
        v
    }
}

/// Canonicalize every coefficient of every element into [0, q), matching the
/// "inputs are first canonicalized into [0, q)" requirement on the
/// byte-packing entry points.
pub fn canonicalize_all<const K: usize>(v: &mut PolyVec<K>) {
    for p in v.polys.iter_mut() {
        for c in p.coeffs.iter_mut() {
            *c = canonical_unsigned(*c) as i16;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_roundtrip() {
        let mut v: PolyVec<3> = PolyVec::zero();
        for (i, p) in v.polys.iter_mut().enumerate() {
            for (j, c) in p.coeffs.iter_mut().enumerate() {
                *c = ((i * 37 + j) % 3329) as i16;
            }
        }
        let bytes = v.to_bytes();
        let back = PolyVec::<3>::from_bytes(&bytes);
        assert_eq!(v, back);
    }

    #[test]
    fn compressed_roundtrip_within_bound() {
        let mut v: PolyVec<2> = PolyVec::zero();
        for (i, p) in v.polys.iter_mut().enumerate() {
            for (j, c) in p.coeffs.iter_mut().enumerate() {
                *c = ((i * 53 + j * 7) % 3329) as i16;
            }
        }
        let bytes = v.compress_to_bytes(10);
        let back = PolyVec::<2>::decompress_from_bytes(&bytes, 10);
        for (orig_poly, back_poly) in v.polys.iter().zip(back.polys.iter()) {
            for (&o, &b) in orig_poly.coeffs.iter().zip(back_poly.coeffs.iter()) {
                let diff = (b as i32 - o as i32).rem_euclid(3329);
                let diff = diff.min(3329 - diff);
                assert!(diff <= 3329 / (1 << 10) + 2);
            }
        }
    }
}
