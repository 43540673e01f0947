//! IND-CPA public-key scheme underlying the IND-CCA2 KEM.
//!
//! Grounded on the host workspace's `LionKeyPair::generate`/`from_seed`
//! (XOF-seeded matrix and noise-vector expansion, `t = A·s + e` computed in
//! NTT domain) in `crypto/lion/src/lattice/mod.rs`, generalized from the
//! fixed `K = 4` there to the const-generic `PolyVec<K>` here.

extern crate alloc;
use alloc::vec::Vec;

use crate::params::{Algorithm, N, Q, SYM_BYTES};
use crate::poly::Poly;
use crate::polyvec::{canonicalize_all, PolyVec};
use crate::symmetric::{g, prf, MatrixXof, XOF_BLOCK_BYTES};

/// `Â ∈ R_q^{k×k}` in NTT domain, row-major: `matrix[i]` is row `i`,
/// `matrix[i].polys[j]` is `Â[i][j]`.
///
/// `gen_matrix(ρ, transposed)`: for each (i, j), absorb `ρ ‖ i ‖ j` (or
/// `ρ ‖ j ‖ i` when transposed) into a SHAKE-128 XOF and rejection-sample
/// 256 coefficients < q from its output stream.
pub fn gen_matrix<const K: usize>(rho: &[u8; 32], transposed: bool) -> [PolyVec<K>; K] {
    core::array::from_fn(|i| {
        let mut row = PolyVec::<K>::zero();
        for j in 0..K {
            let (a, b) = if transposed {
                (j as u8, i as u8)
            } else {
                (i as u8, j as u8)
            };
            row.polys[j] = rej_uniform(rho, a, b);
        }
        row
    })
}

fn rej_uniform(rho: &[u8; 32], i: u8, j: u8) -> Poly {
    let mut xof = MatrixXof::new(rho, i, j);
    let mut p = Poly::zero();
    let mut filled = 0usize;
    let mut block = xof.squeeze_block();
    let mut pos = 0usize;
    while filled < N {
        if pos + 3 > XOF_BLOCK_BYTES {
            block = xof.squeeze_block();
            pos = 0;
        }
        let b0 = block[pos] as u16;
        let b1 = block[pos + 1] as u16;
        let b2 = block[pos + 2] as u16;
        pos += 3;

        let d1 = b0 | ((b1 & 0x0F) << 8);
        let d2 = (b1 >> 4) | (b2 << 4);

        if d1 < Q as u16 && filled < N {
            p.coeffs[filled] = d1 as i16;
            filled += 1;
        }
        if d2 < Q as u16 && filled < N {
            p.coeffs[filled] = d2 as i16;
            filled += 1;
        }
    }
    p
}

fn noise_vec<const K: usize>(eta: usize, seed: &[u8; 32], nonce_start: u8) -> PolyVec<K> {
    let mut v = PolyVec::<K>::zero();
    let mut buf = alloc::vec![0u8; 64 * eta];
    for (i, p) in v.polys.iter_mut().enumerate() {
        prf(seed, nonce_start + i as u8, &mut buf);
        *p = Poly::from_noise(eta, &buf);
    }
    v
}

/// Derandomized keypair generation from a 32-byte seed `d`.
///
/// Returns `(pk, sk_cpa)` where `pk = polyvec_tobytes(t̂) ‖ ρ` and
/// `sk_cpa = polyvec_tobytes(ŝ)`.
pub fn keypair_derand<const K: usize>(algo: Algorithm, d: &[u8; 32]) -> (Vec<u8>, Vec<u8>) {
    debug_assert_eq!(algo.k(), K);

    let mut d_k = [0u8; SYM_BYTES + 1];
    d_k[..SYM_BYTES].copy_from_slice(d);
    d_k[SYM_BYTES] = crate::params::keygen_domain_byte(algo);
    let rho_sigma = g(&d_k);
    let rho: [u8; 32] = rho_sigma[..32].try_into().unwrap();
    let sigma: [u8; 32] = rho_sigma[32..].try_into().unwrap();

    let a_hat = gen_matrix::<K>(&rho, false);

    let eta1 = algo.eta1();
    let mut s: PolyVec<K> = noise_vec(eta1, &sigma, 0);
    let mut e: PolyVec<K> = noise_vec(eta1, &sigma, K as u8);

    s.ntt();
    e.ntt();

    let mut t_hat: PolyVec<K> = PolyVec::zero();
    for i in 0..K {
        t_hat.polys[i] = PolyVec::basemul_acc(&a_hat[i], &s);
        t_hat.polys[i].to_mont();
        t_hat.polys[i].add_assign(&e.polys[i]);
        t_hat.polys[i].reduce();
    }
    canonicalize_all(&mut t_hat);
    let mut s_hat = s;
    canonicalize_all(&mut s_hat);

    let mut pk = t_hat.to_bytes();
    pk.extend_from_slice(&rho);
    let sk = s_hat.to_bytes();

    (pk, sk)
}

/// `Encrypt(pk, m, coins)`: returns the ciphertext bytes.
pub fn encrypt<const K: usize>(
    algo: Algorithm,
    pk: &[u8],
    msg: &[u8; 32],
    coins: &[u8; 32],
) -> Vec<u8> {
    debug_assert_eq!(algo.k(), K);
    let poly_bytes = K * 384;
    let t_hat = PolyVec::<K>::from_bytes(&pk[..poly_bytes]);
    let rho: [u8; 32] = pk[poly_bytes..poly_bytes + 32].try_into().unwrap();

    let a_hat = gen_matrix::<K>(&rho, true);

    let eta1 = algo.eta1();
    let eta2 = algo.eta2();

    let mut r: PolyVec<K> = noise_vec(eta1, coins, 0);
    let e1: PolyVec<K> = noise_vec(eta2, coins, K as u8);

    let mut e2_buf = alloc::vec![0u8; 64 * eta2];
    prf(coins, 2 * K as u8, &mut e2_buf);
    let e2 = Poly::from_noise(eta2, &e2_buf);

    r.ntt();

    let mut u: PolyVec<K> = PolyVec::zero();
    for i in 0..K {
        u.polys[i] = PolyVec::basemul_acc(&a_hat[i], &r);
        u.polys[i].inv_ntt_to_mont();
    }
    u.add_assign(&e1);
    u.reduce();

    let mut v = PolyVec::basemul_acc(&t_hat, &r);
    v.inv_ntt_to_mont();
    v.add_assign(&e2);
    let msg_poly = Poly::from_msg(msg);
    v.add_assign(&msg_poly);
    v.reduce();

    canonicalize_all(&mut u);
    let mut v_vec = PolyVec::<1> { polys: [v] };
    canonicalize_all(&mut v_vec);

    let mut ct = u.compress_to_bytes(algo.du());
    ct.extend(v_vec.compress_to_bytes(algo.dv()));
    ct
}

/// `Decrypt(sk_cpa, ct)`: returns the recovered 32-byte message.
pub fn decrypt<const K: usize>(algo: Algorithm, sk: &[u8], ct: &[u8]) -> [u8; 32] {
    debug_assert_eq!(algo.k(), K);
    let du = algo.du();
    let dv = algo.dv();
    let u_bytes_len = crate::params::polyvec_compressed_bytes(K, du);

    let mut u = PolyVec::<K>::decompress_from_bytes(&ct[..u_bytes_len], du);
    let v_vec = PolyVec::<1>::decompress_from_bytes(&ct[u_bytes_len..], dv);
    let v = &v_vec.polys[0];

    let s_hat = PolyVec::<K>::from_bytes(sk);

    u.ntt();
    let mut m_poly = PolyVec::basemul_acc(&s_hat, &u);
    m_poly.inv_ntt_to_mont();

    let mut diff = v.clone();
    diff.sub_assign(&m_poly);
    diff.reduce();

    diff.to_msg()
}
