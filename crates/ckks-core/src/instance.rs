//! Precomputed context of the scheme.
//!
//! An `Instance` bundles the validated parameters with everything derived
//! from them: the RLWE moduli p, q0 and the key-switching modulus P, the
//! complex root table of the canonical embedding, the advisory noise bounds,
//! and the two negacyclic multipliers. It is immutable after construction and
//! safe to share across threads.

use std::f64::consts::{PI, SQRT_2};
use std::fmt;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::Pow;
use tracing::debug;

use crate::error::CkksError;
use crate::negacyclic::{self, CrtMultiplier, Polynomial, ZMultiplier};
use crate::params::Parameters;

#[derive(Debug)]
pub struct Instance {
    /// Public, user defined; see params.rs.
    pub params: Parameters,
    pub(crate) p: BigInt,
    pub(crate) q0: BigInt,
    /// Modulus for the evaluation key, a.k.a. P.
    pub(crate) p_ev: BigInt,

    /// Complex primitive 2N-th roots of unity, crt_roots[k] = exp(iπk/N).
    pub(crate) crt_roots: Vec<Complex64>,

    /// Bound on the noise of clean ciphertexts (Lemma 1).
    b_clean: BigInt,
    /// Additive noise of rescaling (Lemma 2).
    b_scale: BigInt,

    pub(crate) z_multiplier: ZMultiplier,
    /// CRT multiplier over the modulus chain q0 · p^l.
    pub(crate) multiplier: CrtMultiplier,

    warning: Option<CkksError>,
}

impl Instance {
    /// Validate the parameters and perform all precomputations. A structural
    /// problem is fatal; insecure-but-consistent parameters yield a valid
    /// instance whose `security_warning` is set, and the caller is
    /// responsible for accepting or rejecting it.
    pub fn new(params: Parameters) -> Result<Instance, CkksError> {
        let warning = params.sanitize()?;
        let two_n = 2 * params.n;

        // p, q0 are RLWE primes with p << q0; P is sized so that
        // key-switching noise stays dominated by the rescaling bound.
        let p = negacyclic::rlwe_prime(params.bit_len_p, two_n);
        let q0 = negacyclic::rlwe_prime(params.bit_len_q, two_n);
        let bits_p_ev = params.bit_len_p * params.depth + params.bit_len_q;
        let p_ev = negacyclic::rlwe_prime(bits_p_ev, two_n);
        debug!(%p, %q0, %p_ev, "sampled RLWE moduli");

        let crt_roots = (0..two_n)
            .map(|k| primitive_root_of_unity(k, two_n))
            .collect();

        let multiplier = CrtMultiplier::new(params.n, &p, &q0, params.depth);
        let z_multiplier = ZMultiplier::new(params.n);

        let b_clean = compute_b_clean(params.sigma, params.n, params.hamming);
        let b_scale = compute_b_scale(params.n, params.hamming);

        Ok(Instance {
            params,
            p,
            q0,
            p_ev,
            crt_roots,
            b_clean,
            b_scale,
            z_multiplier,
            multiplier,
            warning,
        })
    }

    /// The insecure-parameters warning raised at construction, if any.
    pub fn security_warning(&self) -> Option<CkksError> {
        self.warning.clone()
    }

    /// The rescaling prime p.
    pub fn p(&self) -> &BigInt {
        &self.p
    }

    /// `q0 · p^L`, the modulus of fresh ciphertexts.
    pub fn first_modulus(&self) -> BigInt {
        &self.q0 * Pow::pow(&self.p, self.params.depth)
    }

    /// `q0`, the smallest modulus of the chain.
    pub fn last_modulus(&self) -> BigInt {
        self.q0.clone()
    }

    /// Bound on the error introduced by encryption on a level-L ciphertext.
    pub fn b_clean(&self) -> &BigInt {
        &self.b_clean
    }

    /// Noise estimate for multiplied ciphertexts at the given chain modulus
    /// (Lemma 3): key-switching noise scaled down by P, plus the rescaling
    /// bound.
    pub fn b_mul(&self, modulus: &BigInt) -> BigInt {
        let b_ks = 8.0 * self.params.sigma * self.params.n as f64 / 3f64.sqrt();
        let mut result = BigInt::from(b_ks as i64);
        result *= modulus;
        result /= &self.p_ev;
        result += &self.b_scale;
        result
    }

    /// Default distance between two ring elements.
    pub fn distance(&self, x: &Polynomial, y: &Polynomial) -> BigInt {
        self.l1_distance(x, y)
    }

    /// L1 distance between two ring elements.
    pub fn l1_distance(&self, x: &Polynomial, y: &Polynomial) -> BigInt {
        negacyclic::l1_distance(x, y)
    }

    /// The moduli q0 · p^l for l = 0..=L, smallest first.
    fn chain_of_moduli(&self) -> Vec<BigInt> {
        let mut chain = Vec::with_capacity(self.params.depth + 1);
        chain.push(self.q0.clone());
        for l in 1..=self.params.depth {
            let next = &chain[l - 1] * &self.p;
            chain.push(next);
        }
        chain
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n----- BEGIN PARAMETERS -----\n")?;
        write!(f, "{}", self.params)?;
        writeln!(f, "  p: {}", self.p)?;
        writeln!(f, "  q: {}", self.q0)?;
        writeln!(f, "  P: {}", self.p_ev)?;
        writeln!(
            f,
            "  Complex primitive M-th root of unity: {}",
            self.crt_roots[1]
        )?;
        writeln!(f, "  Moduli:")?;
        for modulus in self.chain_of_moduli() {
            writeln!(f, "  {modulus}")?;
        }
        writeln!(f, "\n----- END PARAMETERS -----")
    }
}

/// exp(2πi · index / n) as a double-precision complex number.
pub fn primitive_root_of_unity(index: usize, n: usize) -> Complex64 {
    let theta = 2.0 * PI * index as f64 / n as f64;
    Complex64::new(theta.cos(), theta.sin())
}

/// See Lemma 1 (Encoding and Encryption):
/// Bclean = 8√2·σ·N + 6σ·√N + 16σ·√(h·N), floored.
fn compute_b_clean(sigma: f64, dim: usize, hamming: usize) -> BigInt {
    let n = dim as f64;
    let h = hamming as f64;
    let b_clean = 8.0 * SQRT_2 * sigma * n + 6.0 * sigma * n.sqrt() + 16.0 * sigma * (h * n).sqrt();
    BigInt::from(b_clean as i64)
}

/// See Lemma 2 (Rescaling): Bscale = √(N/3)·(3 + h·√8), floored.
fn compute_b_scale(dim: usize, hamming: usize) -> BigInt {
    let n = dim as f64;
    let h = hamming as f64;
    let b_scale = (n / 3.0).sqrt() * (3.0 + h * 8f64.sqrt());
    BigInt::from(b_scale as i64)
}
