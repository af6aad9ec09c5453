//! Coefficient distributions for key material, encryption randomness and
//! noise.
//!
//! Every sampler takes an explicit `Rng` handle so callers control seeding
//! (deterministic tests) and thread placement; nothing here touches a global
//! generator.

use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::poly::Polynomial;

/// Uniform polynomial modulo m: each coefficient drawn uniformly below m
/// (rejection-sampled, bias-free) and centered into (-m/2, m/2].
pub fn uniform_mod<R: Rng>(rng: &mut R, n: usize, m: &BigInt) -> Polynomial {
    let bound = m.magnitude();
    let coeffs = (0..n)
        .map(|_| {
            let mut v = BigInt::from(rng.gen_biguint_below(bound));
            if &v + &v > *m {
                v -= m;
            }
            v
        })
        .collect();
    Polynomial::from_coeffs(coeffs)
}

/// Discrete Gaussian with mean 0 and standard deviation sigma, obtained by
/// rounding a continuous Gaussian to the nearest integer.
pub fn dg<R: Rng>(rng: &mut R, n: usize, sigma: f64) -> Polynomial {
    let normal =
        Normal::new(0.0, sigma).expect("gaussian width must be finite and non-negative");
    let coeffs = (0..n)
        .map(|_| BigInt::from(normal.sample(rng).round() as i64))
        .collect();
    Polynomial::from_coeffs(coeffs)
}

/// Ternary polynomial with P(0) = 1-rho and P(+1) = P(-1) = rho/2.
pub fn zo<R: Rng>(rng: &mut R, n: usize, rho: f64) -> Polynomial {
    let coeffs = (0..n)
        .map(|_| {
            let u: f64 = rng.gen();
            if u < rho / 2.0 {
                BigInt::one()
            } else if u < rho {
                -BigInt::one()
            } else {
                BigInt::zero()
            }
        })
        .collect();
    Polynomial::from_coeffs(coeffs)
}

/// Ternary polynomial with exactly h nonzero entries, each ±1 with equal
/// probability, positions chosen uniformly without replacement.
pub fn hwt<R: Rng>(rng: &mut R, n: usize, h: usize) -> Polynomial {
    assert!(h <= n, "hamming weight {h} exceeds ring dimension {n}");
    let mut coeffs = vec![BigInt::zero(); n];
    let mut placed = 0;
    while placed < h {
        let idx = rng.gen_range(0..n);
        if !coeffs[idx].is_zero() {
            continue;
        }
        coeffs[idx] = if rng.gen_bool(0.5) {
            BigInt::one()
        } else {
            -BigInt::one()
        };
        placed += 1;
    }
    Polynomial::from_coeffs(coeffs)
}
