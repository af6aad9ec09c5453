//! Polynomials in Z[X]/(X^N + 1) with arbitrary-precision coefficients.
//!
//! Coefficients are kept centered: reduction maps into (-m/2, m/2], which is
//! the representative range the decoder and the rescaling rounder both read
//! signed values from.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// A dense degree-(N-1) polynomial, index i holding the coefficient of X^i.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    pub coeffs: Vec<BigInt>,
}

impl Polynomial {
    /// The zero polynomial of dimension n.
    pub fn new(n: usize) -> Self {
        Self {
            coeffs: vec![BigInt::zero(); n],
        }
    }

    pub fn from_coeffs(coeffs: Vec<BigInt>) -> Self {
        Self { coeffs }
    }

    /// Ring dimension N.
    pub fn dim(&self) -> usize {
        self.coeffs.len()
    }

    /// Bit-length of the largest coefficient magnitude (0 for the zero
    /// polynomial). Drives the transform-prime sizing of the multipliers.
    pub fn max_coeff_bits(&self) -> u64 {
        self.coeffs
            .iter()
            .map(|c| c.magnitude().bits())
            .max()
            .unwrap_or(0)
    }

    /// In-place reduction of every coefficient to the centered representative
    /// in (-m/2, m/2].
    pub fn reduce(&mut self, m: &BigInt) {
        for c in &mut self.coeffs {
            let mut r = c.mod_floor(m);
            if &r + &r > *m {
                r -= m;
            }
            *c = r;
        }
    }

    /// Coefficient-wise nearest-integer scaling ⌊c/d⌉, ties away from zero.
    pub fn scale_nearest(&self, d: &BigInt) -> Polynomial {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| round_div(c, d)).collect(),
        }
    }

    /// Coefficient-wise multiplication by a constant.
    pub fn scale(&self, k: &BigInt) -> Polynomial {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| c * k).collect(),
        }
    }
}

/// Componentwise sum. Panics on dimension mismatch (programmer error).
pub fn add(x: &Polynomial, y: &Polynomial) -> Polynomial {
    assert_eq!(x.dim(), y.dim(), "polynomial dimension mismatch");
    Polynomial {
        coeffs: x
            .coeffs
            .iter()
            .zip(&y.coeffs)
            .map(|(a, b)| a + b)
            .collect(),
    }
}

/// Componentwise difference. Panics on dimension mismatch.
pub fn sub(x: &Polynomial, y: &Polynomial) -> Polynomial {
    assert_eq!(x.dim(), y.dim(), "polynomial dimension mismatch");
    Polynomial {
        coeffs: x
            .coeffs
            .iter()
            .zip(&y.coeffs)
            .map(|(a, b)| a - b)
            .collect(),
    }
}

/// Schoolbook negacyclic product: z[k] = Σ_{i+j=k} x_i·y_j − Σ_{i+j=k+N} x_i·y_j.
///
/// Zero coefficients of `y` are skipped, so multiplying by the sparse ternary
/// secret costs N·h rather than N². Exact, used on the cleartext path
/// (decryption) where FFT precision questions must not arise.
pub fn mul_simple(x: &Polynomial, y: &Polynomial) -> Polynomial {
    let n = x.dim();
    assert_eq!(n, y.dim(), "polynomial dimension mismatch");

    let mut coeffs = vec![BigInt::zero(); n];
    for (j, yj) in y.coeffs.iter().enumerate() {
        if yj.is_zero() {
            continue;
        }
        for (i, xi) in x.coeffs.iter().enumerate() {
            if xi.is_zero() {
                continue;
            }
            let term = xi * yj;
            let k = i + j;
            if k < n {
                coeffs[k] += term;
            } else {
                coeffs[k - n] -= term;
            }
        }
    }
    Polynomial { coeffs }
}

/// L1 distance Σ|x_i − y_i| between coefficient vectors.
pub fn l1_distance(x: &Polynomial, y: &Polynomial) -> BigInt {
    assert_eq!(x.dim(), y.dim(), "polynomial dimension mismatch");
    x.coeffs
        .iter()
        .zip(&y.coeffs)
        .map(|(a, b)| (a - b).abs())
        .sum()
}

/// ⌊c/d⌉ with ties away from zero: ⌊(c + sign(c)·d/2)/d⌋ under truncating
/// division. Requires d > 0.
pub fn round_div(c: &BigInt, d: &BigInt) -> BigInt {
    let half = d >> 1;
    if c.is_negative() {
        (c - half) / d
    } else {
        (c + half) / d
    }
}
