//! Encode/decode between ℂ^{N/2} and the negacyclic ring via the canonical
//! embedding.
//!
//! Encode: z ∈ ℂ^{N/2} → m(X) = ⌊Δ · σ^{-1}(z)⌉ ∈ Z[X]/(X^N+1)
//! Decode: m(X) → σ(m) / Δ, first N/2 slots, Gaussian-integer rounded
//!
//! The embedding σ evaluates the polynomial at the odd powers of a primitive
//! 2N-th root of unity; its inverse is a Vandermonde action using the fact
//! that CRTᵀ·CRT is N times a reflection of the identity. The input vector is
//! mirrored with conjugation so the inverse lands on real coefficients.

use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::{Float, One, ToPrimitive, Zero};
use rayon::prelude::*;

use crate::ciphertext::Plaintext;
use crate::error::CkksError;
use crate::instance::Instance;
use crate::negacyclic::{round_div, Polynomial};

impl Instance {
    /// Map a complex vector of length N/2 into a native plaintext. The
    /// `delta` factor controls plaintext precision: slots are scaled by Δ
    /// before rounding to integer coefficients. Fails with `BadEncoding` on
    /// malformed input.
    pub fn encode(&self, z: &[Complex64], delta: &BigInt) -> Result<Plaintext, CkksError> {
        if z.len() != self.params.n / 2 {
            return Err(CkksError::BadEncoding);
        }

        let mut expanded = vec![Complex64::zero(); 2 * z.len()];
        for (i, &slot) in z.iter().enumerate() {
            expanded[i] = slot;
            expanded[2 * z.len() - 1 - i] = slot.conj();
        }

        let pol = vandermonde_action_inverse(&self.crt_roots, &expanded);
        let coeffs = pol
            .iter()
            .map(|value| mul_delta_nearest(value.re, delta))
            .collect();
        Ok(Plaintext::from_polynomial(Polynomial::from_coeffs(coeffs)))
    }

    /// Apply the canonical embedding to a plaintext, producing the vector of
    /// Gaussian integers it encodes. Inverse of `encode`.
    pub fn decode(&self, plt: &Plaintext, delta: &BigInt) -> Vec<Complex64> {
        let n = self.params.n;
        let expanded: Vec<Complex64> = plt
            .polynomial()
            .coeffs
            .iter()
            .map(|c| Complex64::new(ratio_to_f64(c, delta), 0.0))
            .collect();

        let pol = vandermonde_action(&self.crt_roots, &expanded);
        pol[..n / 2]
            .iter()
            .map(|slot| Complex64::new(nearest_integer(slot.re), nearest_integer(slot.im)))
            .collect()
    }
}

/// CRT^{-1} · z, where CRT is the Vandermonde matrix of the primitive 2N-th
/// roots of unity and N = len(z). The N inner products are independent; each
/// runs as its own task with a sequential inner sum, so results are
/// bit-stable across runs.
fn vandermonde_action_inverse(roots: &[Complex64], z: &[Complex64]) -> Vec<Complex64> {
    let n = z.len();
    let m = 2 * n;
    (0..n)
        .into_par_iter()
        .map(|i| {
            let mut acc = Complex64::zero();
            for j in 0..n {
                acc += z[n - 1 - j] * roots[(2 * j + 1) * i % m];
            }
            acc / n as f64
        })
        .collect()
}

/// CRT · z for the same Vandermonde matrix.
fn vandermonde_action(roots: &[Complex64], z: &[Complex64]) -> Vec<Complex64> {
    let n = z.len();
    let m = 2 * n;
    (0..n)
        .into_par_iter()
        .map(|i| {
            let mut acc = Complex64::zero();
            for j in 0..n {
                acc += z[j] * roots[(2 * i + 1) * j % m];
            }
            acc
        })
        .collect()
}

/// ⌊x⌉ = ⌊|x| + 1/2⌋ with the sign of x (ties away from zero).
fn nearest_integer(x: f64) -> f64 {
    let rounded = (x.abs() + 0.5).floor();
    if x < 0.0 {
        -rounded
    } else {
        rounded
    }
}

/// ⌊x · Δ⌉ computed exactly for arbitrary Δ: the double is decomposed into
/// mantissa · 2^exponent, the mantissa is multiplied into Δ as an integer,
/// and the binary exponent is applied with nearest rounding.
fn mul_delta_nearest(x: f64, delta: &BigInt) -> BigInt {
    if x == 0.0 {
        return BigInt::zero();
    }
    let (mantissa, exponent, sign) = Float::integer_decode(x);
    let mut value = BigInt::from(mantissa) * delta;
    if sign < 0 {
        value = -value;
    }
    if exponent >= 0 {
        value << exponent as u32
    } else {
        round_div(&value, &(BigInt::one() << (-exponent) as u32))
    }
}

/// num/den as a double. The numerator is pre-shifted by 64 bits so the
/// integer division keeps more precision than the double can hold, whatever
/// the operand magnitudes.
fn ratio_to_f64(num: &BigInt, den: &BigInt) -> f64 {
    let scaled = (num << 64u32) / den;
    scaled.to_f64().unwrap_or(f64::INFINITY) / 2f64.powi(64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Parameters;

    fn article_instance() -> Instance {
        let params = Parameters {
            n: 1 << 2,
            depth: 3,
            bit_len_p: 30,
            bit_len_q: 100,
            hamming: 2,
            sigma: 3.4,
        };
        Instance::new(params).expect("article instance")
    }

    /// Worked example from the source article: N = 4, Δ = 64,
    /// z = (3+4i, 2-i) encodes to exactly [160, 91, 160, 45].
    #[test]
    fn encode_matches_article_example() {
        let instance = article_instance();
        let delta = BigInt::from(64);
        let z = [Complex64::new(3.0, 4.0), Complex64::new(2.0, -1.0)];

        let plt = instance.encode(&z, &delta).expect("encode");
        let want: Vec<BigInt> = [160, 91, 160, 45].iter().map(|&c| BigInt::from(c)).collect();
        assert_eq!(plt.polynomial().coeffs, want);

        let decoded = instance.decode(&plt, &delta);
        assert_eq!(decoded, z);
    }

    #[test]
    fn encode_rejects_wrong_length() {
        let instance = article_instance();
        let delta = BigInt::from(64);
        let z = [Complex64::new(1.0, 0.0)]; // N/2 = 2 expected
        assert_eq!(
            instance.encode(&z, &delta),
            Err(CkksError::BadEncoding)
        );
    }

    #[test]
    fn encode_is_deterministic_under_parallelism() {
        let instance = article_instance();
        let delta = BigInt::from(1 << 20);
        let z = [Complex64::new(12.0, -7.0), Complex64::new(-3.0, 29.0)];

        let first = instance.encode(&z, &delta).expect("encode");
        for _ in 0..10 {
            let again = instance.encode(&z, &delta).expect("encode");
            assert_eq!(again.polynomial(), first.polynomial());
            assert_eq!(instance.decode(&again, &delta), instance.decode(&first, &delta));
        }
    }

    #[test]
    fn nearest_integer_ties_away_from_zero() {
        assert_eq!(nearest_integer(2.5), 3.0);
        assert_eq!(nearest_integer(-2.5), -3.0);
        assert_eq!(nearest_integer(2.4), 2.0);
        assert_eq!(nearest_integer(-0.4), -0.0);
    }

    #[test]
    fn mul_delta_nearest_is_exact_for_huge_delta() {
        // 2.5 · 2^120 has no representation error in the mantissa path.
        let delta = BigInt::one() << 120u32;
        let want = (BigInt::from(5) << 120u32) / 2;
        assert_eq!(mul_delta_nearest(2.5, &delta), want);
        assert_eq!(mul_delta_nearest(-2.5, &delta), -want.clone());
        assert_eq!(mul_delta_nearest(0.0, &delta), BigInt::zero());
    }

    #[test]
    fn ratio_to_f64_round_trips_small_values() {
        let delta = BigInt::from(1u64 << 40);
        for v in [-37i64, -1, 0, 1, 12345] {
            let num = BigInt::from(v) * &delta;
            let got = ratio_to_f64(&num, &delta);
            assert_eq!(got, v as f64);
        }
    }
}
