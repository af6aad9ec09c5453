//! Primality testing and prime search.
//!
//! Two consumers: `rlwe_prime` produces the scheme moduli p, q0 and P
//! (arbitrary bit-length, ≡ 1 mod 2N), and `ntt_prime_below` feeds the
//! multipliers with word-sized transform primes. Both are deterministic, so
//! instance construction is reproducible.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use super::ntt;

/// Small primes used for trial division and as Miller-Rabin bases.
const SMALL_PRIMES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Miller-Rabin witnesses that are deterministic for every 64-bit integer.
const U64_WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Probabilistic primality test for big integers: trial division by the small
/// primes, then Miller-Rabin with the same fixed bases. The candidates tested
/// here are self-generated (never adversarial), for which 25 rounds leave a
/// negligible composite-acceptance probability.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    for &p in &SMALL_PRIMES {
        let p_big = BigUint::from(p);
        if *n == p_big {
            return true;
        }
        if (n % p_big).is_zero() {
            return false;
        }
    }

    // n - 1 = d · 2^r with d odd
    let n_minus_one = n - 1u32;
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;

    'witness: for &a in &SMALL_PRIMES {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..r {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Deterministic Miller-Rabin for u64 (the 12 standard witnesses cover the
/// full 64-bit range).
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &U64_WITNESSES {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }

    let r = (n - 1).trailing_zeros();
    let d = (n - 1) >> r;
    'witness: for &a in &U64_WITNESSES {
        let mut x = ntt::mod_pow(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..r {
            x = ntt::mod_mul(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Sample an RLWE-compatible prime: the first prime of the form k·m + 1 with
/// k ≥ ⌈2^bits/m⌉, so its bit-length is approximately `bits` and NTT-based
/// multiplication modulo it is possible.
pub fn rlwe_prime(bits: usize, m: usize) -> BigInt {
    let m_big = BigUint::from(m as u64);
    let lower = BigUint::one() << bits;
    // k = ⌈2^bits / m⌉
    let mut k = (&lower + &m_big - 1u32) / &m_big;
    loop {
        let candidate = &k * &m_big + 1u32;
        if is_probable_prime(&candidate) {
            return BigInt::from(candidate);
        }
        k += 1u32;
    }
}

/// Largest prime q < `below` with q ≡ 1 (mod two_n). Used to build the
/// transform-prime pools of the multipliers, scanning downward so successive
/// calls with a decreasing bound yield disjoint primes.
pub fn ntt_prime_below(below: u64, two_n: u64) -> u64 {
    assert!(below > two_n, "search bound too small for 2N={two_n}");
    // Largest candidate ≡ 1 mod two_n strictly below the bound.
    let mut candidate = ((below - 2) / two_n) * two_n + 1;
    while candidate > two_n {
        if is_prime_u64(candidate) {
            return candidate;
        }
        candidate -= two_n;
    }
    panic!("no NTT prime below {below} for 2N={two_n}");
}
