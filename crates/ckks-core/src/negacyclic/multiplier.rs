//! Exact negacyclic multiplication via multi-prime NTTs.
//!
//! Both multipliers compute the true integer product: operands are reduced
//! into residue lanes modulo word-sized NTT primes (≡ 1 mod 2N), each lane is
//! multiplied in O(N log N), and the lanes are recombined by CRT and centered.
//! The lane set is always sized so that the product of the lane primes
//! strictly dominates N · max|x| · max|y| · 2, which makes the recombined
//! result exact rather than merely congruent.
//!
//! `ZMultiplier` serves the unbounded integer paths (encryption products,
//! key switching) and grows its lane pool on demand; `CrtMultiplier` fixes
//! its pool at construction for a known modulus chain and reduces the exact
//! product modulo the requested chain member.

use std::sync::{Arc, RwLock};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Pow, ToPrimitive, Zero};
use rayon::prelude::*;

use super::ntt::{self, NttTable};
use super::poly::Polynomial;
use super::prime;

/// Transform primes are drawn downward from here; keeping them below 2^62
/// leaves headroom for the u128 butterfly products.
const LANE_PRIME_CEILING: u64 = 1 << 62;

/// One residue lane: a transform prime with its precomputed tables.
#[derive(Debug)]
struct Lane {
    table: NttTable,
    q_big: BigInt,
}

impl Lane {
    fn new(n: usize, q: u64) -> Self {
        Self {
            table: NttTable::new(n, q),
            q_big: BigInt::from(q),
        }
    }
}

/// Lane pool with the next downward search position.
#[derive(Debug)]
struct LanePool {
    lanes: Vec<Arc<Lane>>,
    next_below: u64,
}

impl LanePool {
    fn new() -> Self {
        Self {
            lanes: Vec::new(),
            next_below: LANE_PRIME_CEILING,
        }
    }

    fn grow(&mut self, n: usize, min_bits: u64) {
        let two_n = (2 * n) as u64;
        while total_bits(&self.lanes) < min_bits {
            let q = prime::ntt_prime_below(self.next_below, two_n);
            self.next_below = q;
            self.lanes.push(Arc::new(Lane::new(n, q)));
        }
    }
}

/// Guaranteed bit capacity of a lane set: Σ ⌊log2 q_i⌋.
fn total_bits(lanes: &[Arc<Lane>]) -> u64 {
    lanes.iter().map(|lane| lane.table.q.ilog2() as u64).sum()
}

/// Reduce the centered coefficients of x into one residue lane.
fn to_residues(x: &Polynomial, lane: &Lane) -> Vec<u64> {
    x.coeffs
        .iter()
        .map(|c| {
            c.mod_floor(&lane.q_big)
                .to_u64()
                .expect("residue fits in u64")
        })
        .collect()
}

/// Exact negacyclic product over the given lanes. The caller guarantees the
/// lane capacity dominates the product magnitude.
fn mul_exact(lanes: &[Arc<Lane>], x: &Polynomial, y: &Polynomial) -> Polynomial {
    let n = x.dim();

    // Independent residue lanes: reduce, transform, pointwise, invert.
    let residues: Vec<Vec<u64>> = lanes
        .par_iter()
        .map(|lane| {
            let q = lane.table.q;
            let mut rx = to_residues(x, lane);
            let mut ry = to_residues(y, lane);
            lane.table.forward(&mut rx);
            lane.table.forward(&mut ry);
            for i in 0..n {
                rx[i] = ntt::mod_mul(rx[i], ry[i], q);
            }
            lane.table.inverse(&mut rx);
            rx
        })
        .collect();

    // CRT recombination: z ≡ r_l (mod q_l) for all lanes, centered mod Πq_l.
    let mut modulus = BigInt::one();
    for lane in lanes {
        modulus *= &lane.q_big;
    }
    let basis: Vec<BigInt> = lanes
        .iter()
        .map(|lane| {
            let m_l = &modulus / &lane.q_big;
            let m_l_mod = (&m_l % &lane.q_big).to_u64().expect("residue fits in u64");
            &m_l * ntt::mod_inv(m_l_mod, lane.table.q)
        })
        .collect();

    let coeffs: Vec<BigInt> = (0..n)
        .into_par_iter()
        .map(|k| {
            let mut acc = BigInt::zero();
            for (l, lane_residues) in residues.iter().enumerate() {
                acc += &basis[l] * lane_residues[k];
            }
            let mut r = acc.mod_floor(&modulus);
            if &r + &r > modulus {
                r -= &modulus;
            }
            r
        })
        .collect();

    Polynomial::from_coeffs(coeffs)
}

/// Lane capacity needed for an exact product of operands with the given
/// coefficient bit-lengths: |z_k| ≤ N · max|x| · max|y|, plus sign headroom.
fn required_bits(n: usize, x_bits: u64, y_bits: u64) -> u64 {
    x_bits + y_bits + (usize::BITS - n.leading_zeros()) as u64 + 2
}

/// Fast integer negacyclic multiplier with a demand-grown lane pool.
#[derive(Debug)]
pub struct ZMultiplier {
    n: usize,
    pool: RwLock<LanePool>,
}

impl ZMultiplier {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            pool: RwLock::new(LanePool::new()),
        }
    }

    /// Exact product in Z[X]/(X^N + 1).
    pub fn mul(&self, x: &Polynomial, y: &Polynomial) -> Polynomial {
        assert_eq!(x.dim(), self.n, "polynomial dimension mismatch");
        assert_eq!(y.dim(), self.n, "polynomial dimension mismatch");

        let (x_bits, y_bits) = (x.max_coeff_bits(), y.max_coeff_bits());
        if x_bits == 0 || y_bits == 0 {
            return Polynomial::new(self.n);
        }
        let lanes = self.lanes_for(required_bits(self.n, x_bits, y_bits));
        mul_exact(&lanes, x, y)
    }

    /// A lane prefix with at least `min_bits` of capacity, growing the shared
    /// pool if necessary.
    fn lanes_for(&self, min_bits: u64) -> Vec<Arc<Lane>> {
        {
            let pool = self.pool.read().expect("lane pool poisoned");
            if total_bits(&pool.lanes) >= min_bits {
                return prefix_with_bits(&pool.lanes, min_bits);
            }
        }
        let mut pool = self.pool.write().expect("lane pool poisoned");
        pool.grow(self.n, min_bits);
        prefix_with_bits(&pool.lanes, min_bits)
    }
}

/// Shortest pool prefix whose capacity reaches `min_bits`.
fn prefix_with_bits(lanes: &[Arc<Lane>], min_bits: u64) -> Vec<Arc<Lane>> {
    let mut acc = 0u64;
    let mut out = Vec::new();
    for lane in lanes {
        out.push(Arc::clone(lane));
        acc += lane.table.q.ilog2() as u64;
        if acc >= min_bits {
            break;
        }
    }
    out
}

/// Negacyclic multiplier for the modulus chain q_0 · p^l. The lane set is
/// fixed at construction, sized for operands centered modulo the top chain
/// member q_0 · p^L; products are computed exactly and then reduced centered
/// modulo the requested chain member.
#[derive(Debug)]
pub struct CrtMultiplier {
    n: usize,
    lanes: Vec<Arc<Lane>>,
}

impl CrtMultiplier {
    pub fn new(n: usize, p: &BigInt, q0: &BigInt, depth: usize) -> Self {
        let top_modulus = q0 * Pow::pow(p, depth);
        let min_bits = required_bits(n, top_modulus.bits(), top_modulus.bits());
        let mut pool = LanePool::new();
        pool.grow(n, min_bits);
        Self {
            n,
            lanes: pool.lanes,
        }
    }

    /// Negacyclic product reduced centered modulo `modulus` (a chain member).
    pub fn mul(&self, x: &Polynomial, y: &Polynomial, modulus: &BigInt) -> Polynomial {
        assert_eq!(x.dim(), self.n, "polynomial dimension mismatch");
        assert_eq!(y.dim(), self.n, "polynomial dimension mismatch");

        let mut z = mul_exact(&self.lanes, x, y);
        z.reduce(modulus);
        z
    }
}
