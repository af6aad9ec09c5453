//! Key material: sparse ternary secret, RLWE public key, and the evaluation
//! key used to relinearize ciphertext products.

use rand::Rng;
use tracing::debug;

use crate::instance::Instance;
use crate::negacyclic::{self, Polynomial};

/// Sparse ternary secret s with a fixed Hamming weight.
#[derive(Debug, Clone)]
pub struct SecretKey {
    pub(crate) s: Polynomial,
}

/// RLWE public key (b, a) with b = -a·s + e (mod q_L).
#[derive(Debug, Clone)]
pub struct PublicKey {
    pub(crate) b: Polynomial,
    pub(crate) a: Polynomial,
}

/// Evaluation key (b', a') with b' = -a'·s + e' + P·s² (mod P·q_L): an
/// encryption of s² under the auxiliary modulus P, consumed by `mul`.
#[derive(Debug, Clone)]
pub struct EvaluationKey {
    pub(crate) b: Polynomial,
    pub(crate) a: Polynomial,
}

/// The key bundle of one user.
#[derive(Debug, Clone)]
pub struct Key {
    pub secret: SecretKey,
    pub public: PublicKey,
    pub evaluation: EvaluationKey,
}

impl Instance {
    /// Generate a fresh key bundle.
    pub fn generate_key<R: Rng>(&self, rng: &mut R) -> Key {
        let n = self.params.n;
        let q_l = self.first_modulus();

        let s = negacyclic::hwt(rng, n, self.params.hamming);

        // Public key: b = e - a·s (mod q_L), a uniform.
        let a = negacyclic::uniform_mod(rng, n, &q_l);
        let e = negacyclic::dg(rng, n, self.params.sigma);
        let a_s = self.multiplier.mul(&a, &s, &q_l);
        let mut b = negacyclic::sub(&e, &a_s);
        b.reduce(&q_l);

        // Evaluation key, modulo P·q_L: b' = e' - a'·s + P·s², with the
        // products taken over the integers before reduction.
        let ev_modulus = &self.p_ev * &q_l;
        let a_ev = negacyclic::uniform_mod(rng, n, &ev_modulus);
        let e_ev = negacyclic::dg(rng, n, self.params.sigma);
        let s_squared = self.z_multiplier.mul(&s, &s);
        let a_ev_s = self.z_multiplier.mul(&a_ev, &s);
        let mut b_ev = negacyclic::add(&negacyclic::sub(&e_ev, &a_ev_s), &s_squared.scale(&self.p_ev));
        b_ev.reduce(&ev_modulus);
        debug!(hamming = self.params.hamming, "generated key bundle");

        Key {
            secret: SecretKey { s },
            public: PublicKey { b, a },
            evaluation: EvaluationKey { b: b_ev, a: a_ev },
        }
    }
}
