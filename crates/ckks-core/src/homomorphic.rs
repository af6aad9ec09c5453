//! Homomorphic operations: addition, relinearized multiplication, rescaling
//! and level equalization.

use num_traits::Pow;

use crate::ciphertext::Ciphertext;
use crate::error::CkksError;
use crate::instance::Instance;
use crate::key::EvaluationKey;
use crate::negacyclic;

impl Instance {
    /// Homomorphic addition of c1 and c2. Levels are equalized first, which
    /// rescales (and therefore mutates) the higher-level argument.
    pub fn add(&self, c1: &mut Ciphertext, c2: &mut Ciphertext) -> Ciphertext {
        self.equalize(c1, c2);
        let modulus = c1.ql.clone();

        let (a, b) = rayon::join(
            || {
                let mut a = negacyclic::add(&c1.a, &c2.a);
                a.reduce(&modulus);
                a
            },
            || {
                let mut b = negacyclic::add(&c1.b, &c2.b);
                b.reduce(&modulus);
                b
            },
        );

        Ciphertext {
            a,
            b,
            level: c1.level,
            ql: modulus,
        }
    }

    /// Homomorphic multiplication: a ciphertext that decrypts to the
    /// negacyclic product of what c1 and c2 decrypt to, relinearized through
    /// the evaluation key. Levels are equalized first.
    ///
    /// The scale of the result is the product of the input scales; rescaling
    /// is left to the caller (`rs`) so Δ can be kept bounded between
    /// multiplications. The error channel is reserved for forward
    /// compatibility and never fires today.
    pub fn mul(
        &self,
        evk: &EvaluationKey,
        c1: &mut Ciphertext,
        c2: &mut Ciphertext,
    ) -> Result<Ciphertext, CkksError> {
        self.equalize(c1, c2);
        let level = c1.level;
        let modulus = c1.ql.clone();

        // Tensor product (b1·b2, a1·b2 + a2·b1, a1·a2), each mod q_l.
        let ((d0, d1), d2) = rayon::join(
            || {
                rayon::join(
                    || self.multiplier.mul(&c1.b, &c2.b, &modulus),
                    || {
                        let mut d1 = negacyclic::add(
                            &self.multiplier.mul(&c1.a, &c2.b, &modulus),
                            &self.multiplier.mul(&c2.a, &c1.b, &modulus),
                        );
                        d1.reduce(&modulus);
                        d1
                    },
                )
            },
            || self.multiplier.mul(&c1.a, &c2.a, &modulus),
        );

        // Key-switch the quadratic term: ⌊d2·evk / P⌉, products over the
        // integers without intermediate reduction.
        let (e_a, e_b) = rayon::join(
            || self.z_multiplier.mul(&d2, &evk.a).scale_nearest(&self.p_ev),
            || self.z_multiplier.mul(&d2, &evk.b).scale_nearest(&self.p_ev),
        );

        let mut a = negacyclic::add(&d1, &e_a);
        a.reduce(&modulus);
        let mut b = negacyclic::add(&d0, &e_b);
        b.reduce(&modulus);

        Ok(Ciphertext {
            a,
            b,
            level,
            ql: modulus,
        })
    }

    /// Rescale the ciphertext down to the intended level, dividing its
    /// components by p^δ with nearest rounding and shrinking the modulus by
    /// the same factor. Does nothing if the ciphertext is already at or below
    /// the level.
    ///
    /// Each application divides the encrypted message by p; a caller decoding
    /// after k rescales multiplies the decrypted coefficients by p^k (or
    /// folds p^k into Δ) to compensate.
    pub fn rs(&self, ciph: &mut Ciphertext, level: usize) {
        if ciph.level <= level {
            return;
        }
        let delta = (ciph.level - level) as u32;
        let denom = Pow::pow(&self.p, delta);
        let modulus = &ciph.ql / &denom;

        ciph.a = ciph.a.scale_nearest(&denom);
        ciph.a.reduce(&modulus);
        ciph.b = ciph.b.scale_nearest(&denom);
        ciph.b.reduce(&modulus);
        ciph.level = level;
        ciph.ql = modulus;
    }

    /// Bring two ciphertexts to a common level by rescaling the higher-level
    /// one down to the other. Mutates the concerned ciphertext.
    pub fn equalize(&self, c1: &mut Ciphertext, c2: &mut Ciphertext) {
        if c1.level == c2.level {
            return;
        }
        if c1.level > c2.level {
            self.rs(c1, c2.level);
        } else {
            self.rs(c2, c1.level);
        }
    }
}
