//! Plaintext and ciphertext containers, RLWE encryption and decryption.

use std::fmt;

use num_bigint::BigInt;
use rand::Rng;

use crate::instance::Instance;
use crate::key::{PublicKey, SecretKey};
use crate::negacyclic::{self, Polynomial};

/// A native plaintext of the scheme, post encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plaintext {
    pub(crate) m: Polynomial,
}

impl Plaintext {
    /// Wrap a ring element as a plaintext.
    pub fn from_polynomial(m: Polynomial) -> Self {
        Self { m }
    }

    /// The underlying ring element.
    pub fn polynomial(&self) -> &Polynomial {
        &self.m
    }
}

/// An RLWE ciphertext (a, b) tagged with the information needed for noise
/// management: its level and the matching chain modulus q_l = q0·p^level.
#[derive(Debug, Clone)]
pub struct Ciphertext {
    pub(crate) a: Polynomial,
    pub(crate) b: Polynomial,
    pub(crate) level: usize,
    pub(crate) ql: BigInt,
}

impl Ciphertext {
    /// The circuit level of this ciphertext.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The modulus associated to the level of this ciphertext.
    pub fn modulus(&self) -> BigInt {
        self.ql.clone()
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- BEGIN CIPHERTEXT -----")?;
        writeln!(f, "level:    {}", self.level)?;
        writeln!(f, "modulus:  {}", self.ql)?;
        writeln!(f, "a[0]:     {}", self.a.coeffs[0])?;
        writeln!(f, "b[0]:     {}", self.b.coeffs[0])?;
        writeln!(f, "----- END CIPHERTEXT -----")
    }
}

impl Instance {
    /// Encrypt a native plaintext to the given public key. The result is a
    /// fresh level-L ciphertext modulo q_L.
    pub fn encrypt<R: Rng>(&self, pk: &PublicKey, plt: &Plaintext, rng: &mut R) -> Ciphertext {
        let n = self.params.n;
        let modulus = self.first_modulus();

        // Randomness is drawn before the fork; the two ring products run in
        // parallel and each branch owns its output.
        let v = negacyclic::zo(rng, n, 0.5);
        let e0 = negacyclic::dg(rng, n, self.params.sigma);
        let e1 = negacyclic::dg(rng, n, self.params.sigma);

        let (c0, c1) = rayon::join(
            || {
                // c0 = b·v + e0 + m
                let mut c0 = negacyclic::add(
                    &negacyclic::add(&self.z_multiplier.mul(&pk.b, &v), &e0),
                    plt.polynomial(),
                );
                c0.reduce(&modulus);
                c0
            },
            || {
                // c1 = a·v + e1
                let mut c1 = negacyclic::add(&self.z_multiplier.mul(&pk.a, &v), &e1);
                c1.reduce(&modulus);
                c1
            },
        );

        Ciphertext {
            b: c0,
            a: c1,
            level: self.params.depth,
            ql: modulus,
        }
    }

    /// Decrypt the ciphertext with the given secret key. The caller is
    /// responsible for checking the advisory noise bounds.
    pub fn decrypt(&self, sk: &SecretKey, ciph: &Ciphertext) -> Plaintext {
        let mut m = negacyclic::add(&negacyclic::mul_simple(&ciph.a, &sk.s), &ciph.b);
        m.reduce(&ciph.ql);
        Plaintext { m }
    }
}
