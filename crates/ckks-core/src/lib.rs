//! Leveled homomorphic encryption for approximate arithmetic on encrypted
//! complex vectors (CKKS).
//!
//! Implements the RLWE version of the scheme described in "Homomorphic
//! Encryption for Arithmetic of Approximate Numbers" by Jung Hee Cheon,
//! Andrey Kim, Miran Kim, and Yongsoo Song
//! (<https://eprint.iacr.org/2016/421.pdf>):
//!
//! - Encode/Decode between ℂ^{N/2} and Z[X]/(X^N+1) (canonical embedding)
//! - Key generation: sparse ternary secret, RLWE public key, evaluation key
//! - Encrypt/Decrypt
//! - Homomorphic Add and Mul (relinearized through the evaluation key)
//! - Rescale (RS) and level equalization over the modulus chain q0·p^l
//!
//! NOT implemented (by design):
//! - Bootstrapping: the multiplicative depth is fixed at instance creation
//! - Ciphertext serialization or any persistence format
//! - Rotation / Galois automorphisms
//!
//! The usual flow: build an [`Instance`] from [`Parameters`], generate a
//! [`Key`] bundle, [`Instance::encode`] a complex vector, encrypt it, operate
//! homomorphically, then decrypt and decode an approximation of the result.

pub mod ciphertext;
pub mod encoding;
pub mod error;
pub mod homomorphic;
pub mod instance;
pub mod key;
pub mod negacyclic;
pub mod params;

pub use ciphertext::{Ciphertext, Plaintext};
pub use error::CkksError;
pub use instance::Instance;
pub use key::{EvaluationKey, Key, PublicKey, SecretKey};
pub use params::Parameters;
