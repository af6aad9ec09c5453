//! The closed error set of the engine.
//!
//! Everything is returned to the caller; nothing is recovered internally.
//! Panics are reserved for invariant violations (dimension mismatches) that
//! indicate programmer error rather than bad input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CkksError {
    /// Parameters fail structural checks. Fatal at instance construction.
    #[error("bad parameters: {0}")]
    BadParameters(String),
    /// Warning class: the instance is valid but offers no meaningful
    /// security. The caller decides whether to proceed.
    #[error("warning: insecure parameters")]
    InsecureParameters,
    /// The input vector and the instance are incompatible.
    #[error("input vector and instance are incompatible")]
    BadEncoding,
    /// A homomorphic operation would drive the level below zero. Reserved for
    /// automatic rescale chains; plain `rs` targets are unsigned.
    #[error("homomorphic level overflow")]
    LevelOverflow,
    /// Reserved for future ciphertext variants.
    #[error("incompatible ciphertexts")]
    IncompatibleCiphertexts,
    /// Reserved for key validation paths.
    #[error("inconsistent key")]
    InconsistentKey,
}
