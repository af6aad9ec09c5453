//! Negacyclic ring layer: polynomials in Z[X]/(X^N + 1) with big-integer
//! coefficients, the coefficient distributions of the scheme, RLWE prime
//! sampling, and two exact multipliers (plain integer and CRT-accelerated
//! over the modulus chain).

mod multiplier;
mod ntt;
mod poly;
mod prime;
mod sampling;

pub use multiplier::{CrtMultiplier, ZMultiplier};
pub use poly::{add, l1_distance, mul_simple, round_div, sub, Polynomial};
pub use prime::rlwe_prime;
pub use sampling::{dg, hwt, uniform_mod, zo};
