//! User-supplied parameter bundle.

use std::fmt;

use crate::error::CkksError;

/// Parameters of the scheme, immutable once validated by `Instance::new`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Dimension of the cyclotomic ring; must be a power of two.
    pub n: usize,
    /// Maximum allowed homomorphic depth, at least 1.
    pub depth: usize,
    /// Target bit-length of the rescaling prime p.
    pub bit_len_p: usize,
    /// Target bit-length of the base modulus q0.
    pub bit_len_q: usize,
    /// Hamming weight of the ternary secret.
    pub hamming: usize,
    /// Standard deviation for discrete Gaussian sampling.
    pub sigma: f64,
}

impl Parameters {
    /// Structural and security checks. A fatal problem is an `Err`; a
    /// passing-but-insecure parameter set yields `Ok(Some(warning))`.
    pub(crate) fn sanitize(&self) -> Result<Option<CkksError>, CkksError> {
        if self.n < 2 || !self.n.is_power_of_two() {
            return Err(CkksError::BadParameters(
                "ring dimension should be a power of 2".into(),
            ));
        }
        if self.depth == 0 {
            return Err(CkksError::BadParameters(
                "homomorphic depth must be at least 1".into(),
            ));
        }
        if self.n < self.hamming {
            return Err(CkksError::BadParameters(
                "hamming weight is incompatible with ring".into(),
            ));
        }
        if !(self.sigma >= 0.0) {
            return Err(CkksError::BadParameters(
                "gaussian width must be non-negative".into(),
            ));
        }
        if self.n < 1 << 8 || self.hamming < 64 {
            return Ok(Some(CkksError::InsecureParameters));
        }
        Ok(None)
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  N: {}", self.n)?;
        writeln!(f, "  Depth: {}", self.depth)?;
        writeln!(f, "  BitLen(p): {}", self.bit_len_p)?;
        writeln!(f, "  BitLen(q): {}", self.bit_len_q)?;
        writeln!(f, "  Hamming (secret key): {}", self.hamming)?;
        writeln!(f, "  Std.Dev (Gaussian sampling): {:.2}", self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Parameters {
        Parameters {
            n: 1 << 10,
            depth: 1,
            bit_len_p: 30,
            bit_len_q: 150,
            hamming: 64,
            sigma: 3.4,
        }
    }

    #[test]
    fn accepts_secure_parameters() {
        assert_eq!(base().sanitize(), Ok(None));
    }

    #[test]
    fn rejects_non_power_of_two_dimension() {
        let params = Parameters { n: 48, ..base() };
        assert!(matches!(
            params.sanitize(),
            Err(CkksError::BadParameters(_))
        ));
    }

    #[test]
    fn rejects_hamming_above_dimension() {
        let params = Parameters {
            n: 32,
            hamming: 64,
            ..base()
        };
        assert!(matches!(
            params.sanitize(),
            Err(CkksError::BadParameters(_))
        ));
    }

    #[test]
    fn rejects_zero_depth() {
        let params = Parameters { depth: 0, ..base() };
        assert!(matches!(
            params.sanitize(),
            Err(CkksError::BadParameters(_))
        ));
    }

    #[test]
    fn warns_on_small_dimension_or_weight() {
        let params = Parameters {
            n: 32,
            hamming: 2,
            ..base()
        };
        assert_eq!(params.sanitize(), Ok(Some(CkksError::InsecureParameters)));
    }

    #[test]
    fn display_reports_all_fields() {
        let s = base().to_string();
        for needle in ["N: 1024", "Depth: 1", "BitLen(p): 30", "Hamming"] {
            assert!(s.contains(needle), "missing {needle:?} in {s:?}");
        }
    }
}
