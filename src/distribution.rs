//! Mass vectors over source and target positions.

use crate::{Error, Result};
use ndarray::Array1;

/// Uniform distribution over `n` positions: every entry is `1/n`.
///
/// `what` names the sequence in the error when `n == 0`.
pub fn uniform(n: usize, what: &'static str) -> Result<Array1<f64>> {
    if n == 0 {
        return Err(Error::EmptySequence(what));
    }
    Ok(Array1::from_elem(n, 1.0 / n as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sums_to_one() {
        for n in [1usize, 2, 3, 7, 26] {
            let d = uniform(n, "test").unwrap();
            assert_eq!(d.len(), n);
            assert!((d.sum() - 1.0).abs() < 1e-12, "n={} sum={}", n, d.sum());
            assert!(d.iter().all(|&x| x == d[0]));
        }
    }

    #[test]
    fn uniform_rejects_empty() {
        let err = uniform(0, "acronym").unwrap_err();
        assert!(matches!(err, Error::EmptySequence("acronym")));
        assert_eq!(err.to_string(), "acronym has no characters to transport");
    }
}
