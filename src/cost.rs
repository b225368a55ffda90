//! Ground costs between phrase characters and acronym characters.
//!
//! Two interchangeable costs, both `m × n` with entries in `[0, 1]`:
//!
//! - [`position_cost`]: where a character sits, relative to its sequence length.
//! - [`character_cost`]: whether two characters are the same letter.
//!
//! [`blend`] mixes them linearly.

use crate::{Error, Result};
use ndarray::Array2;

/// Squared distance between relative positions.
///
/// Index `i` of the source maps to `i / max(m - 1, 1)`, index `j` of the target to
/// `j / max(n - 1, 1)`, and
///
/// C[i,j] = (i/(m-1) - j/(n-1))²
///
/// A single-element axis maps to position 0.
pub fn position_cost(source_len: usize, target_len: usize) -> Array2<f64> {
    let source_scale = source_len.saturating_sub(1).max(1) as f64;
    let target_scale = target_len.saturating_sub(1).max(1) as f64;

    Array2::from_shape_fn((source_len, target_len), |(i, j)| {
        let diff = i as f64 / source_scale - j as f64 / target_scale;
        diff * diff
    })
}

/// 0/1 match cost: `0.0` where the characters agree ignoring case, `1.0` otherwise.
pub fn character_cost(source: &[char], target: &[char]) -> Array2<f64> {
    Array2::from_shape_fn((source.len(), target.len()), |(i, j)| {
        if same_letter(source[i], target[j]) {
            0.0
        } else {
            1.0
        }
    })
}

/// Case-insensitive comparison via full Unicode uppercase mapping.
pub fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase())
}

/// Linear blend `alpha * pos + (1 - alpha) * chars`.
///
/// `pos` is first rescaled by its maximum so both terms live in `[0, 1]`; an
/// all-zero `pos` is left as is.
///
/// `alpha = 0` is pure character matching, `alpha = 1` pure position.
pub fn blend(pos: &Array2<f64>, chars: &Array2<f64>, alpha: f64) -> Result<Array2<f64>> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(Error::InvalidBlendWeight(alpha));
    }
    if pos.dim() != chars.dim() {
        let (m, n) = pos.dim();
        return Err(Error::CostShapeMismatch(m, n, chars.nrows(), chars.ncols()));
    }

    let max = pos.iter().copied().fold(0.0f64, f64::max);
    let scaled = if max > 0.0 { pos / max } else { pos.clone() };

    Ok(scaled * alpha + chars * (1.0 - alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn character_cost_identity_has_zero_diagonal() {
        let s = ['A', 'B', 'C'];
        let cost = character_cost(&s, &s);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 0.0 } else { 1.0 };
                assert_eq!(cost[[i, j]], expected, "({i}, {j})");
            }
        }
    }

    #[test]
    fn character_cost_ignores_case() {
        let cost = character_cost(&['a', 'B'], &['A', 'b']);
        assert_eq!(cost[[0, 0]], 0.0);
        assert_eq!(cost[[1, 1]], 0.0);
        assert_eq!(cost[[0, 1]], 1.0);
    }

    #[test]
    fn character_cost_uses_full_uppercase_mapping() {
        assert!(same_letter('ß', 'ß'));
        assert!(!same_letter('ß', 'S'));
        assert!(same_letter('é', 'É'));
    }

    #[test]
    fn position_cost_endpoints_align() {
        let cost = position_cost(5, 3);
        assert_eq!(cost.dim(), (5, 3));
        // first↔first, middle↔middle, last↔last
        assert!(cost[[0, 0]].abs() < 1e-12);
        assert!(cost[[2, 1]].abs() < 1e-12);
        assert!(cost[[4, 2]].abs() < 1e-12);
        assert!((cost[[0, 2]] - 1.0).abs() < 1e-12);
        assert!((cost[[1, 0]] - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn position_cost_single_element_axis_is_zero_position() {
        let cost = position_cost(1, 3);
        assert!(cost[[0, 0]].abs() < 1e-12);
        assert!((cost[[0, 1]] - 0.25).abs() < 1e-12);
        assert!((cost[[0, 2]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn blend_extremes_select_one_cost() {
        let pos = position_cost(4, 2);
        let chars = character_cost(&['a', 'b', 'c', 'd'], &['a', 'd']);

        let only_chars = blend(&pos, &chars, 0.0).unwrap();
        assert_eq!(only_chars, chars);

        let only_pos = blend(&pos, &chars, 1.0).unwrap();
        let max = pos.iter().copied().fold(0.0, f64::max);
        for (&b, &p) in only_pos.iter().zip(pos.iter()) {
            assert!((b - p / max).abs() < 1e-12);
        }
    }

    #[test]
    fn blend_leaves_all_zero_position_cost_alone() {
        let pos = position_cost(1, 1);
        let chars = character_cost(&['x'], &['y']);
        let cost = blend(&pos, &chars, 0.5).unwrap();
        assert!((cost[[0, 0]] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn blend_rejects_out_of_range_alpha() {
        let pos = position_cost(2, 2);
        let chars = character_cost(&['a', 'b'], &['a', 'b']);
        assert!(matches!(blend(&pos, &chars, -0.1), Err(Error::InvalidBlendWeight(_))));
        assert!(matches!(blend(&pos, &chars, 1.5), Err(Error::InvalidBlendWeight(_))));
        assert!(matches!(blend(&pos, &chars, f64::NAN), Err(Error::InvalidBlendWeight(_))));
    }

    #[test]
    fn blend_rejects_shape_mismatch() {
        let pos = position_cost(3, 2);
        let chars = character_cost(&['a', 'b'], &['a', 'b']);
        assert!(matches!(
            blend(&pos, &chars, 0.5),
            Err(Error::CostShapeMismatch(3, 2, 2, 2))
        ));
    }

    proptest! {
        #[test]
        fn position_cost_is_bounded(m in 1usize..40, n in 1usize..40) {
            let cost = position_cost(m, n);
            prop_assert_eq!(cost.dim(), (m, n));
            for &c in cost.iter() {
                prop_assert!((0.0..=1.0).contains(&c));
            }
        }

        #[test]
        fn blended_cost_stays_in_unit_interval(
            src in "[a-zA-Z]{1,20}",
            tgt in "[a-zA-Z]{1,6}",
            alpha in 0.0f64..=1.0,
        ) {
            let s: Vec<char> = src.chars().collect();
            let t: Vec<char> = tgt.chars().collect();
            let cost = blend(&position_cost(s.len(), t.len()), &character_cost(&s, &t), alpha).unwrap();
            for &c in cost.iter() {
                prop_assert!(c >= 0.0 && c <= 1.0 + 1e-12);
            }
        }
    }
}
