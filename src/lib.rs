//! # acronym-uot
//!
//! Unbalanced optimal transport from a phrase onto its acronym.
//!
//! ## The Problem
//!
//! "Unbalanced Optimal Transport" has 26 letters, "UOT" has three. Which letters
//! of the phrase does each acronym letter come from? Treat both as uniform
//! distributions over their characters and move mass between them at minimum
//! cost. Most phrase letters have nowhere sensible to go, so the marginals are
//! *relaxed*: mass may be destroyed instead of transported.
//!
//! ## Key Functions
//!
//! | Function | Use Case |
//! |----------|----------|
//! | [`align_characters`] | Every phrase character against the acronym (blended cost) |
//! | [`align_word_initials`] | Word initials against the acronym (character cost) |
//! | [`cost::character_cost`] | 0/1 case-insensitive match cost |
//! | [`cost::position_cost`] | Squared relative-position distance |
//! | [`UnbalancedSinkhorn`] | Default [`TransportSolver`] (log-domain scaling) |
//! | [`report::render_transport`] | Human-readable per-character breakdown |
//!
//! ## Quick Start
//!
//! ```rust
//! use acronym_uot::{acronym_mapping, AlignmentParams, SIGNIFICANCE_THRESHOLD};
//!
//! let params = AlignmentParams::default();
//! let alignment = acronym_mapping("Natural Language Processing", "NLP", &params).unwrap();
//!
//! assert_eq!(alignment.source_chars, vec!['N', 'L', 'P']);
//! assert!(alignment.total_mass() <= 1.0);
//! for m in alignment.mappings(SIGNIFICANCE_THRESHOLD) {
//!     println!("{} -> {}: {:.4}", m.source_char, m.target_char, m.weight);
//! }
//! ```
//!
//! ## What Can Go Wrong
//!
//! 1. **Empty phrase or acronym**: no distribution exists; [`Error::EmptySequence`].
//! 2. **Tiny `reg`**: the kernel `exp(-C/reg)` spans many orders of magnitude.
//!    The solver runs in log space, but convergence slows down.
//! 3. **Large `reg_m`**: marginals become nearly hard constraints and the scaling
//!    exponent `reg_m/(reg_m+reg)` approaches 1, so more iterations are needed.
//!
//! ## References
//!
//! - Chizat, Peyré, Schmitzer, Vialard (2018). "Scaling Algorithms for Unbalanced
//!   Optimal Transport Problems"
//! - Frogner et al. (2015). "Learning with a Wasserstein Loss"

use thiserror::Error;

pub mod alignment;
pub mod config;
pub mod cost;
pub mod distribution;
#[cfg(feature = "cli")]
pub mod logging;
pub mod report;
pub mod solver;
pub mod text;

pub use alignment::{
    acronym_mapping, align_characters, align_word_initials, phrase_to_acronym, Alignment,
    Mapping, SIGNIFICANCE_THRESHOLD,
};
pub use config::{AlignmentParams, PhrasePair};
pub use solver::{Reference, SinkhornConfig, TransportSolver, UnbalancedSinkhorn};
pub use text::SourcePolicy;

/// Error variants for acronym alignment.
#[derive(Debug, Error)]
pub enum Error {
    /// A phrase or acronym produced no characters to transport.
    #[error("{0} has no characters to transport")]
    EmptySequence(&'static str),

    /// Cost matrix shape mismatch.
    #[error("cost matrix shape mismatch: expected ({0}, {1}), got ({2}, {3})")]
    CostShapeMismatch(usize, usize, usize, usize),

    /// Blend weight outside `[0, 1]`.
    #[error("blend weight must lie in [0, 1], got {0}")]
    InvalidBlendWeight(f64),

    /// Invalid entropic regularization parameter.
    #[error("regularization parameter must be positive and finite, got {0}")]
    InvalidRegularization(f64),

    /// Invalid mass-variation penalty parameter for unbalanced OT.
    #[error("mass penalty parameter must be positive and finite, got {0}")]
    InvalidMassPenalty(f64),

    /// Sinkhorn algorithm did not converge within the iteration limit.
    #[error("Sinkhorn did not converge in {0} iterations")]
    SinkhornNotConverged(usize),

    /// Scaling vectors became NaN or infinite.
    #[error("Sinkhorn scalings became non-finite at iteration {0}")]
    NumericalInstability(usize),

    /// Domain error (invalid inputs for the mathematical definition).
    #[error("{0}")]
    Domain(&'static str),

    /// A `PHRASE=ACRONYM` pair could not be parsed.
    #[error("invalid phrase pair {0:?}: expected `PHRASE=ACRONYM` or `PHRASE`")]
    InvalidPair(String),
}

/// Result type for acronym alignment.
pub type Result<T> = std::result::Result<T, Error>;

/// Numerically stable \(\log \sum_i \exp(x_i)\) for an indexable family.
///
/// \[
/// \log \sum_i \exp(x_i) = m + \log \sum_i \exp(x_i - m), \quad m = \max_i x_i
/// \]
///
/// Returns `-∞` if `len == 0`.
#[inline]
pub(crate) fn logsumexp_by(len: usize, mut f: impl FnMut(usize) -> f64) -> f64 {
    if len == 0 {
        return f64::NEG_INFINITY;
    }

    let mut max_val = f64::NEG_INFINITY;
    for i in 0..len {
        max_val = max_val.max(f(i));
    }
    if !max_val.is_finite() {
        // All -inf (or NaN): nothing to rescale.
        return max_val;
    }

    let mut sum_exp = 0.0;
    for i in 0..len {
        sum_exp += (f(i) - max_val).exp();
    }
    max_val + sum_exp.ln()
}
