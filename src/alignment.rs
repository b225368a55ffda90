//! Phrase → acronym alignment: sample characters, build costs, solve.

use crate::config::AlignmentParams;
use crate::cost::{blend, character_cost, position_cost};
use crate::distribution::uniform;
use crate::solver::{TransportSolver, UnbalancedSinkhorn};
use crate::text::{acronym_chars, SourcePolicy};
use crate::{Error, Result};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Minimum plan entry for a [`Mapping`] to count as significant.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.01;

/// One source character sending mass to one acronym character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapping {
    pub source_index: usize,
    pub source_char: char,
    pub target_index: usize,
    pub target_char: char,
    pub weight: f64,
}

/// Everything computed for one phrase/acronym pair.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Phrase as given.
    pub phrase: String,
    /// Acronym as given.
    pub acronym: String,
    /// How `source_chars` was sampled from `phrase`.
    pub policy: SourcePolicy,
    pub source_chars: Vec<char>,
    pub target_chars: Vec<char>,
    pub source_distribution: Array1<f64>,
    pub target_distribution: Array1<f64>,
    /// Ground cost (|source| × |target|).
    pub cost: Array2<f64>,
    /// Transport plan (|source| × |target|).
    pub plan: Array2<f64>,
}

impl Alignment {
    /// Total transported mass. At most 1 under relaxed marginals.
    pub fn total_mass(&self) -> f64 {
        self.plan.sum()
    }

    /// The source characters as a string (the phrase without whitespace, or its
    /// word initials).
    pub fn source_text(&self) -> String {
        self.source_chars.iter().collect()
    }

    /// `<C, P>`: cost actually paid by the plan.
    pub fn transport_cost(&self) -> f64 {
        self.cost
            .iter()
            .zip(self.plan.iter())
            .map(|(&c, &p)| c * p)
            .sum()
    }

    /// Every plan entry strictly above `threshold`, in row-major order.
    pub fn mappings(&self, threshold: f64) -> Vec<Mapping> {
        self.plan
            .indexed_iter()
            .filter(|&(_, &w)| w > threshold)
            .map(|((i, j), &w)| Mapping {
                source_index: i,
                source_char: self.source_chars[i],
                target_index: j,
                target_char: self.target_chars[j],
                weight: w,
            })
            .collect()
    }
}

/// Align every non-whitespace character of `phrase` with `acronym`.
///
/// Cost is `blend(position, character, params.alpha)`.
pub fn align_characters<S>(
    phrase: &str,
    acronym: &str,
    params: &AlignmentParams,
    solver: &S,
) -> Result<Alignment>
where
    S: TransportSolver + ?Sized,
{
    align(phrase, acronym, SourcePolicy::Characters, params, solver)
}

/// Align the word initials of `phrase` with `acronym`.
///
/// Cost is the character cost alone; `params.alpha` is ignored.
pub fn align_word_initials<S>(
    phrase: &str,
    acronym: &str,
    params: &AlignmentParams,
    solver: &S,
) -> Result<Alignment>
where
    S: TransportSolver + ?Sized,
{
    align(phrase, acronym, SourcePolicy::WordInitials, params, solver)
}

/// [`align_characters`] with the default [`UnbalancedSinkhorn`].
pub fn phrase_to_acronym(phrase: &str, acronym: &str, params: &AlignmentParams) -> Result<Alignment> {
    align_characters(phrase, acronym, params, &UnbalancedSinkhorn::default())
}

/// [`align_word_initials`] with the default [`UnbalancedSinkhorn`].
pub fn acronym_mapping(phrase: &str, acronym: &str, params: &AlignmentParams) -> Result<Alignment> {
    align_word_initials(phrase, acronym, params, &UnbalancedSinkhorn::default())
}

fn align<S>(
    phrase: &str,
    acronym: &str,
    policy: SourcePolicy,
    params: &AlignmentParams,
    solver: &S,
) -> Result<Alignment>
where
    S: TransportSolver + ?Sized,
{
    let source_chars = policy.sample(phrase);
    let target_chars = acronym_chars(acronym);

    let source_distribution = uniform(source_chars.len(), "phrase")?;
    let target_distribution = uniform(target_chars.len(), "acronym")?;

    let cost = match policy {
        SourcePolicy::Characters => blend(
            &position_cost(source_chars.len(), target_chars.len()),
            &character_cost(&source_chars, &target_chars),
            params.alpha,
        )?,
        SourcePolicy::WordInitials => character_cost(&source_chars, &target_chars),
    };

    let plan = solver.solve(
        &source_distribution,
        &target_distribution,
        &cost,
        params.reg,
        params.reg_m,
    )?;
    if plan.dim() != cost.dim() {
        let (m, n) = cost.dim();
        return Err(Error::CostShapeMismatch(m, n, plan.nrows(), plan.ncols()));
    }

    debug!(
        phrase,
        acronym,
        ?policy,
        sources = source_chars.len(),
        targets = target_chars.len(),
        mass = plan.sum(),
        "aligned phrase to acronym"
    );

    Ok(Alignment {
        phrase: phrase.to_string(),
        acronym: acronym.to_string(),
        policy,
        source_chars,
        target_chars,
        source_distribution,
        target_distribution,
        cost,
        plan,
    })
}
