//! Hyperparameters and the built-in demonstration inputs.

use crate::text::derive_acronym;
use crate::Error;
use std::fmt;
use std::str::FromStr;

/// Hyperparameters of one alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentParams {
    /// Entropic regularization ε. Smaller = sharper plan.
    pub reg: f64,
    /// Marginal relaxation ρ. Smaller = more mass may be destroyed.
    pub reg_m: f64,
    /// Weight of the position cost against the character cost, in `[0, 1]`.
    /// `0` is pure character matching, `1` pure relative position.
    pub alpha: f64,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        Self {
            reg: 0.1,
            reg_m: 1.0,
            alpha: 0.5,
        }
    }
}

impl AlignmentParams {
    pub fn with_reg(mut self, reg: f64) -> Self {
        self.reg = reg;
        self
    }

    pub fn with_reg_m(mut self, reg_m: f64) -> Self {
        self.reg_m = reg_m;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// A phrase and the acronym it should map onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePair {
    pub phrase: String,
    pub acronym: String,
}

impl PhrasePair {
    pub fn new(phrase: impl Into<String>, acronym: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            acronym: acronym.into(),
        }
    }

    /// Build owned pairs from a static table such as [`DEMO_PAIRS`].
    pub fn from_table(table: &[(&str, &str)]) -> Vec<Self> {
        table.iter().map(|&(p, a)| Self::new(p, a)).collect()
    }
}

/// Parses `PHRASE=ACRONYM`; a bare `PHRASE` gets its uppercased word initials.
impl FromStr for PhrasePair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (phrase, acronym) = match s.rsplit_once('=') {
            Some((phrase, acronym)) => (phrase.trim(), acronym.trim().to_string()),
            None => (s.trim(), derive_acronym(s)),
        };
        if phrase.is_empty() || acronym.is_empty() {
            return Err(Error::InvalidPair(s.to_string()));
        }
        Ok(Self::new(phrase, acronym))
    }
}

impl fmt::Display for PhrasePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.phrase, self.acronym)
    }
}

/// Pairs shown by the character-level demo.
pub const DEMO_PAIRS: [(&str, &str); 4] = [
    ("Unbalanced Optimal Transport", "UOT"),
    ("Natural Language Processing", "NLP"),
    ("Artificial Intelligence", "AI"),
    ("Machine Learning", "ML"),
];

/// Pairs shown by the word-initial demo.
pub const SHORTENING_PAIRS: [(&str, &str); 8] = [
    ("Artificial Intelligence", "AI"),
    ("Machine Learning", "ML"),
    ("Natural Language Processing", "NLP"),
    ("Application Programming Interface", "API"),
    ("Unbalanced Optimal Transport", "UOT"),
    ("Central Processing Unit", "CPU"),
    ("Graphics Processing Unit", "GPU"),
    ("Random Access Memory", "RAM"),
];

/// `reg_m` values of the marginal-relaxation sweep.
pub const MASS_SWEEP: [f64; 4] = [0.1, 0.5, 1.0, 5.0];

/// Hyperparameters of the character-level demo: favor character matching,
/// allow a lot of mass to be destroyed.
pub fn demo_params() -> AlignmentParams {
    AlignmentParams::default().with_reg_m(0.5).with_alpha(0.3)
}
