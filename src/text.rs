//! Which characters of a phrase take part in the transport.

/// How the source sequence is sampled from a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourcePolicy {
    /// Every character except whitespace.
    #[default]
    Characters,
    /// The first character of each whitespace-delimited word.
    WordInitials,
}

impl SourcePolicy {
    /// Extract the source characters of `phrase` under this policy.
    pub fn sample(self, phrase: &str) -> Vec<char> {
        match self {
            SourcePolicy::Characters => phrase.chars().filter(|c| !c.is_whitespace()).collect(),
            SourcePolicy::WordInitials => word_initials(phrase),
        }
    }
}

/// First character of every whitespace-delimited word.
pub fn word_initials(phrase: &str) -> Vec<char> {
    phrase
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Target characters: the acronym, one entry per character.
pub fn acronym_chars(acronym: &str) -> Vec<char> {
    acronym.chars().collect()
}

/// The acronym a phrase "should" have: uppercased word initials.
pub fn derive_acronym(phrase: &str) -> String {
    word_initials(phrase)
        .into_iter()
        .flat_map(char::to_uppercase)
        .collect()
}
