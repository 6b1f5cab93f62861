use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when parsing a stress pattern string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("invalid stress '{found}' at position {position}, expected one of 0, 1, 2")]
    InvalidStress { found: char, position: usize },
}

/// Stress carried by a single syllable, as marked on CMU vowels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stress {
    Unstressed,
    Primary,
    /// Secondary stress also acts as a wildcard when matching meter
    Secondary,
}

impl Stress {
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Stress::Unstressed),
            '1' => Some(Stress::Primary),
            '2' => Some(Stress::Secondary),
            _ => None,
        }
    }

    pub fn as_digit(self) -> char {
        match self {
            Stress::Unstressed => '0',
            Stress::Primary => '1',
            Stress::Secondary => '2',
        }
    }

    /// Two stresses are compatible if equal or if either is secondary
    #[inline]
    pub fn compatible(self, other: Stress) -> bool {
        self == Stress::Secondary || other == Stress::Secondary || self == other
    }
}

/// Metrical pattern of a word or line, e.g. `0101010101` for iambic pentameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StressPattern(Vec<Stress>);

impl StressPattern {
    pub fn new(stresses: Vec<Stress>) -> Self {
        Self(stresses)
    }

    pub fn parse(s: &str) -> Result<Self, PatternError> {
        s.chars()
            .enumerate()
            .map(|(position, found)| {
                Stress::from_digit(found).ok_or(PatternError::InvalidStress { found, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn stresses(&self) -> &[Stress] {
        &self.0
    }

    /// Append another pattern, used when scanning a line word by word
    pub fn extend(&mut self, other: &StressPattern) {
        self.0.extend_from_slice(&other.0);
    }

    /// Pattern with the last `n` syllables removed
    pub fn without_last(&self, n: usize) -> StressPattern {
        let keep = self.0.len().saturating_sub(n);
        Self(self.0[..keep].to_vec())
    }
}

impl fmt::Display for StressPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stress in &self.0 {
            write!(f, "{}", stress.as_digit())?;
        }
        Ok(())
    }
}

impl FromStr for StressPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StressPattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StressPattern> for String {
    fn from(pattern: StressPattern) -> Self {
        pattern.to_string()
    }
}

/// Rhyming tail of a pronunciation: last stressed vowel plus the phones after it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rhyme(pub Vec<String>);

impl fmt::Display for Rhyme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// A dictionary word with its stress pattern and rhyme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub pattern: StressPattern,
    pub rhyme: Rhyme,
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.pattern)
    }
}

/// Shape of a poem
///
/// `lines` holds one rhyme label per line; a space is a stanza break.
/// Lines sharing a label rhyme with each other and use that label's pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemForm {
    pub name: String,
    pub lines: String,
    pub pattern: BTreeMap<char, StressPattern>,
}

/// A generated poem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub form: String,
    pub corpus: String,
    pub seed: u64,
    /// Verse lines; empty strings mark stanza breaks
    pub lines: Vec<String>,
}

impl Poem {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Per-word result of scanning a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedWord {
    pub word: String,
    pub pattern: Option<StressPattern>,
}

/// Scansion of a line of verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scansion {
    pub words: Vec<ScannedWord>,
    /// Whole-line pattern, present only when every word was found
    pub pattern: Option<StressPattern>,
    pub unknown_words: Vec<String>,
    pub meter: Option<StressPattern>,
    pub matches_meter: Option<bool>,
}

/// Size statistics of a loaded corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSummary {
    pub name: String,
    pub tokens: usize,
    pub words: usize,
    pub forward_links: usize,
    pub backward_links: usize,
    pub rhyme_classes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_parse_and_display() {
        let pattern = StressPattern::parse("0102").unwrap();
        assert_eq!(pattern.len(), 4);
        assert_eq!(pattern.stresses()[3], Stress::Secondary);
        assert_eq!(pattern.to_string(), "0102");
    }

    #[test]
    fn test_pattern_rejects_other_characters() {
        let err = StressPattern::parse("01x1").unwrap_err();
        assert_eq!(err, PatternError::InvalidStress { found: 'x', position: 2 });
    }

    #[test]
    fn test_without_last() {
        let pattern = StressPattern::parse("0101").unwrap();
        assert_eq!(pattern.without_last(1).to_string(), "010");
        assert!(pattern.without_last(9).is_empty());
    }

    #[test]
    fn test_secondary_is_wildcard() {
        assert!(Stress::Secondary.compatible(Stress::Primary));
        assert!(Stress::Unstressed.compatible(Stress::Secondary));
        assert!(!Stress::Unstressed.compatible(Stress::Primary));
    }

    #[test]
    fn test_pattern_serde() {
        let pattern: StressPattern = serde_json::from_str("\"0101\"").unwrap();
        assert_eq!(serde_json::to_string(&pattern).unwrap(), "\"0101\"");
        assert!(serde_json::from_str::<StressPattern>("\"01a\"").is_err());
    }
}
