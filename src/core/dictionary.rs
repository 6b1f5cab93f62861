use crate::models::{Rhyme, Stress, StressPattern, Word};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading the pronunciation dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary {0} contains no entries")]
    Empty(PathBuf),
}

/// CMU Pronouncing Dictionary
///
/// Maps lowercase words to their first listed pronunciation, a sequence of
/// ARPAbet phones where vowels carry a trailing stress digit (`AH0`, `EY1`).
/// Both the `cmudict.dict` layout (`word(2) W ER1 D # comment`) and the
/// older `cmudict-0.7b` layout (`WORD  W ER1 D`, `;;;` comments) are read.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    entries: HashMap<String, Vec<String>>,
    skipped_lines: usize,
}

impl PronouncingDictionary {
    /// Load a dictionary file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        tracing::debug!("Loading pronouncing dictionary from {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Self::parse(&raw);
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty(path.to_path_buf()));
        }

        if dictionary.skipped_lines > 0 {
            tracing::warn!(
                "Skipped {} malformed lines in {}",
                dictionary.skipped_lines,
                path.display()
            );
        }

        tracing::info!("Loaded {} words from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    /// Parse dictionary text; malformed lines are skipped and counted
    pub fn parse(raw: &str) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        let mut skipped_lines = 0;

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(head) = tokens.next() else {
                continue;
            };

            let phones: Vec<String> = tokens
                .take_while(|t| !t.starts_with('#'))
                .map(str::to_string)
                .collect();

            if phones.is_empty() {
                skipped_lines += 1;
                continue;
            }

            // Alternate pronunciations are listed as `word(2)`; keep the first one seen
            let word = match head.find('(') {
                Some(idx) if head.ends_with(')') && idx > 0 => &head[..idx],
                _ => head,
            };

            entries.entry(word.to_lowercase()).or_insert(phones);
        }

        Self { entries, skipped_lines }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Number of lines that could not be parsed
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn pronunciation(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// Stress pattern built from the stress digit of every vowel
    pub fn stress_pattern(&self, word: &str) -> Option<StressPattern> {
        let pattern = self.pronunciation(word).map(stress_of);
        if pattern.is_none() {
            tracing::trace!("stress_pattern: not in dictionary: {}", word);
        }
        pattern
    }

    pub fn rhyme(&self, word: &str) -> Option<Rhyme> {
        self.pronunciation(word).map(rhyme_of)
    }

    /// Build a `Word` for a dictionary entry
    pub fn word(&self, word: &str) -> Option<Word> {
        let phones = self.pronunciation(word)?;
        Some(Word {
            text: word.to_string(),
            pattern: stress_of(phones),
            rhyme: rhyme_of(phones),
        })
    }
}

fn stress_digit(phone: &str) -> Option<Stress> {
    phone.chars().last().and_then(Stress::from_digit)
}

fn stress_of(phones: &[String]) -> StressPattern {
    StressPattern::new(phones.iter().filter_map(|p| stress_digit(p)).collect())
}

/// Phones from the last vowel with primary or secondary stress to the end.
/// Without a stressed vowel the whole pronunciation is the rhyme.
fn rhyme_of(phones: &[String]) -> Rhyme {
    let start = phones
        .iter()
        .rposition(|p| matches!(stress_digit(p), Some(Stress::Primary | Stress::Secondary)))
        .unwrap_or(0);
    Rhyme(phones[start..].to_vec())
}
