use crate::core::corpus::{Corpus, WordId};
use crate::core::meter::{completes, pattern_match, remaining_pattern, Direction};
use crate::models::{Poem, PoemForm, StressPattern};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

/// Errors that can occur while generating a poem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no stress pattern for line label '{0}'")]
    UnknownPattern(char),

    #[error("corpus has no rhyme with at least {k} words")]
    NoRhymeClass { k: usize },

    #[error("could not build rhyming lines for label '{label}' after {attempts} attempts")]
    Exhausted { label: char, attempts: usize },
}

/// Bounds on the random search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    /// Attempts at a block of rhyming lines before giving up on the poem
    pub max_block_attempts: usize,
    /// Rhyme classes drawn per block attempt while looking for enough seed words
    pub max_rhyme_picks: usize,
    /// Words tried while building a single line, backtracking included
    pub max_line_steps: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_block_attempts: 50,
            max_rhyme_picks: 100,
            max_line_steps: 20_000,
        }
    }
}

/// Draw a fresh seed for an unseeded request
pub fn random_seed() -> u64 {
    rand::random()
}

/// Generates poems by walking the backward Markov chain from a rhyme word
///
/// # Algorithm
/// 1. Count the lines each rhyme label of the form needs
/// 2. For each label pick a rhyme class with enough words whose stress fits
///    the end of the label's pattern
/// 3. From each seed word, build the line right to left through the
///    backward chain, backtracking when the remaining pattern can't be met
/// 4. Lay the lines out following the form, spaces becoming blank lines
#[derive(Debug, Clone, Copy, Default)]
pub struct PoemGenerator {
    limits: GenerationLimits,
}

impl PoemGenerator {
    pub fn new(limits: GenerationLimits) -> Self {
        Self { limits }
    }

    /// Generate a poem; the same seed, corpus and form give the same poem
    pub fn generate(&self, corpus: &Corpus, form: &PoemForm, seed: u64) -> Result<Poem, GenerationError> {
        tracing::debug!("Generating {} from {} (seed {})", form.name, corpus.name(), seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut blocks: HashMap<char, VecDeque<String>> = HashMap::new();
        for (label, k) in form.line_counts() {
            let pattern = form
                .pattern
                .get(&label)
                .ok_or(GenerationError::UnknownPattern(label))?;

            let block = self.generate_block_with_retries(corpus, label, pattern, k, &mut rng)?;
            blocks.insert(label, block.into());
        }

        let mut lines = Vec::with_capacity(form.lines.len());
        for label in form.lines.chars() {
            if label == ' ' {
                lines.push(String::new());
                continue;
            }
            let line = blocks
                .get_mut(&label)
                .and_then(VecDeque::pop_front)
                .ok_or(GenerationError::UnknownPattern(label))?;
            lines.push(line);
        }

        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        let leading = lines.iter().take_while(|l| l.is_empty()).count();
        if leading > 0 {
            lines = lines.split_off(leading);
        }

        Ok(Poem {
            form: form.name.clone(),
            corpus: corpus.name().to_string(),
            seed,
            lines,
        })
    }

    fn generate_block_with_retries<R: Rng + ?Sized>(
        &self,
        corpus: &Corpus,
        label: char,
        pattern: &StressPattern,
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, GenerationError> {
        for attempt in 1..=self.limits.max_block_attempts {
            if let Some(block) = self.generate_block(corpus, pattern, k, rng)? {
                return Ok(block);
            }
            tracing::debug!("Block {} ({}, k={}): attempt {} failed", label, pattern, k, attempt);
        }

        tracing::warn!(
            "Giving up on block {} ({}) in {} after {} attempts",
            label,
            pattern,
            corpus.name(),
            self.limits.max_block_attempts
        );
        Err(GenerationError::Exhausted {
            label,
            attempts: self.limits.max_block_attempts,
        })
    }

    /// Generate `k` rhyming lines that all fit `pattern`
    ///
    /// Returns `Ok(None)` when this attempt found no complete block and a
    /// retry may succeed.
    pub fn generate_block<R: Rng + ?Sized>(
        &self,
        corpus: &Corpus,
        pattern: &StressPattern,
        k: usize,
        rng: &mut R,
    ) -> Result<Option<Vec<String>>, GenerationError> {
        let classes = corpus.rhyme_classes(k.max(1));
        if classes.is_empty() {
            return Err(GenerationError::NoRhymeClass { k });
        }

        let mut seeds: Vec<WordId> = Vec::new();
        for _ in 0..self.limits.max_rhyme_picks {
            let Some(class) = classes.choose(rng) else {
                break;
            };
            seeds = class
                .iter()
                .copied()
                .filter(|&id| pattern_match(&corpus.word(id).pattern, pattern, Direction::FromEnd))
                .collect();
            if seeds.len() >= k {
                break;
            }
        }

        if seeds.len() < k {
            tracing::trace!("No rhyme class with {} seeds for {}", k, pattern);
            return Ok(None);
        }

        // Each line gets its own seed so rhyme words are not repeated
        seeds.shuffle(rng);
        let mut lines = Vec::with_capacity(k);
        for seed in seeds {
            let mut budget = self.limits.max_line_steps;
            if let Some(ids) = self.poetry_line(corpus, seed, pattern, rng, &mut budget) {
                let line = title_case(ids.iter().map(|&id| corpus.word(id).text.as_str()));
                tracing::trace!("Found line: {}", line);
                lines.push(line);
            }
            if lines.len() == k {
                return Ok(Some(lines));
            }
        }

        Ok(None)
    }

    /// Build a line ending in `word` whose stresses fit `pattern`
    ///
    /// Works right to left: once `word` fits the end of the pattern, a
    /// predecessor from the backward chain must fit the end of what is left.
    /// Every call spends one step of `budget`.
    pub fn poetry_line<R: Rng + ?Sized>(
        &self,
        corpus: &Corpus,
        word: WordId,
        pattern: &StressPattern,
        rng: &mut R,
        budget: &mut usize,
    ) -> Option<Vec<WordId>> {
        if *budget == 0 {
            return None;
        }
        *budget -= 1;

        let word_pattern = &corpus.word(word).pattern;
        if completes(word_pattern, pattern) {
            return Some(vec![word]);
        }
        if !pattern_match(word_pattern, pattern, Direction::FromEnd) {
            return None;
        }

        let rest = remaining_pattern(word_pattern, pattern);
        let mut options: Vec<WordId> = corpus
            .predecessors(word)
            .iter()
            .copied()
            .filter(|&id| pattern_match(&corpus.word(id).pattern, &rest, Direction::FromEnd))
            .collect();
        options.sort_unstable();
        options.dedup();
        options.shuffle(rng);

        for next in options {
            if let Some(mut line) = self.poetry_line(corpus, next, &rest, rng, budget) {
                line.push(word);
                return Some(line);
            }
        }

        None
    }
}

/// Join words with spaces, capitalizing the first letter of each
fn title_case<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dictionary::PronouncingDictionary;
    use std::collections::BTreeMap;

    fn corpus() -> Corpus {
        let dict = PronouncingDictionary::parse(
            "the DH AH0\ncat K AE1 T\nmat M AE1 T\nhat HH AE1 T\nsat S AE1 T\n",
        );
        Corpus::build("cats", "The cat, the mat; the hat. The sat!", &dict)
    }

    fn form(lines: &str, p: &str) -> PoemForm {
        PoemForm::new("Test", lines, BTreeMap::from([('A', StressPattern::parse(p).unwrap())]))
    }

    fn p(s: &str) -> StressPattern {
        StressPattern::parse(s).unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case(["the", "white", "whale"].into_iter()), "The White Whale");
    }

    #[test]
    fn test_poetry_line_follows_backward_chain() {
        let corpus = corpus();
        let generator = PoemGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut budget = 100;
        let cat = corpus.word_id("cat").unwrap();

        let line = generator
            .poetry_line(&corpus, cat, &p("0101"), &mut rng, &mut budget)
            .unwrap();

        assert_eq!(line.len(), 4);
        assert_eq!(*line.last().unwrap(), cat);
        assert_eq!(corpus.word(line[0]).text, "the");
        assert_eq!(corpus.word(line[2]).text, "the");
    }

    #[test]
    fn test_poetry_line_rejects_word_not_fitting_end() {
        let corpus = corpus();
        let generator = PoemGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut budget = 100;
        let the = corpus.word_id("the").unwrap();
        assert!(generator.poetry_line(&corpus, the, &p("01"), &mut rng, &mut budget).is_none());
    }

    #[test]
    fn test_poetry_line_respects_budget() {
        let corpus = corpus();
        let generator = PoemGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut budget = 2;
        let cat = corpus.word_id("cat").unwrap();
        assert!(generator.poetry_line(&corpus, cat, &p("0101"), &mut rng, &mut budget).is_none());
        assert_eq!(budget, 0);
    }

    #[test]
    fn test_couplet_lines_rhyme_and_scan() {
        let corpus = corpus();
        let generator = PoemGenerator::default();

        let poem = generator.generate(&corpus, &form("AA", "0101"), 42).unwrap();

        assert_eq!(poem.lines.len(), 2);
        let last_words: Vec<&str> = poem
            .lines
            .iter()
            .map(|l| l.split(' ').last().unwrap())
            .collect();
        assert_ne!(last_words[0], last_words[1]);
        for line in &poem.lines {
            assert_eq!(line.split(' ').count(), 4);
            assert!(line.starts_with("The "));
            assert!(line.ends_with("at"));
        }
    }

    #[test]
    fn test_stanza_breaks_become_blank_lines() {
        let corpus = corpus();
        let generator = PoemGenerator::default();

        let poem = generator.generate(&corpus, &form(" AA AA ", "0101"), 1).unwrap();

        assert_eq!(poem.lines.len(), 5);
        assert_eq!(poem.lines[2], "");
        assert!(!poem.lines[0].is_empty());
        assert!(!poem.lines[4].is_empty());
    }

    #[test]
    fn test_same_seed_same_poem() {
        let corpus = corpus();
        let generator = PoemGenerator::default();
        let form = form("AA", "0101");

        let a = generator.generate(&corpus, &form, 99).unwrap();
        let b = generator.generate(&corpus, &form, 99).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.seed, 99);
    }

    #[test]
    fn test_not_enough_rhymes() {
        let corpus = corpus();
        let generator = PoemGenerator::default();
        let err = generator.generate(&corpus, &form("AAAAA", "0101"), 3).unwrap_err();
        assert_eq!(err, GenerationError::NoRhymeClass { k: 5 });
    }

    #[test]
    fn test_impossible_meter_is_exhausted() {
        let corpus = corpus();
        let generator = PoemGenerator::new(GenerationLimits {
            max_block_attempts: 3,
            max_rhyme_picks: 5,
            max_line_steps: 100,
        });
        let err = generator.generate(&corpus, &form("AA", "1111"), 3).unwrap_err();
        assert_eq!(err, GenerationError::Exhausted { label: 'A', attempts: 3 });
    }

    #[test]
    fn test_missing_pattern() {
        let corpus = corpus();
        let generator = PoemGenerator::default();
        let err = generator.generate(&corpus, &form("AB", "0101"), 3).unwrap_err();
        assert_eq!(err, GenerationError::UnknownPattern('B'));
    }
}
