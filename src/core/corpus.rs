use crate::core::dictionary::PronouncingDictionary;
use crate::models::{CorpusSummary, Rhyme, Word};
use std::collections::{BTreeMap, HashMap};

/// Index of a word in a corpus' word registry
pub type WordId = usize;

/// Lowercase the text and strip ASCII punctuation, dropping tokens that end up empty
pub fn cleanup_text(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Text corpus indexed for verse generation
///
/// Holds every distinct corpus word that has a pronunciation, forward and
/// backward Markov chains between adjacent words, and rhyme classes. Words
/// missing from the dictionary are left out of the chains, so a chain link
/// only exists between two words that were adjacent in the cleaned text.
#[derive(Debug, Clone)]
pub struct Corpus {
    name: String,
    tokens: usize,
    words: Vec<Word>,
    index: HashMap<String, WordId>,
    forward: HashMap<WordId, Vec<WordId>>,
    backward: HashMap<WordId, Vec<WordId>>,
    rhymes: BTreeMap<Rhyme, Vec<WordId>>,
}

impl Corpus {
    /// Build a corpus from raw text
    pub fn build(name: impl Into<String>, raw_text: &str, dictionary: &PronouncingDictionary) -> Self {
        let name = name.into();
        let clean = cleanup_text(raw_text);
        tracing::debug!("Corpus {}: cleaned text has {} tokens", name, clean.len());

        // Word registry in first-appearance order
        let mut words: Vec<Word> = Vec::new();
        let mut index: HashMap<String, WordId> = HashMap::new();
        let ids: Vec<Option<WordId>> = clean
            .iter()
            .map(|token| {
                if let Some(&id) = index.get(token.as_str()) {
                    return Some(id);
                }
                let word = dictionary.word(token).filter(|w| !w.pattern.is_empty())?;
                let id = words.len();
                words.push(word);
                index.insert(token.clone(), id);
                Some(id)
            })
            .collect();

        let mut forward: HashMap<WordId, Vec<WordId>> = HashMap::new();
        let mut backward: HashMap<WordId, Vec<WordId>> = HashMap::new();
        for pair in ids.windows(2) {
            if let [Some(a), Some(b)] = pair {
                forward.entry(*a).or_default().push(*b);
                backward.entry(*b).or_default().push(*a);
            }
        }

        let mut rhymes: BTreeMap<Rhyme, Vec<WordId>> = BTreeMap::new();
        for (id, word) in words.iter().enumerate() {
            rhymes.entry(word.rhyme.clone()).or_default().push(id);
        }

        tracing::debug!(
            "Corpus {}: {} words, forward chain {} words, backward chain {} words, {} rhymes",
            name,
            words.len(),
            forward.len(),
            backward.len(),
            rhymes.len()
        );

        Self {
            name,
            tokens: clean.len(),
            words,
            index,
            forward,
            backward,
            rhymes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id]
    }

    pub fn word_id(&self, text: &str) -> Option<WordId> {
        self.index.get(text).copied()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Words that follow `id` in the text, with repetitions
    #[cfg(test)]
    fn successors(&self, id: WordId) -> &[WordId] {
        self.forward.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Words that precede `id` in the text, with repetitions
    pub fn predecessors(&self, id: WordId) -> &[WordId] {
        self.backward.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rhyme classes with at least `min_size` members, in rhyme order
    pub fn rhyme_classes(&self, min_size: usize) -> Vec<&[WordId]> {
        self.rhymes
            .values()
            .filter(|members| members.len() >= min_size)
            .map(Vec::as_slice)
            .collect()
    }

    /// Words rhyming with `text`, including itself
    #[cfg(test)]
    fn rhymes_with(&self, text: &str) -> &[WordId] {
        self.word_id(text)
            .and_then(|id| self.rhymes.get(&self.words[id].rhyme))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn summary(&self) -> CorpusSummary {
        CorpusSummary {
            name: self.name.clone(),
            tokens: self.tokens,
            words: self.words.len(),
            forward_links: self.forward.values().map(Vec::len).sum(),
            backward_links: self.backward.values().map(Vec::len).sum(),
            rhyme_classes: self.rhymes.len(),
        }
    }
}
