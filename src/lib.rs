//! Random Poetry - metrical poem generator service
//!
//! Generates poems in a requested form (sonnet, limerick, ...) from a text
//! corpus. Stress patterns and rhymes come from the CMU Pronouncing
//! Dictionary; lines are built backwards from a rhyme word through a Markov
//! chain of the corpus until they fit the form's meter.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Corpus, PoemFormRegistry, PoemGenerator, PronouncingDictionary, pattern_match, Direction};
pub use crate::models::{Poem, PoemForm, StressPattern, Word};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let line = StressPattern::parse("0101010101").unwrap();
        let word = StressPattern::parse("01").unwrap();
        assert!(pattern_match(&word, &line, Direction::FromEnd));
    }
}
