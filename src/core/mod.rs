// Core algorithm exports
pub mod corpus;
pub mod dictionary;
pub mod forms;
pub mod generator;
pub mod meter;

pub use corpus::{cleanup_text, Corpus, WordId};
pub use dictionary::{DictionaryError, PronouncingDictionary};
pub use forms::{FormError, PoemFormRegistry};
pub use generator::{random_seed, GenerationError, GenerationLimits, PoemGenerator};
pub use meter::{pattern_match, remaining_pattern, scan_line, Direction};
