// Service exports
pub mod corpora;
pub mod library;

pub use corpora::{CorpusError, CorpusRegistry};
pub use library::{Library, LibraryError};
