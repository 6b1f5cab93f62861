// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CorpusSummary, PatternError, Poem, PoemForm, Rhyme, ScannedWord, Scansion, Stress, StressPattern, Word};
pub use requests::{GeneratePoemRequest, RandomPoemQuery, ScanRequest};
pub use responses::{CorporaResponse, ErrorResponse, FormsResponse, HealthResponse, PoemResponse};
