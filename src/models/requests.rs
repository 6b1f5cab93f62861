use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to generate a poem
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeneratePoemRequest {
    #[validate(length(min = 1, max = 100))]
    pub form: String,
    #[validate(length(min = 1, max = 100))]
    pub corpus: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Query for a poem from a random form and corpus
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomPoemQuery {
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Request to scan a line of verse
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScanRequest {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
    #[serde(default)]
    pub meter: Option<String>,
}
