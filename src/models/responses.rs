use serde::{Deserialize, Serialize};
use crate::models::domain::{CorpusSummary, PoemForm, Poem};

/// Response for the poem generation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemResponse {
    pub id: String,
    pub form: String,
    pub corpus: String,
    pub seed: u64,
    pub lines: Vec<String>,
    pub text: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Poem> for PoemResponse {
    fn from(poem: Poem) -> Self {
        let text = poem.text();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            form: poem.form,
            corpus: poem.corpus,
            seed: poem.seed,
            lines: poem.lines,
            text,
            generated_at: chrono::Utc::now(),
        }
    }
}

/// List of available poem forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsResponse {
    pub forms: Vec<PoemForm>,
}

/// List of loaded corpora
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorporaResponse {
    pub corpora: Vec<CorpusSummary>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub dictionary_words: usize,
    pub corpora: usize,
    pub forms: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
