use crate::config::DataSettings;
use crate::core::{DictionaryError, FormError, PoemFormRegistry, PronouncingDictionary};
use crate::services::corpora::{CorpusError, CorpusRegistry};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading the data the service runs on
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Poem form error: {0}")]
    Form(#[from] FormError),
}

/// Pronouncing dictionary, corpora and poem forms, shared read-only across workers
#[derive(Debug, Clone)]
pub struct Library {
    pub dictionary: Arc<PronouncingDictionary>,
    pub corpora: Arc<CorpusRegistry>,
    pub forms: Arc<PoemFormRegistry>,
}

impl Library {
    pub fn new(dictionary: PronouncingDictionary, corpora: CorpusRegistry, forms: PoemFormRegistry) -> Self {
        Self {
            dictionary: Arc::new(dictionary),
            corpora: Arc::new(corpora),
            forms: Arc::new(forms),
        }
    }

    /// Load everything from the configured paths
    ///
    /// Corpora are indexed against the dictionary, so the dictionary is read first.
    pub fn load(settings: &DataSettings) -> Result<Self, LibraryError> {
        let dictionary = PronouncingDictionary::load(&settings.dictionary_path)?;
        let forms = PoemFormRegistry::from_json_file(&settings.poem_forms_path)?;
        let corpora = CorpusRegistry::load_dir(&settings.corpus_dir, &dictionary)?;

        tracing::info!(
            "Library loaded: {} dictionary words, {} corpora, {} poem forms",
            dictionary.len(),
            corpora.len(),
            forms.len()
        );

        Ok(Self::new(dictionary, corpora, forms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reports_missing_dictionary() {
        let settings = DataSettings {
            dictionary_path: "/nonexistent/cmudict.dict".into(),
            corpus_dir: "data/textinput".into(),
            poem_forms_path: "data/config/poemforms.json".into(),
        };
        let err = Library::load(&settings).unwrap_err();
        assert!(matches!(err, LibraryError::Dictionary(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let dict_path = dir.path().join("cmudict.dict");
        let forms_path = dir.path().join("poemforms.json");
        let corpus_dir = dir.path().join("textinput");
        std::fs::create_dir(&corpus_dir).unwrap();

        std::fs::write(&dict_path, "the DH AH0\nwhale W EY1 L\n").unwrap();
        std::fs::write(
            &forms_path,
            r#"{"poemforms": [{"name": "Couplet", "lines": "AA", "pattern": {"A": "01"}}]}"#,
        )
        .unwrap();
        std::fs::write(corpus_dir.join("moby.txt"), "the whale").unwrap();

        let library = Library::load(&DataSettings {
            dictionary_path: dict_path,
            corpus_dir,
            poem_forms_path: forms_path,
        })
        .unwrap();

        assert_eq!(library.dictionary.len(), 2);
        assert_eq!(library.corpora.names(), vec!["moby"]);
        assert!(library.forms.get("couplet").is_some());
    }
}
