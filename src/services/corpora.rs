use crate::core::{Corpus, PronouncingDictionary};
use crate::models::CorpusSummary;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading corpora
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus directory not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no .txt corpora in {0}")]
    Empty(PathBuf),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> CorpusError {
    let path = path.to_path_buf();
    move |source| CorpusError::Io { path, source }
}

/// Loaded corpora keyed by name (the text file's stem)
#[derive(Debug, Clone, Default)]
pub struct CorpusRegistry {
    corpora: BTreeMap<String, Arc<Corpus>>,
}

impl CorpusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one corpus per `*.txt` file in `dir`
    pub fn load_dir<P: AsRef<Path>>(dir: P, dictionary: &PronouncingDictionary) -> Result<Self, CorpusError> {
        let dir = dir.as_ref();
        tracing::debug!("Loading corpora from {}", dir.display());

        if !dir.is_dir() {
            return Err(CorpusError::NotFound(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(CorpusError::Empty(dir.to_path_buf()));
        }
        files.sort();

        let mut registry = Self::new();
        for path in files {
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let raw = std::fs::read_to_string(&path).map_err(io_err(&path))?;
            let corpus = Corpus::build(name, &raw, dictionary);
            let summary = corpus.summary();
            tracing::info!(
                "Loaded corpus {}: {} tokens, {} words, {} rhymes",
                summary.name,
                summary.tokens,
                summary.words,
                summary.rhyme_classes
            );
            registry.insert(corpus);
        }

        Ok(registry)
    }

    pub fn insert(&mut self, corpus: Corpus) {
        self.corpora.insert(corpus.name().to_string(), Arc::new(corpus));
    }

    pub fn get(&self, name: &str) -> Option<Arc<Corpus>> {
        self.corpora.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.corpora.keys().map(String::as_str).collect()
    }

    pub fn summaries(&self) -> Vec<CorpusSummary> {
        self.corpora.values().map(|c| c.summary()).collect()
    }

    pub fn len(&self) -> usize {
        self.corpora.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpora.is_empty()
    }
}
