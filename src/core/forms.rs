use crate::models::{PoemForm, StressPattern};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating poem forms
#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to read poem forms {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid poem forms JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("poem form '{0}' has no lines")]
    EmptyLayout(String),

    #[error("poem form '{form}' uses line label '{label}' without a pattern")]
    MissingPattern { form: String, label: char },

    #[error("poem form '{form}' has an empty pattern for label '{label}'")]
    EmptyPattern { form: String, label: char },

    #[error("duplicate poem form '{0}'")]
    Duplicate(String),
}

impl PoemForm {
    pub fn new(name: impl Into<String>, lines: impl Into<String>, pattern: BTreeMap<char, StressPattern>) -> Self {
        Self {
            name: name.into(),
            lines: lines.into(),
            pattern,
        }
    }

    /// Check that every line label has a non-empty pattern
    pub fn validate(&self) -> Result<(), FormError> {
        let mut labels = self.lines.chars().filter(|c| *c != ' ').peekable();
        if labels.peek().is_none() {
            return Err(FormError::EmptyLayout(self.name.clone()));
        }

        for label in labels {
            match self.pattern.get(&label) {
                None => {
                    return Err(FormError::MissingPattern {
                        form: self.name.clone(),
                        label,
                    })
                }
                Some(p) if p.is_empty() => {
                    return Err(FormError::EmptyPattern {
                        form: self.name.clone(),
                        label,
                    })
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Labels in order of first appearance, with the number of lines each needs
    pub fn line_counts(&self) -> Vec<(char, usize)> {
        let mut counts: Vec<(char, usize)> = Vec::new();
        for label in self.lines.chars().filter(|c| *c != ' ') {
            match counts.iter_mut().find(|(l, _)| *l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label, 1)),
            }
        }
        counts
    }

    /// Number of verse lines, not counting stanza breaks
    pub fn verse_lines(&self) -> usize {
        self.lines.chars().filter(|c| *c != ' ').count()
    }
}

#[derive(Debug, Deserialize)]
struct PoemFormsFile {
    poemforms: Vec<PoemForm>,
}

/// Poem forms available to the generator, looked up case-insensitively by name
#[derive(Debug, Clone, Default)]
pub struct PoemFormRegistry {
    forms: Vec<PoemForm>,
}

impl PoemFormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load forms from a JSON file shaped `{"poemforms": [{"name", "lines", "pattern"}]}`
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FormError> {
        let path = path.as_ref();
        tracing::debug!("Loading poem forms from {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let registry = Self::from_json_str(&raw)?;
        tracing::info!("Loaded {} poem forms from {}", registry.len(), path.display());
        Ok(registry)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, FormError> {
        let file: PoemFormsFile = serde_json::from_str(raw)?;

        let mut registry = Self::new();
        for form in file.poemforms {
            registry.insert(form)?;
        }
        Ok(registry)
    }

    /// Validate and add a form
    pub fn insert(&mut self, form: PoemForm) -> Result<(), FormError> {
        form.validate()?;
        if self.get(&form.name).is_some() {
            return Err(FormError::Duplicate(form.name));
        }
        self.forms.push(form);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PoemForm> {
        self.forms.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn forms(&self) -> &[PoemForm] {
        &self.forms
    }

    pub fn names(&self) -> Vec<&str> {
        self.forms.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
