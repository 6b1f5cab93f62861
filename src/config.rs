use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::GenerationLimits;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }

/// Locations of the pronouncing dictionary, corpora and poem forms
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_dictionary_path")]
    pub dictionary_path: PathBuf,
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: PathBuf,
    #[serde(default = "default_poem_forms_path")]
    pub poem_forms_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dictionary_path: default_dictionary_path(),
            corpus_dir: default_corpus_dir(),
            poem_forms_path: default_poem_forms_path(),
        }
    }
}

fn default_dictionary_path() -> PathBuf { PathBuf::from("data/cmudict/cmudict.dict") }
fn default_corpus_dir() -> PathBuf { PathBuf::from("data/textinput") }
fn default_poem_forms_path() -> PathBuf { PathBuf::from("data/config/poemforms.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_max_block_attempts")]
    pub max_block_attempts: usize,
    #[serde(default = "default_max_rhyme_picks")]
    pub max_rhyme_picks: usize,
    #[serde(default = "default_max_line_steps")]
    pub max_line_steps: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_block_attempts: default_max_block_attempts(),
            max_rhyme_picks: default_max_rhyme_picks(),
            max_line_steps: default_max_line_steps(),
        }
    }
}

fn default_max_block_attempts() -> usize { 50 }
fn default_max_rhyme_picks() -> usize { 100 }
fn default_max_line_steps() -> usize { 20_000 }

impl From<&GenerationSettings> for GenerationLimits {
    fn from(settings: &GenerationSettings) -> Self {
        Self {
            max_block_attempts: settings.max_block_attempts.max(1),
            max_rhyme_picks: settings.max_rhyme_picks.max(1),
            max_line_steps: settings.max_line_steps.max(1),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with POETRY)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., POETRY__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("POETRY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
