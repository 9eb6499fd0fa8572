//! Configuration management for the resume relevance checker

use crate::error::{RelevanceError, Result};
use crate::processing::evaluator::EvaluationConfig;
use crate::processing::scorer::KeywordWeights;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub mode: ExtractionMode,
    /// Signed so that a negative value in the file is reported, not wrapped
    pub top_n: i64,
    pub max_phrase_words: usize,
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Noun and proper-noun tokens
    Token,
    /// Noun phrases of up to `max_phrase_words` words
    Phrase,
    /// Every word longer than two characters
    Words,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub preview_chars: usize,
    pub export_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
    Markdown,
    Html,
}

/// Standalone weights file, e.g.
///
/// ```toml
/// [weights]
/// Python = 3
/// SQL = 1
/// ```
#[derive(Debug, Clone, Deserialize)]
struct WeightsFile {
    weights: BTreeMap<String, f64>,
}

pub const DEFAULT_TOP_N: i64 = 20;
pub const DEFAULT_MAX_PHRASE_WORDS: usize = 5;
pub const DEFAULT_EXPORT_FILE: &str = "resume_scores.csv";

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig {
                mode: ExtractionMode::Token,
                top_n: DEFAULT_TOP_N,
                max_phrase_words: DEFAULT_MAX_PHRASE_WORDS,
                extra_stopwords: Vec::new(),
            },
            scoring: ScoringConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                preview_chars: 1000,
                export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            },
        }
    }
}

impl Config {
    /// Load from the user config directory, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            RelevanceError::Configuration(format!("Failed to parse config '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RelevanceError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-relevance")
            .join("config.toml")
    }

    /// Reject a negative `top_n`, a zero phrase length or a bad weight
    pub fn validate(&self) -> Result<()> {
        self.evaluation_config().map(|_| ())
    }

    /// Build the validated settings the evaluator runs with
    pub fn evaluation_config(&self) -> Result<EvaluationConfig> {
        if self.extraction.max_phrase_words == 0 {
            return Err(RelevanceError::Configuration(
                "max_phrase_words must be at least 1".to_string(),
            ));
        }

        let weights = KeywordWeights::new(self.scoring.weights.clone())?;
        Ok(EvaluationConfig::new(self.extraction.mode, self.extraction.top_n, weights)?
            .with_max_phrase_words(self.extraction.max_phrase_words)
            .with_extra_stopwords(self.extraction.extra_stopwords.clone()))
    }

    /// Merge weights from a standalone TOML file over the configured ones
    pub fn merge_weights_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        let file: WeightsFile = toml::from_str(&content).map_err(|e| {
            RelevanceError::Configuration(format!("Failed to parse weights file '{}': {}", path.display(), e))
        })?;
        self.scoring.weights.extend(file.weights);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction.top_n, 20);
        assert_eq!(config.extraction.max_phrase_words, 5);
        assert_eq!(config.output.export_file, PathBuf::from("resume_scores.csv"));
    }

    #[test]
    fn test_negative_top_n_is_rejected() {
        let mut config = Config::default();
        config.extraction.top_n = -1;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, RelevanceError::Configuration(_)));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let mut config = Config::default();
        config.scoring.weights.insert("Python".to_string(), -2.0);
        let err = config.evaluation_config().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.extraction.mode = ExtractionMode::Phrase;
        config.scoring.weights.insert("Rust".to_string(), 2.5);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.extraction.mode, ExtractionMode::Phrase);
        assert_eq!(loaded.scoring.weights.get("Rust"), Some(&2.5));
    }

    #[test]
    fn test_malformed_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "extraction = 3").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, RelevanceError::Configuration(_)));
    }

    #[test]
    fn test_invalid_values_in_file_are_validation_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.extraction.top_n = -3;
        write!(file, "{}", toml::to_string_pretty(&config).unwrap()).unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, RelevanceError::Configuration(_)));
        assert!(err.is_validation());
    }

    #[test]
    fn test_merge_weights_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[weights]\nPython = 3\nSQL = 1").unwrap();

        let mut config = Config::default();
        config.merge_weights_file(file.path()).unwrap();

        assert_eq!(config.scoring.weights.len(), 2);
        assert_eq!(config.scoring.weights.get("Python"), Some(&3.0));
    }
}
