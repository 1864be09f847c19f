use crate::models::{Lexicon, TriageThreshold};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings shared by the trainer and the predictor.
///
/// Missing keys in a TOML file fall back to [`crate::DEFAULT_PIPELINE_CONFIG`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Minimum confidence required for automated routing, in `(0, 1]`.
    pub triage_threshold: f64,
    pub max_vocabulary_size: usize,
    /// Inclusive `(min, max)` n-gram lengths.
    pub ngram_range: (usize, usize),
    pub min_token_length: usize,
    pub calibration_folds: usize,
    /// SVM regularization strength; larger values fit the training data harder.
    pub svm_c: f64,
    /// Stopping tolerance of the SMO solver.
    pub svm_tolerance: f64,
    /// Fraction of the corpus held out for the evaluation report, in `[0, 1)`.
    pub test_ratio: f64,
    pub seed: u64,
    /// Replaces the embedded stop-word list.
    pub stop_words_path: Option<PathBuf>,
    /// Replaces the embedded lemma dictionary.
    pub lemmas_path: Option<PathBuf>,
    /// Replaces the embedded base-word list.
    pub base_words_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        crate::DEFAULT_PIPELINE_CONFIG
    }
}

impl PipelineConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Error> {
        let config: PipelineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, Error> {
        let toml_str = fs::read_to_string(path)?;
        Self::from_toml_str(&toml_str)
    }

    /// Ensure the configuration values are within acceptable bounds.
    pub fn validate(&self) -> Result<(), Error> {
        TriageThreshold::new(self.triage_threshold)?;

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::InvalidConfig(format!(
                "ngram_range must satisfy 1 <= min <= max but was ({}, {})",
                min_n, max_n
            )));
        }
        if self.max_vocabulary_size == 0 {
            return Err(Error::InvalidConfig(
                "max_vocabulary_size must be greater than 0".to_string(),
            ));
        }
        if self.calibration_folds < 2 {
            return Err(Error::InvalidConfig(format!(
                "calibration_folds must be at least 2 but was {}",
                self.calibration_folds
            )));
        }
        if !(self.svm_c.is_finite() && self.svm_c > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "svm_c must be positive but was {}",
                self.svm_c
            )));
        }
        if !(self.svm_tolerance.is_finite() && self.svm_tolerance > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "svm_tolerance must be positive but was {}",
                self.svm_tolerance
            )));
        }
        if !(0.0..1.0).contains(&self.test_ratio) {
            return Err(Error::InvalidConfig(format!(
                "test_ratio must be in [0, 1) but was {}",
                self.test_ratio
            )));
        }

        Ok(())
    }

    pub fn triage_threshold(&self) -> Result<TriageThreshold, Error> {
        TriageThreshold::new(self.triage_threshold)
    }

    /// True when any normalization resource is loaded from disk instead of the embedded copy.
    pub fn has_external_lexicon(&self) -> bool {
        self.stop_words_path.is_some()
            || self.lemmas_path.is_some()
            || self.base_words_path.is_some()
    }

    pub fn load_lexicon(&self) -> Result<Lexicon, Error> {
        Lexicon::from_files(
            self.stop_words_path.as_deref(),
            self.lemmas_path.as_deref(),
            self.base_words_path.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.triage_threshold, 0.70);
        assert_eq!(config.max_vocabulary_size, 2500);
        assert_eq!(config.ngram_range, (1, 3));
        assert_eq!(config.calibration_folds, 5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PipelineConfig::from_toml_str("triage_threshold = 0.85\nngram_range = [1, 2]\n")
            .unwrap();
        assert_eq!(config.triage_threshold, 0.85);
        assert_eq!(config.ngram_range, (1, 2));
        assert_eq!(config.max_vocabulary_size, 2500);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = PipelineConfig::from_toml_str("threshold = 0.85\n");
        assert!(matches!(result, Err(Error::ParserError(_))));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        for toml_str in [
            "triage_threshold = 0.0",
            "triage_threshold = 1.5",
            "max_vocabulary_size = 0",
            "ngram_range = [2, 1]",
            "calibration_folds = 1",
            "svm_c = -1.0",
            "test_ratio = 1.0",
        ] {
            let result = PipelineConfig::from_toml_str(toml_str);
            assert!(result.is_err(), "{} should be rejected", toml_str);
        }
    }

    #[test]
    fn test_threshold_of_one_is_allowed() {
        let config = PipelineConfig::from_toml_str("triage_threshold = 1.0").unwrap();
        assert_eq!(config.triage_threshold().unwrap().value(), 1.0);
    }
}
