use crate::models::{
    ArtifactManifest, CalibratedClassifier, ClassProbabilityDistribution, FittedVectorizer,
    ModelArtifacts, Normalizer, PipelineConfig, TriageDecision, TriageThreshold,
};
use crate::types::{DepartmentLabel, RawComplaint};
use crate::Error;
use log::{debug, info};
use std::fmt;
use std::path::Path;

/// Online inference over a loaded artifact pair.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Predictor {
    normalizer: Normalizer,
    vectorizer: FittedVectorizer,
    classifier: CalibratedClassifier,
    threshold: TriageThreshold,
    manifest: ArtifactManifest,
}

impl Predictor {
    /// Loads and cross-checks the artifacts in `model_dir`. When `config` names external
    /// normalization resources they must match the ones pinned in the artifacts.
    ///
    /// # Errors
    ///
    /// Everything [`ModelArtifacts::load`] returns, plus `InvalidConfig` for a bad config and
    /// `NormalizationDrift` when the configured resources differ from the pinned ones.
    pub fn load(model_dir: &Path, config: &PipelineConfig) -> Result<Self, Error> {
        config.validate()?;
        let threshold = config.triage_threshold()?;
        let artifacts = ModelArtifacts::load(model_dir)?;

        if config.has_external_lexicon() {
            let configured_signature = config.load_lexicon()?.signature();
            if configured_signature != artifacts.manifest().normalizer_signature {
                return Err(Error::NormalizationDrift {
                    expected: artifacts.manifest().normalizer_signature.clone(),
                    actual: configured_signature,
                });
            }
        }

        let predictor = Self::from_artifacts(artifacts, threshold);
        info!(
            "Loaded model {} from {:?}: {} labels, {} features, threshold {:.2}",
            predictor.manifest.model_version,
            model_dir,
            predictor.classifier.labels().len(),
            predictor.vectorizer.dimension(),
            predictor.threshold.value()
        );

        Ok(predictor)
    }

    pub fn from_artifacts(artifacts: ModelArtifacts, threshold: TriageThreshold) -> Self {
        let (manifest, vectorizer, classifier, lexicon) = artifacts.into_parts();
        Self {
            normalizer: Normalizer::new(lexicon),
            vectorizer,
            classifier,
            threshold,
            manifest,
        }
    }

    pub fn with_threshold(mut self, threshold: TriageThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn manifest(&self) -> &ArtifactManifest {
        &self.manifest
    }

    pub fn model_version(&self) -> &str {
        &self.manifest.model_version
    }

    pub fn threshold(&self) -> TriageThreshold {
        self.threshold
    }

    pub fn labels(&self) -> &[DepartmentLabel] {
        self.classifier.labels()
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Calibrated probability of every known label. Never fails: text with no known n-grams
    /// still gets a valid distribution.
    pub fn predict_proba(&self, raw_text: &RawComplaint) -> ClassProbabilityDistribution {
        let normalized = self.normalizer.normalize(raw_text);
        let vector = self.vectorizer.transform_one(&normalized);
        // Artifacts guarantee the vectorizer and classifier dimensions agree
        self.classifier.probabilities_for(&vector)
    }

    pub fn classify(&self, raw_text: &RawComplaint) -> TriageDecision {
        let decision = TriageDecision::decide(&self.predict_proba(raw_text), self.threshold);
        debug!("Classified {:?} as {}", raw_text, decision);
        decision
    }

    /// Classifies the string form of any displayable value.
    pub fn classify_value<T: fmt::Display + ?Sized>(&self, value: &T) -> TriageDecision {
        self.classify(&value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Trainer, TrainingRecord};
    use tempfile::TempDir;

    fn trained_artifacts() -> ModelArtifacts {
        let mut records = Vec::new();
        for i in 0..15 {
            records.push(TrainingRecord::new(
                format!("Street lights {} broken at the intersection", i),
                "Infrastructure",
            ));
            records.push(TrainingRecord::new(
                format!("Raw sewage {} leaking behind the school", i),
                "Sanitation",
            ));
        }

        let config = PipelineConfig {
            test_ratio: 0.0,
            ..PipelineConfig::default()
        };
        Trainer::new(config)
            .unwrap()
            .train(&records, "predictor-test")
            .unwrap()
            .artifacts
    }

    #[test]
    fn test_classify_and_threshold_override() {
        let predictor =
            Predictor::from_artifacts(trained_artifacts(), TriageThreshold::default());

        let decision = predictor.classify("The street lights are broken");
        assert_eq!(decision.predicted_label, "Infrastructure");

        let strict = predictor.with_threshold(TriageThreshold::new(1.0).unwrap());
        let decision = strict.classify("The street lights are broken");
        assert!(decision.requires_human_review);
        assert_eq!(decision.routed_to, "MANUAL TRIAGE");
    }

    #[test]
    fn test_empty_and_non_string_input() {
        let predictor =
            Predictor::from_artifacts(trained_artifacts(), TriageThreshold::default());

        let distribution = predictor.predict_proba("");
        assert!((distribution.total() - 1.0).abs() < 1e-6);
        assert_eq!(predictor.classify_value(&42), predictor.classify("42"));
    }

    #[test]
    fn test_load_validates_config() {
        let dir = TempDir::new().unwrap();
        trained_artifacts().save(dir.path()).unwrap();

        let config = PipelineConfig {
            triage_threshold: 0.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            Predictor::load(dir.path(), &config),
            Err(Error::InvalidConfig(_))
        ));

        let predictor = Predictor::load(dir.path(), &PipelineConfig::default()).unwrap();
        assert_eq!(predictor.model_version(), "predictor-test");
        assert_eq!(predictor.labels(), &["Infrastructure", "Sanitation"]);
    }

    #[test]
    fn test_predictor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Predictor>();
    }
}
