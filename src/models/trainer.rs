use crate::models::{
    CalibratedClassifier, ClassificationReport, DatasetSplit, FeatureVector, LinearSvc,
    ModelArtifacts, Normalizer, PipelineConfig, TfidfVectorizer, TrainingRecord,
};
use crate::types::{DepartmentLabel, NormalizedText};
use crate::Error;
use log::info;
use std::path::Path;

/// What a training run produced.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub artifacts: ModelArtifacts,
    /// Scores on the held-out records; `None` when `test_ratio` is 0.
    pub report: Option<ClassificationReport>,
    pub train_size: usize,
    pub test_size: usize,
}

/// Offline batch trainer: normalize, split, fit the vectorizer, fit the calibrated
/// classifier, evaluate on the held-out split.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: PipelineConfig,
    normalizer: Normalizer,
}

impl Trainer {
    /// Uses the lexicon named by `config`, or the embedded one.
    pub fn new(config: PipelineConfig) -> Result<Self, Error> {
        config.validate()?;
        let normalizer = Normalizer::new(config.load_lexicon()?);
        Ok(Self { config, normalizer })
    }

    pub fn with_normalizer(config: PipelineConfig, normalizer: Normalizer) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config, normalizer })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn train(
        &self,
        records: &[TrainingRecord],
        model_version: &str,
    ) -> Result<TrainingOutcome, Error> {
        let split = DatasetSplit::new(records, self.config.test_ratio, self.config.seed)?;
        info!(
            "Split {} records into {} for training and {} for evaluation",
            records.len(),
            split.train.len(),
            split.test.len()
        );

        let normalized_train: Vec<NormalizedText> = split
            .train
            .iter()
            .map(|record| self.normalizer.normalize(&record.complaint_text))
            .collect();
        let train_labels: Vec<&str> = split
            .train
            .iter()
            .map(|record| record.category.as_str())
            .collect();

        let vectorizer = TfidfVectorizer::from_config(&self.config)?.fit(&normalized_train)?;
        info!(
            "Learned a vocabulary of {} n-grams",
            vectorizer.dimension()
        );

        let train_vectors: Vec<FeatureVector> = vectorizer.transform(&normalized_train);
        let classifier = CalibratedClassifier::fit(
            &train_vectors,
            &train_labels,
            LinearSvc::from_config(&self.config),
            self.config.calibration_folds,
        )?;
        info!(
            "Trained calibrated classifier over {} labels with {} folds",
            classifier.labels().len(),
            classifier.fold_count()
        );

        let report = if split.test.is_empty() {
            None
        } else {
            let expected: Vec<&str> = split
                .test
                .iter()
                .map(|record| record.category.as_str())
                .collect();
            let predicted: Vec<DepartmentLabel> = split
                .test
                .iter()
                .map(|record| {
                    let normalized = self.normalizer.normalize(&record.complaint_text);
                    let vector = vectorizer.transform_one(&normalized);
                    classifier.probabilities_for(&vector).argmax().0.to_string()
                })
                .collect();

            let report = ClassificationReport::from_predictions(&expected, &predicted)?;
            info!(
                "Held-out accuracy {:.4}, macro F1 {:.4}",
                report.accuracy, report.macro_f1_score
            );
            Some(report)
        };

        let artifacts = ModelArtifacts::new(
            model_version,
            vectorizer,
            classifier,
            self.normalizer.lexicon().clone(),
        )?;

        Ok(TrainingOutcome {
            artifacts,
            report,
            train_size: split.train.len(),
            test_size: split.test.len(),
        })
    }

    pub fn train_and_save(
        &self,
        records: &[TrainingRecord],
        model_version: &str,
        model_dir: &Path,
    ) -> Result<TrainingOutcome, Error> {
        let outcome = self.train(records, model_version)?;
        outcome.artifacts.save(model_dir)?;
        info!(
            "Saved model {} to {:?}",
            outcome.artifacts.model_version(),
            model_dir
        );
        Ok(outcome)
    }
}
