pub mod constants;

use complaint_triage::models::FeatureVector;
use complaint_triage::{
    ModelArtifacts, PipelineConfig, Predictor, Trainer, TrainingRecord, TriageThreshold,
};
use constants::{CATEGORY_VOCABULARY, COMPLAINT_PREFIXES, FIXTURE_MODEL_VERSION, PREFIX_INTERVAL};
use csv::Writer;
use std::error::Error;
use std::path::Path;
use std::sync::OnceLock;

/// Deterministic corpus in the shape of the municipal complaint data: one record per
/// subject/complaint/location combination for each department.
pub fn municipal_complaint_corpus() -> Vec<TrainingRecord> {
    let mut records = Vec::new();

    for (category, [subjects, complaints, locations]) in CATEGORY_VOCABULARY {
        for subject in subjects.iter() {
            for complaint in complaints.iter() {
                for location in locations.iter() {
                    let mut text = format!("{} {} {}.", subject, complaint, location);

                    let idx = records.len();
                    if idx % PREFIX_INTERVAL == PREFIX_INTERVAL - 1 {
                        let prefix =
                            COMPLAINT_PREFIXES[(idx / PREFIX_INTERVAL) % COMPLAINT_PREFIXES.len()];
                        text = format!("{} {}", prefix, text);
                    }

                    records.push(TrainingRecord::new(text, *category));
                }
            }
        }
    }

    records
}

/// Utility to write records as a `complaint_text,category` CSV file.
pub fn write_corpus_csv(records: &[TrainingRecord], path: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(["complaint_text", "category"])?;
    for record in records {
        writer.write_record([record.complaint_text.as_str(), record.category.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn train_artifacts(
    records: &[TrainingRecord],
    config: PipelineConfig,
    model_version: &str,
) -> ModelArtifacts {
    Trainer::new(config)
        .expect("Failed to create trainer")
        .train(records, model_version)
        .expect("Failed to train model")
        .artifacts
}

/// Model trained once per test binary on the full fixture corpus with the default
/// configuration.
pub fn fixture_artifacts() -> &'static ModelArtifacts {
    static FIXTURE: OnceLock<ModelArtifacts> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        train_artifacts(
            &municipal_complaint_corpus(),
            PipelineConfig::default(),
            FIXTURE_MODEL_VERSION,
        )
    })
}

pub fn fixture_predictor() -> Predictor {
    Predictor::from_artifacts(fixture_artifacts().clone(), TriageThreshold::default())
}

/// Saves the fixture model into `model_dir` for tests that exercise loading.
pub fn save_fixture_model(model_dir: &Path) {
    fixture_artifacts()
        .save(model_dir)
        .expect("Failed to save fixture model");
}

/// Vector of the right size for the fixture model with all weight on one feature.
pub fn fixture_one_hot(index: usize) -> FeatureVector {
    let dimension = fixture_artifacts().vectorizer().dimension();
    FeatureVector::from_entries(dimension, vec![(index % dimension, 1.0)])
        .expect("Index is in range")
}
