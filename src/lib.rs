mod config;
pub use config::DEFAULT_PIPELINE_CONFIG;
pub mod constants;
pub use constants::MANUAL_TRIAGE_ROUTE;
pub mod models;
pub use models::{
    ArtifactManifest, ClassProbabilityDistribution, ClassificationReport, Error, ModelArtifacts,
    Normalizer, PipelineConfig, Predictor, Trainer, TrainingOutcome, TrainingRecord,
    TriageDecision, TriageThreshold,
};
pub mod types;
pub mod utils;
pub use types::{DepartmentLabel, NormalizedText, Probability, RawComplaint};

use log::warn;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

static GLOBAL_PREDICTOR: OnceLock<Predictor> = OnceLock::new();

/// Loads the artifact pair in `model_dir` into the process-wide predictor used by
/// [`classify`].
///
/// Only the first successful call loads anything; later calls log a warning and return the
/// predictor that is already installed. A failed call leaves the slot empty so it can be
/// retried.
pub fn init_predictor(
    model_dir: &Path,
    config: &PipelineConfig,
) -> Result<&'static Predictor, Error> {
    if let Some(predictor) = GLOBAL_PREDICTOR.get() {
        warn!(
            "Global predictor already holds model {}; ignoring {:?}",
            predictor.model_version(),
            model_dir
        );
        return Ok(predictor);
    }

    let predictor = Predictor::load(model_dir, config)?;
    Ok(install_predictor(predictor))
}

/// Installs an already constructed predictor as the process-wide one. Has no effect if one
/// is installed.
pub fn install_predictor(predictor: Predictor) -> &'static Predictor {
    let mut installed = false;
    let global = GLOBAL_PREDICTOR.get_or_init(|| {
        installed = true;
        predictor
    });

    if !installed {
        warn!(
            "Global predictor already holds model {}; discarding the new one",
            global.model_version()
        );
    }

    global
}

pub fn global_predictor() -> Result<&'static Predictor, Error> {
    GLOBAL_PREDICTOR.get().ok_or(Error::PredictorNotInitialized)
}

/// Classifies one complaint with the process-wide predictor.
///
/// # Errors
///
/// Returns `PredictorNotInitialized` before [`init_predictor`] has succeeded. Once a
/// predictor is installed this never fails.
pub fn classify(raw_text: &RawComplaint) -> Result<TriageDecision, Error> {
    Ok(global_predictor()?.classify(raw_text))
}

/// Like [`classify`], but for any displayable value; numbers, booleans and the like are
/// coerced to text first.
pub fn classify_value<T: fmt::Display + ?Sized>(value: &T) -> Result<TriageDecision, Error> {
    Ok(global_predictor()?.classify_value(value))
}
