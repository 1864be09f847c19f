pub mod error;
pub use error::Error;

pub mod lexicon;
pub use lexicon::Lexicon;

pub mod normalizer;
pub use normalizer::Normalizer;

pub mod feature_vector;
pub use feature_vector::FeatureVector;

pub mod tfidf_vectorizer;
pub use tfidf_vectorizer::{FittedVectorizer, TfidfVectorizer};

pub mod linear_svc;
pub use linear_svc::{LinearModel, LinearSvc};

pub mod platt_scaler;
pub use platt_scaler::PlattScaler;

pub mod calibrated_classifier;
pub use calibrated_classifier::CalibratedClassifier;

pub mod class_probability_distribution;
pub use class_probability_distribution::ClassProbabilityDistribution;

pub mod triage_decision;
pub use triage_decision::{TriageDecision, TriageThreshold};

pub mod pipeline_config;
pub use pipeline_config::PipelineConfig;

pub mod training_record;
pub use training_record::TrainingRecord;

pub mod dataset_split;
pub use dataset_split::DatasetSplit;

pub mod classification_report;
pub use classification_report::{ClassificationReport, LabelMetrics};

pub mod model_artifacts;
pub use model_artifacts::{ArtifactManifest, ModelArtifacts};

pub mod trainer;
pub use trainer::{Trainer, TrainingOutcome};

pub mod predictor;
pub use predictor::Predictor;
