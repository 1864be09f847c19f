use crate::types::Signature;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("model artifact at {path:?} is missing or unreadable: {source}")]
    ArtifactMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact at {path:?} could not be decoded: {source}")]
    ArtifactCorrupt {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
    #[error("model artifact at {path:?} could not be encoded: {source}")]
    ArtifactEncode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
    #[error("model artifact at {path:?} has format version {found} but only {expected} is supported")]
    UnsupportedArtifactFormat {
        path: PathBuf,
        expected: u32,
        found: u32,
    },
    #[error("Artifact Mismatch: {0}")]
    ArtifactMismatch(String),
    #[error("normalization resources drifted: model expects signature {expected} but found {actual}")]
    NormalizationDrift {
        expected: Signature,
        actual: Signature,
    },
    #[error("Invalid Resource: {0}")]
    InvalidResource(String),
    #[error("Invalid Config: {0}")]
    InvalidConfig(String),
    #[error("Parser Error: {0}")]
    ParserError(String),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("training corpus is empty")]
    EmptyCorpus,
    #[error("training corpus produced no vocabulary features")]
    EmptyVocabulary,
    #[error("training requires at least two distinct labels but found {0}")]
    InsufficientLabels(usize),
    #[error("training requires at least {required} samples but found {found}")]
    InsufficientSamples { required: usize, found: usize },
    #[error("received {vectors} feature vectors but {labels} labels")]
    MismatchedTrainingData { vectors: usize, labels: usize },
    #[error("SVM training failed: {0}")]
    SvmTraining(String),
    #[error("feature vector has {actual} dimensions but {expected} were expected")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("a probability distribution needs at least one label")]
    EmptyDistribution,
    #[error("probability {value} for label {label:?} is outside [0, 1]")]
    InvalidProbability { label: String, value: f64 },
    #[error("the global predictor has not been initialized")]
    PredictorNotInitialized,
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::ParserError(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Error {
        Error::ParserError(err.to_string())
    }
}
