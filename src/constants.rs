/// Route assigned when the classifier's confidence falls below the triage threshold.
pub const MANUAL_TRIAGE_ROUTE: &str = "MANUAL TRIAGE";

pub const DEFAULT_TRIAGE_THRESHOLD: f64 = 0.70;

pub const DEFAULT_MAX_VOCABULARY_SIZE: usize = 2500;

pub const DEFAULT_NGRAM_RANGE: (usize, usize) = (1, 3);

/// Tokens shorter than this are never turned into vocabulary features.
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 2;

pub const DEFAULT_CALIBRATION_FOLDS: usize = 5;

pub const DEFAULT_SVM_C: f64 = 0.8;

pub const DEFAULT_SVM_TOLERANCE: f64 = 1e-4;

pub const DEFAULT_TEST_RATIO: f64 = 0.2;

pub const DEFAULT_SEED: u64 = 42;

/// Bumped whenever the on-disk layout of either artifact changes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Bumped whenever the normalization procedure itself (not its resources) changes.
pub const NORMALIZER_PROCEDURE_VERSION: u32 = 1;

pub const VECTORIZER_ARTIFACT_FILE_NAME: &str = "vectorizer.bin";

pub const CLASSIFIER_ARTIFACT_FILE_NAME: &str = "classifier.bin";

/// Header columns expected in a training corpus CSV.
pub const COMPLAINT_TEXT_COLUMN: &str = "complaint_text";
pub const CATEGORY_COLUMN: &str = "category";

// Embed the bytes compressed by `build.rs`
pub const COMPRESSED_STOP_WORDS: &[u8] = include_bytes!(env!("COMPRESSED_STOP_WORDS_PATH"));

pub const COMPRESSED_LEMMA_DICTIONARY: &[u8] =
    include_bytes!(env!("COMPRESSED_LEMMA_DICTIONARY_PATH"));

pub const COMPRESSED_BASE_WORDS: &[u8] = include_bytes!(env!("COMPRESSED_BASE_WORDS_PATH"));
