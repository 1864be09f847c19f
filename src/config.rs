use crate::constants::{
    DEFAULT_CALIBRATION_FOLDS, DEFAULT_MAX_VOCABULARY_SIZE, DEFAULT_MIN_TOKEN_LENGTH,
    DEFAULT_NGRAM_RANGE, DEFAULT_SEED, DEFAULT_SVM_C, DEFAULT_SVM_TOLERANCE, DEFAULT_TEST_RATIO,
    DEFAULT_TRIAGE_THRESHOLD,
};
use crate::models::PipelineConfig;

pub const DEFAULT_PIPELINE_CONFIG: PipelineConfig = PipelineConfig {
    triage_threshold: DEFAULT_TRIAGE_THRESHOLD,
    max_vocabulary_size: DEFAULT_MAX_VOCABULARY_SIZE,
    ngram_range: DEFAULT_NGRAM_RANGE,
    min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
    calibration_folds: DEFAULT_CALIBRATION_FOLDS,
    svm_c: DEFAULT_SVM_C,
    svm_tolerance: DEFAULT_SVM_TOLERANCE,
    test_ratio: DEFAULT_TEST_RATIO,
    seed: DEFAULT_SEED,
    stop_words_path: None,
    lemmas_path: None,
    base_words_path: None,
};
