use crate::models::{FeatureVector, PipelineConfig};
use crate::types::{FeatureIndex, NGram, Signature};
use crate::utils::{compute_signature, extract_ngrams};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Unfitted TF-IDF vectorizer settings.
///
/// Fitting consumes the settings and yields a [`FittedVectorizer`]; there is no way to
/// transform text with a vectorizer that has not learned a vocabulary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfidfVectorizer {
    ngram_range: (usize, usize),
    max_vocabulary_size: usize,
    min_token_length: usize,
}

impl TfidfVectorizer {
    pub fn new(
        ngram_range: (usize, usize),
        max_vocabulary_size: usize,
        min_token_length: usize,
    ) -> Result<Self, Error> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::InvalidConfig(format!(
                "ngram_range must satisfy 1 <= min <= max but was ({}, {})",
                min_n, max_n
            )));
        }
        if max_vocabulary_size == 0 {
            return Err(Error::InvalidConfig(
                "max_vocabulary_size must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            ngram_range,
            max_vocabulary_size,
            min_token_length,
        })
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, Error> {
        Self::new(
            config.ngram_range,
            config.max_vocabulary_size,
            config.min_token_length,
        )
    }

    /// Learns the vocabulary and IDF weights from a normalized corpus.
    ///
    /// N-grams are ranked by document frequency (ties broken alphabetically) and the top
    /// `max_vocabulary_size` are kept. Feature indices follow alphabetical order of the kept
    /// n-grams.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCorpus` for an empty corpus and `EmptyVocabulary` when no document
    /// contains a usable n-gram.
    pub fn fit<S: AsRef<str>>(self, corpus: &[S]) -> Result<FittedVectorizer, Error> {
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut document_frequencies: HashMap<NGram, usize> = HashMap::new();
        for document in corpus {
            let unique_ngrams: HashSet<NGram> =
                extract_ngrams(document.as_ref(), self.ngram_range, self.min_token_length)
                    .into_iter()
                    .collect();

            for ngram in unique_ngrams {
                *document_frequencies.entry(ngram).or_insert(0) += 1;
            }
        }

        if document_frequencies.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut ranked: Vec<(NGram, usize)> = document_frequencies.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_vocabulary_size);
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        // Smoothed IDF, as if one extra document contained every term
        let document_count = corpus.len() as f64;
        let (vocabulary, idf) = ranked
            .into_iter()
            .map(|(ngram, frequency)| {
                let idf = ((1.0 + document_count) / (1.0 + frequency as f64)).ln() + 1.0;
                (ngram, idf)
            })
            .unzip();

        Ok(FittedVectorizer {
            ngram_range: self.ngram_range,
            min_token_length: self.min_token_length,
            vocabulary,
            idf,
        })
    }
}

/// A vectorizer with a frozen vocabulary. Immutable once fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedVectorizer {
    ngram_range: (usize, usize),
    min_token_length: usize,
    vocabulary: Vec<NGram>,
    idf: Vec<f64>,
}

impl FittedVectorizer {
    /// Number of features in every vector this vectorizer produces.
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    pub fn vocabulary(&self) -> &[NGram] {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn feature_index(&self, ngram: &str) -> Option<FeatureIndex> {
        self.vocabulary
            .binary_search_by(|term| term.as_str().cmp(ngram))
            .ok()
    }

    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Vec<FeatureVector> {
        texts
            .iter()
            .map(|text| self.transform_one(text.as_ref()))
            .collect()
    }

    /// Raw n-gram counts scaled by IDF and normalized to unit length. N-grams outside the
    /// vocabulary are ignored, so any text (including "") yields a valid vector.
    pub fn transform_one(&self, text: &str) -> FeatureVector {
        let mut counts: BTreeMap<FeatureIndex, f64> = BTreeMap::new();
        for ngram in extract_ngrams(text, self.ngram_range, self.min_token_length) {
            if let Some(index) = self.feature_index(&ngram) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .filter_map(|(index, count)| self.idf.get(index).map(|idf| (index, count * idf)))
            .collect();

        let mut vector = FeatureVector::from_sorted_entries(self.dimension(), entries);
        vector.l2_normalize();
        vector
    }

    /// Checks the invariants a freshly deserialized vectorizer must hold.
    pub fn validate(&self) -> Result<(), Error> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(Error::ArtifactMismatch(format!(
                "vectorizer has {} vocabulary terms but {} IDF weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }

        if self.vocabulary.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::ArtifactMismatch(
                "vectorizer vocabulary is not strictly sorted".to_string(),
            ));
        }

        Ok(())
    }

    /// Hash of the complete vectorizer state, used to pair it with its classifier.
    pub fn signature(&self) -> Signature {
        let settings = [
            self.ngram_range.0 as u64,
            self.ngram_range.1 as u64,
            self.min_token_length as u64,
        ]
        .map(u64::to_le_bytes);

        let idf_bits = self.idf.iter().map(|idf| idf.to_bits().to_le_bytes());

        compute_signature(
            "vocabulary",
            settings
                .iter()
                .map(|bytes| bytes.to_vec())
                .chain(self.vocabulary.iter().map(|term| term.as_bytes().to_vec()))
                .chain(idf_bits.map(|bytes| bytes.to_vec())),
        )
    }
}
