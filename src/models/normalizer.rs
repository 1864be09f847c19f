use crate::models::Lexicon;
use crate::types::{NormalizedText, RawComplaint, Signature};
use crate::Error;
use std::fmt;
use std::sync::Arc;

/// The single text-cleaning procedure shared by training and inference.
///
/// Steps, in order: lowercase, drop everything that is not an ASCII letter or whitespace,
/// split on whitespace, discard stop words, lemmatize, rejoin with single spaces.
#[derive(Debug, Clone)]
pub struct Normalizer {
    lexicon: Arc<Lexicon>,
}

impl Normalizer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
        }
    }

    pub fn from_shared(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Normalizer backed by the stop words and lemmas embedded at build time.
    pub fn embedded() -> Result<Self, Error> {
        Ok(Self::new(Lexicon::embedded()?))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Checksum of the resources this normalizer depends on.
    pub fn signature(&self) -> Signature {
        self.lexicon.signature()
    }

    pub fn normalize(&self, text: &RawComplaint) -> NormalizedText {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .collect();

        let mut normalized = NormalizedText::with_capacity(cleaned.len());

        for token in cleaned
            .split_whitespace()
            .filter(|token| !self.lexicon.is_stop_word(token))
        {
            if !normalized.is_empty() {
                normalized.push(' ');
            }
            normalized.push_str(&self.lexicon.lemmatize(token));
        }

        normalized
    }

    /// Coerces any displayable value to its string form before normalizing it.
    pub fn normalize_value<T: fmt::Display + ?Sized>(&self, value: &T) -> NormalizedText {
        self.normalize(&value.to_string())
    }

    pub fn normalize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<NormalizedText> {
        texts
            .iter()
            .map(|text| self.normalize(text.as_ref()))
            .collect()
    }
}
