use crate::constants::{
    COMPRESSED_BASE_WORDS, COMPRESSED_LEMMA_DICTIONARY, COMPRESSED_STOP_WORDS,
    NORMALIZER_PROCEDURE_VERSION,
};
use crate::types::{Signature, Token, TokenRef};
use crate::utils::compute_signature;
use crate::Error;
use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

/// Suffix rewrites tried, in order, when a token has no dictionary entry. A rewrite is only
/// accepted when it lands on a known base form.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("xes", "x"),
    ("zes", "z"),
    ("ses", "s"),
    ("men", "man"),
    ("ing", ""),
    ("ing", "e"),
    ("ied", "y"),
    ("ed", ""),
    ("ed", "e"),
    ("es", ""),
    ("es", "e"),
    ("s", ""),
];

/// Serialized shape of a [`Lexicon`]; the derived base-form index is rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LexiconResources {
    stop_words: BTreeSet<Token>,
    lemmas: BTreeMap<Token, Token>,
    base_words: BTreeSet<Token>,
}

/// The stop-word set, lemma exceptions and base-word list the normalizer depends on.
///
/// A lexicon is pinned inside every vectorizer artifact so the predictor normalizes text with
/// exactly the resources the trainer used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LexiconResources", into = "LexiconResources")]
pub struct Lexicon {
    stop_words: BTreeSet<Token>,
    lemmas: BTreeMap<Token, Token>,
    base_words: BTreeSet<Token>,
    /// Every form lemmatization may end on: base words plus lemma values, minus stop words
    /// and words the dictionary rewrites.
    base_forms: BTreeSet<Token>,
}

impl Lexicon {
    /// Builds a lexicon from in-memory resources.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` when a dictionary entry is empty or contains anything other
    /// than lowercase ASCII letters, or when a lemma is itself rewritten to another word.
    pub fn new<S, L>(stop_words: S, lemmas: L) -> Result<Self, Error>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        L: IntoIterator<Item = (Token, Token)>,
    {
        let stop_words: BTreeSet<Token> = stop_words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();

        let mut lemma_map = BTreeMap::new();
        for (inflection, lemma) in lemmas {
            let inflection = inflection.trim().to_string();
            let lemma = lemma.trim().to_string();

            for entry in [&inflection, &lemma] {
                if !is_lowercase_ascii_word(entry) {
                    return Err(Error::InvalidResource(format!(
                        "lemma dictionary entry {:?} must be a non-empty lowercase ASCII word",
                        entry
                    )));
                }
            }

            lemma_map.insert(inflection, lemma);
        }

        if let Some((inflection, lemma)) = lemma_map
            .iter()
            .find(|(_, lemma)| lemma_map.get(*lemma).is_some_and(|next| next != *lemma))
        {
            return Err(Error::InvalidResource(format!(
                "lemma {:?} for {:?} is itself rewritten by the dictionary",
                lemma, inflection
            )));
        }

        let mut lexicon = Self {
            stop_words,
            lemmas: lemma_map,
            base_words: BTreeSet::new(),
            base_forms: BTreeSet::new(),
        };
        lexicon.index_base_forms();

        Ok(lexicon)
    }

    /// Adds dictionary base forms that suffix rules may resolve to, e.g. `bus` for `buses`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` for an entry that is not a lowercase ASCII word.
    pub fn with_base_words<B>(mut self, base_words: B) -> Result<Self, Error>
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        for word in base_words {
            let word = word.as_ref().trim();
            if !is_lowercase_ascii_word(word) {
                return Err(Error::InvalidResource(format!(
                    "base word {:?} must be a non-empty lowercase ASCII word",
                    word
                )));
            }
            self.base_words.insert(word.to_string());
        }
        self.index_base_forms();

        Ok(self)
    }

    /// Decompresses and parses the stop-word list, lemma dictionary and base-word list embedded
    /// at build time.
    pub fn embedded() -> Result<Self, Error> {
        Self::from_files(None, None, None)
    }

    /// Loads resources from disk, falling back to the embedded resource for any path not given.
    pub fn from_files(
        stop_words_path: Option<&Path>,
        lemmas_path: Option<&Path>,
        base_words_path: Option<&Path>,
    ) -> Result<Self, Error> {
        let stop_words_text = match stop_words_path {
            Some(path) => fs::read_to_string(path)?,
            None => decompress_to_string(COMPRESSED_STOP_WORDS)?,
        };

        let lemma_csv = match lemmas_path {
            Some(path) => fs::read_to_string(path)?,
            None => decompress_to_string(COMPRESSED_LEMMA_DICTIONARY)?,
        };

        let base_words_text = match base_words_path {
            Some(path) => fs::read_to_string(path)?,
            None => decompress_to_string(COMPRESSED_BASE_WORDS)?,
        };

        Self::from_sources(&stop_words_text, &lemma_csv)?
            .with_base_words(word_list_entries(&base_words_text))
    }

    /// Parses a newline-delimited stop-word list (blank lines and `#` comments ignored) and an
    /// `inflection,lemma` CSV. No base words beyond the lemmas are known.
    pub fn from_sources(stop_words_text: &str, lemma_csv: &str) -> Result<Self, Error> {
        Self::new(
            word_list_entries(stop_words_text),
            parse_lemma_csv(lemma_csv)?,
        )
    }

    pub fn is_stop_word(&self, token: &TokenRef) -> bool {
        self.stop_words.contains(token)
    }

    /// Reduces `token` to its dictionary base form; unknown words pass through unchanged.
    pub fn lemmatize<'a>(&'a self, token: &'a TokenRef) -> Cow<'a, str> {
        if let Some(lemma) = self.lemmas.get(token) {
            return Cow::Borrowed(lemma.as_str());
        }

        if self.base_forms.contains(token) {
            return Cow::Borrowed(token);
        }

        SUFFIX_RULES
            .iter()
            .filter_map(|(suffix, replacement)| {
                token
                    .strip_suffix(suffix)
                    .filter(|stem| !stem.is_empty())
                    .map(|stem| format!("{}{}", stem, replacement))
            })
            .find(|candidate| self.base_forms.contains(candidate))
            .map_or(Cow::Borrowed(token), Cow::Owned)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    pub fn base_word_count(&self) -> usize {
        self.base_words.len()
    }

    fn index_base_forms(&mut self) {
        let lemmas = &self.lemmas;
        let stop_words = &self.stop_words;

        self.base_forms = self
            .base_words
            .iter()
            .chain(lemmas.values())
            .filter(|word| !stop_words.contains(*word))
            .filter(|word| lemmas.get(*word).map_or(true, |lemma| lemma == *word))
            .cloned()
            .collect();
    }

    /// Checksum of the normalization procedure version plus every resource entry.
    pub fn signature(&self) -> Signature {
        let version = NORMALIZER_PROCEDURE_VERSION.to_le_bytes();
        let stop_words = self.stop_words.iter().map(|word| word.as_bytes());
        let lemmas = self
            .lemmas
            .iter()
            .flat_map(|(inflection, lemma)| [inflection.as_bytes(), lemma.as_bytes()]);
        let base_words = self.base_words.iter().map(|word| word.as_bytes());

        compute_signature(
            "normalizer",
            std::iter::once(&version[..])
                .chain(std::iter::once(&b"stop_words"[..]))
                .chain(stop_words)
                .chain(std::iter::once(&b"lemmas"[..]))
                .chain(lemmas)
                .chain(std::iter::once(&b"base_words"[..]))
                .chain(base_words),
        )
    }
}

impl TryFrom<LexiconResources> for Lexicon {
    type Error = Error;

    fn try_from(resources: LexiconResources) -> Result<Self, Self::Error> {
        Lexicon::new(resources.stop_words, resources.lemmas)?.with_base_words(resources.base_words)
    }
}

impl From<Lexicon> for LexiconResources {
    fn from(lexicon: Lexicon) -> Self {
        LexiconResources {
            stop_words: lexicon.stop_words,
            lemmas: lexicon.lemmas,
            base_words: lexicon.base_words,
        }
    }
}

fn is_lowercase_ascii_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase())
}

/// Non-blank lines of a word list, skipping `#` comments.
fn word_list_entries(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn decompress_to_string(compressed: &[u8]) -> Result<String, Error> {
    let mut decoder = GzDecoder::new(compressed);
    let mut decompressed = String::new();
    decoder.read_to_string(&mut decompressed)?;
    Ok(decompressed)
}

fn parse_lemma_csv(csv_str: &str) -> Result<Vec<(Token, Token)>, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(Cursor::new(csv_str));

    let headers = reader
        .headers()
        .map_err(|e| Error::ParserError(format!("Failed to read headers: {}", e)))?
        .clone();

    let inflection_idx = headers
        .iter()
        .position(|h| h == "inflection")
        .ok_or_else(|| Error::ParserError("Missing 'inflection' column".to_string()))?;
    let lemma_idx = headers
        .iter()
        .position(|h| h == "lemma")
        .ok_or_else(|| Error::ParserError("Missing 'lemma' column".to_string()))?;

    let mut lemmas = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| Error::ParserError(format!("Failed to read record: {}", e)))?;

        let inflection = record
            .get(inflection_idx)
            .ok_or_else(|| Error::ParserError("Missing 'inflection' field".to_string()))?;
        let lemma = record
            .get(lemma_idx)
            .ok_or_else(|| Error::ParserError("Missing 'lemma' field".to_string()))?;

        lemmas.push((inflection.to_string(), lemma.to_string()));
    }

    Ok(lemmas)
}
