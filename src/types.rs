// Types listed here are either shared across multiple files and/or exposed via the library.

/// Represents a token as an owned `String`. Tokens are the whitespace-separated units of
/// normalized text.
pub type Token = String;

/// Represents a borrowed view of a token as a `str`. This is used when ownership is not required.
pub type TokenRef = str;

/// Free text exactly as a caller supplied it.
pub type RawComplaint = str;

/// The output of the normalizer: lowercase ASCII words joined by single spaces.
pub type NormalizedText = String;

/// A department name learned from the `category` column of the training corpus.
pub type DepartmentLabel = String;

/// A contiguous sequence of 1..=N tokens joined by a single space.
pub type NGram = String;

/// Position of an n-gram within the frozen vocabulary, and therefore within every
/// `FeatureVector` produced by the same vectorizer.
pub type FeatureIndex = usize;

/// A probability in `[0, 1]`.
pub type Probability = f64;

/// Unbounded score produced by a linear model before calibration.
pub type DecisionScore = f64;

/// Lowercase hexadecimal SHA-256 digest used to pair artifacts with each other and with the
/// normalization resources they were trained with.
pub type Signature = String;
