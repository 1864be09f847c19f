use crate::constants::{
    ARTIFACT_FORMAT_VERSION, CLASSIFIER_ARTIFACT_FILE_NAME, VECTORIZER_ARTIFACT_FILE_NAME,
};
use crate::models::{CalibratedClassifier, FittedVectorizer, Lexicon};
use crate::types::Signature;
use crate::utils::write_atomically;
use crate::Error;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Compatibility record written into both artifact files. A pair loads only when both
/// manifests are identical and every signature matches the state it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub format_version: u32,
    pub model_version: String,
    pub vocabulary_signature: Signature,
    pub label_signature: Signature,
    pub normalizer_signature: Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ArtifactKind {
    Vectorizer,
    Classifier,
}

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactHeader {
    kind: ArtifactKind,
    manifest: ArtifactManifest,
}

/// A trained vectorizer and classifier together with the lexicon used to normalize their
/// training text.
///
/// On disk this is two gzip-compressed bincode files, `vectorizer.bin` (which also carries
/// the lexicon) and `classifier.bin`. Each starts with the format version and a header
/// holding the shared [`ArtifactManifest`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifacts {
    manifest: ArtifactManifest,
    vectorizer: FittedVectorizer,
    classifier: CalibratedClassifier,
    lexicon: Lexicon,
}

impl ModelArtifacts {
    /// Pairs freshly trained components and computes their manifest.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty model version and `DimensionMismatch` when the
    /// classifier was trained on vectors of a different size.
    pub fn new(
        model_version: &str,
        vectorizer: FittedVectorizer,
        classifier: CalibratedClassifier,
        lexicon: Lexicon,
    ) -> Result<Self, Error> {
        if model_version.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "model version must not be empty".to_string(),
            ));
        }
        if classifier.feature_dimension() != vectorizer.dimension() {
            return Err(Error::DimensionMismatch {
                expected: vectorizer.dimension(),
                actual: classifier.feature_dimension(),
            });
        }

        let manifest = ArtifactManifest {
            format_version: ARTIFACT_FORMAT_VERSION,
            model_version: model_version.trim().to_string(),
            vocabulary_signature: vectorizer.signature(),
            label_signature: classifier.label_signature(),
            normalizer_signature: lexicon.signature(),
        };

        Ok(Self {
            manifest,
            vectorizer,
            classifier,
            lexicon,
        })
    }

    pub fn vectorizer_path(model_dir: &Path) -> PathBuf {
        model_dir.join(VECTORIZER_ARTIFACT_FILE_NAME)
    }

    pub fn classifier_path(model_dir: &Path) -> PathBuf {
        model_dir.join(CLASSIFIER_ARTIFACT_FILE_NAME)
    }

    pub fn manifest(&self) -> &ArtifactManifest {
        &self.manifest
    }

    pub fn model_version(&self) -> &str {
        &self.manifest.model_version
    }

    pub fn vectorizer(&self) -> &FittedVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &CalibratedClassifier {
        &self.classifier
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn into_parts(self) -> (ArtifactManifest, FittedVectorizer, CalibratedClassifier, Lexicon) {
        (self.manifest, self.vectorizer, self.classifier, self.lexicon)
    }

    /// Writes both files into `model_dir`, creating it if needed. Each file is replaced
    /// atomically.
    pub fn save(&self, model_dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(model_dir)?;

        let vectorizer_path = Self::vectorizer_path(model_dir);
        let vectorizer_bytes = encode_artifact(
            &vectorizer_path,
            ArtifactKind::Vectorizer,
            &self.manifest,
            &(&self.vectorizer, &self.lexicon),
        )?;

        let classifier_path = Self::classifier_path(model_dir);
        let classifier_bytes = encode_artifact(
            &classifier_path,
            ArtifactKind::Classifier,
            &self.manifest,
            &self.classifier,
        )?;

        write_atomically(&vectorizer_path, &vectorizer_bytes)?;
        write_atomically(&classifier_path, &classifier_bytes)?;

        debug!(
            "Wrote model {} to {:?} and {:?}",
            self.manifest.model_version, vectorizer_path, classifier_path
        );

        Ok(())
    }

    /// Reads and cross-checks the artifact pair in `model_dir`.
    ///
    /// # Errors
    ///
    /// - `ArtifactMissing` if either file is absent or unreadable.
    /// - `ArtifactCorrupt` / `UnsupportedArtifactFormat` if a file can't be decoded.
    /// - `ArtifactMismatch` if the files come from different training runs or their
    ///   contents don't match the recorded signatures.
    /// - `NormalizationDrift` if the pinned lexicon doesn't match its recorded signature.
    pub fn load(model_dir: &Path) -> Result<Self, Error> {
        let vectorizer_path = Self::vectorizer_path(model_dir);
        let classifier_path = Self::classifier_path(model_dir);

        let (vectorizer_header, (vectorizer, lexicon)): (_, (FittedVectorizer, Lexicon)) =
            decode_artifact(&vectorizer_path, ArtifactKind::Vectorizer)?;
        let (classifier_header, classifier): (_, CalibratedClassifier) =
            decode_artifact(&classifier_path, ArtifactKind::Classifier)?;

        let manifest = vectorizer_header.manifest;
        if manifest != classifier_header.manifest {
            return Err(Error::ArtifactMismatch(format!(
                "{:?} belongs to model {:?} but {:?} belongs to model {:?}",
                vectorizer_path,
                manifest.model_version,
                classifier_path,
                classifier_header.manifest.model_version
            )));
        }

        vectorizer.validate()?;
        classifier.validate()?;

        if vectorizer.signature() != manifest.vocabulary_signature {
            return Err(Error::ArtifactMismatch(format!(
                "vocabulary in {:?} does not match its recorded signature",
                vectorizer_path
            )));
        }
        if classifier.label_signature() != manifest.label_signature {
            return Err(Error::ArtifactMismatch(format!(
                "labels in {:?} do not match their recorded signature",
                classifier_path
            )));
        }
        if classifier.feature_dimension() != vectorizer.dimension() {
            return Err(Error::ArtifactMismatch(format!(
                "classifier expects {} features but the vectorizer produces {}",
                classifier.feature_dimension(),
                vectorizer.dimension()
            )));
        }

        let lexicon_signature = lexicon.signature();
        if lexicon_signature != manifest.normalizer_signature {
            return Err(Error::NormalizationDrift {
                expected: manifest.normalizer_signature,
                actual: lexicon_signature,
            });
        }

        debug!(
            "Loaded model {} from {:?}",
            manifest.model_version, model_dir
        );

        Ok(Self {
            manifest,
            vectorizer,
            classifier,
            lexicon,
        })
    }
}

fn encode_artifact<T: Serialize>(
    path: &Path,
    kind: ArtifactKind,
    manifest: &ArtifactManifest,
    payload: &T,
) -> Result<Vec<u8>, Error> {
    let encode_error = |source| Error::ArtifactEncode {
        path: path.to_path_buf(),
        source,
    };

    let header = ArtifactHeader {
        kind,
        manifest: manifest.clone(),
    };

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    bincode::serialize_into(&mut encoder, &ARTIFACT_FORMAT_VERSION).map_err(encode_error)?;
    bincode::serialize_into(&mut encoder, &header).map_err(encode_error)?;
    bincode::serialize_into(&mut encoder, payload).map_err(encode_error)?;

    Ok(encoder.finish()?)
}

fn decode_artifact<T: DeserializeOwned>(
    path: &Path,
    expected_kind: ArtifactKind,
) -> Result<(ArtifactHeader, T), Error> {
    let bytes = fs::read(path).map_err(|source| Error::ArtifactMissing {
        path: path.to_path_buf(),
        source,
    })?;

    let corrupt_error = |source| Error::ArtifactCorrupt {
        path: path.to_path_buf(),
        source,
    };

    let mut decoder = GzDecoder::new(bytes.as_slice());

    let format_version: u32 = bincode::deserialize_from(&mut decoder).map_err(corrupt_error)?;
    if format_version != ARTIFACT_FORMAT_VERSION {
        return Err(Error::UnsupportedArtifactFormat {
            path: path.to_path_buf(),
            expected: ARTIFACT_FORMAT_VERSION,
            found: format_version,
        });
    }

    let header: ArtifactHeader = bincode::deserialize_from(&mut decoder).map_err(corrupt_error)?;
    if header.kind != expected_kind {
        return Err(Error::ArtifactMismatch(format!(
            "{:?} holds a {:?} artifact where a {:?} artifact was expected",
            path, header.kind, expected_kind
        )));
    }

    let payload: T = bincode::deserialize_from(&mut decoder).map_err(corrupt_error)?;

    Ok((header, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureVector, LinearSvc, TfidfVectorizer};
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_artifacts(model_version: &str, extra_label: &str) -> ModelArtifacts {
        let corpus = [
            "pothole road",
            "pothole bridge",
            "garbage pile",
            "garbage bin",
            "clinic doctor",
            "clinic nurse",
        ];
        let labels = [
            "Infrastructure",
            "Infrastructure",
            "Sanitation",
            "Sanitation",
            extra_label,
            extra_label,
        ];

        let vectorizer = TfidfVectorizer::new((1, 2), 100, 2)
            .unwrap()
            .fit(&corpus)
            .unwrap();
        let vectors: Vec<FeatureVector> = vectorizer.transform(&corpus);
        let classifier =
            CalibratedClassifier::fit(&vectors, &labels, LinearSvc::new(0.8, 1e-4), 2)
                .unwrap();
        let lexicon = Lexicon::from_sources("the\n", "inflection,lemma\nroads,road\n").unwrap();

        ModelArtifacts::new(model_version, vectorizer, classifier, lexicon).unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let artifacts = sample_artifacts("v1", "Healthcare");

        artifacts.save(dir.path()).unwrap();
        let loaded = ModelArtifacts::load(dir.path()).unwrap();

        assert_eq!(loaded, artifacts);
        assert_eq!(loaded.manifest().format_version, ARTIFACT_FORMAT_VERSION);
        assert_eq!(loaded.model_version(), "v1");
    }

    #[test]
    fn test_missing_classifier() {
        let dir = TempDir::new().unwrap();
        sample_artifacts("v1", "Healthcare").save(dir.path()).unwrap();
        fs::remove_file(ModelArtifacts::classifier_path(dir.path())).unwrap();

        assert!(matches!(
            ModelArtifacts::load(dir.path()),
            Err(Error::ArtifactMissing { .. })
        ));
    }

    #[test]
    fn test_mixed_pair_is_mismatch() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        sample_artifacts("v1", "Healthcare").save(first.path()).unwrap();
        sample_artifacts("v2", "General").save(second.path()).unwrap();

        fs::copy(
            ModelArtifacts::classifier_path(second.path()),
            ModelArtifacts::classifier_path(first.path()),
        )
        .unwrap();

        assert!(matches!(
            ModelArtifacts::load(first.path()),
            Err(Error::ArtifactMismatch(_))
        ));
    }

    #[test]
    fn test_swapped_files_are_mismatch() {
        let dir = TempDir::new().unwrap();
        sample_artifacts("v1", "Healthcare").save(dir.path()).unwrap();

        let vectorizer_path = ModelArtifacts::vectorizer_path(dir.path());
        let classifier_path = ModelArtifacts::classifier_path(dir.path());
        let vectorizer_bytes = fs::read(&vectorizer_path).unwrap();
        fs::copy(&classifier_path, &vectorizer_path).unwrap();
        fs::write(&classifier_path, vectorizer_bytes).unwrap();

        assert!(matches!(
            ModelArtifacts::load(dir.path()),
            Err(Error::ArtifactMismatch(_))
        ));
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let dir = TempDir::new().unwrap();
        sample_artifacts("v1", "Healthcare").save(dir.path()).unwrap();
        fs::write(ModelArtifacts::vectorizer_path(dir.path()), b"not a model").unwrap();

        assert!(matches!(
            ModelArtifacts::load(dir.path()),
            Err(Error::ArtifactCorrupt { .. })
        ));
    }

    #[test]
    fn test_future_format_is_unsupported() {
        let dir = TempDir::new().unwrap();
        sample_artifacts("v1", "Healthcare").save(dir.path()).unwrap();

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        bincode::serialize_into(&mut encoder, &(ARTIFACT_FORMAT_VERSION + 1)).unwrap();
        let bytes = encoder.finish().unwrap();
        fs::File::create(ModelArtifacts::classifier_path(dir.path()))
            .unwrap()
            .write_all(&bytes)
            .unwrap();

        assert!(matches!(
            ModelArtifacts::load(dir.path()),
            Err(Error::UnsupportedArtifactFormat { found, .. }) if found == ARTIFACT_FORMAT_VERSION + 1
        ));
    }

    #[test]
    fn test_tampered_lexicon_is_drift() {
        let dir = TempDir::new().unwrap();
        let artifacts = sample_artifacts("v1", "Healthcare");
        let manifest = artifacts.manifest().clone();
        let tampered = Lexicon::from_sources("the\nroad\n", "inflection,lemma\nroads,road\n").unwrap();

        let bytes = encode_artifact(
            &ModelArtifacts::vectorizer_path(dir.path()),
            ArtifactKind::Vectorizer,
            &manifest,
            &(artifacts.vectorizer(), &tampered),
        )
        .unwrap();
        artifacts.save(dir.path()).unwrap();
        fs::write(ModelArtifacts::vectorizer_path(dir.path()), bytes).unwrap();

        assert!(matches!(
            ModelArtifacts::load(dir.path()),
            Err(Error::NormalizationDrift { .. })
        ));
    }

    #[test]
    fn test_empty_model_version_is_rejected() {
        let artifacts = sample_artifacts("v1", "Healthcare");
        let (_, vectorizer, classifier, lexicon) = artifacts.into_parts();
        assert!(matches!(
            ModelArtifacts::new(" ", vectorizer, classifier, lexicon),
            Err(Error::InvalidConfig(_))
        ));
    }
}
