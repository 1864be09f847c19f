use crate::models::{ClassProbabilityDistribution, FeatureVector, LinearModel, LinearSvc, PlattScaler};
use crate::types::{DepartmentLabel, Probability, Signature};
use crate::utils::compute_signature;
use crate::Error;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One label's linear model and the sigmoid that turns its scores into probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CalibratedMember {
    model: LinearModel,
    scaler: PlattScaler,
}

/// Models trained on all folds but one, calibrated on the held-out fold. Members are in
/// label order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CalibratedFold {
    members: Vec<CalibratedMember>,
}

/// One-vs-rest linear SVM with cross-validated sigmoid calibration.
///
/// For each of `k` stratified folds a full set of one-vs-rest SVMs is trained on the other
/// `k - 1` folds, and each SVM's scores on the held-out fold fit its Platt sigmoid. At
/// prediction time every fold yields a normalized distribution and the `k` distributions are
/// averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedClassifier {
    labels: Vec<DepartmentLabel>,
    feature_dimension: usize,
    folds: Vec<CalibratedFold>,
}

impl CalibratedClassifier {
    /// # Errors
    ///
    /// - `MismatchedTrainingData` when `vectors` and `labels` differ in length.
    /// - `EmptyCorpus` when there is nothing to train on.
    /// - `DimensionMismatch` when the vectors do not share one dimensionality.
    /// - `InsufficientLabels` with fewer than two distinct labels.
    /// - `InvalidConfig` when `fold_count < 2`, `InsufficientSamples` when there are fewer
    ///   samples than folds.
    /// - `SvmTraining` when a one-vs-rest member fails to train.
    pub fn fit<L: AsRef<str>>(
        vectors: &[FeatureVector],
        labels: &[L],
        svc: LinearSvc,
        fold_count: usize,
    ) -> Result<Self, Error> {
        if vectors.len() != labels.len() {
            return Err(Error::MismatchedTrainingData {
                vectors: vectors.len(),
                labels: labels.len(),
            });
        }

        let feature_dimension = vectors.first().ok_or(Error::EmptyCorpus)?.dimension();
        if let Some(vector) = vectors.iter().find(|v| v.dimension() != feature_dimension) {
            return Err(Error::DimensionMismatch {
                expected: feature_dimension,
                actual: vector.dimension(),
            });
        }

        let distinct_labels: BTreeSet<&str> = labels.iter().map(|label| label.as_ref()).collect();
        if distinct_labels.len() < 2 {
            return Err(Error::InsufficientLabels(distinct_labels.len()));
        }
        let class_labels: Vec<DepartmentLabel> =
            distinct_labels.into_iter().map(str::to_string).collect();

        if fold_count < 2 {
            return Err(Error::InvalidConfig(format!(
                "calibration_folds must be at least 2 but was {}",
                fold_count
            )));
        }
        if vectors.len() < fold_count {
            return Err(Error::InsufficientSamples {
                required: fold_count,
                found: vectors.len(),
            });
        }

        let fold_assignments = stratified_fold_assignments(labels, fold_count);

        let mut folds = Vec::with_capacity(fold_count);
        for fold_idx in 0..fold_count {
            let (training_indices, calibration_indices): (Vec<usize>, Vec<usize>) =
                (0..vectors.len()).partition(|&i| fold_assignments[i] != fold_idx);

            debug!(
                "Calibration fold {}/{}: {} training samples, {} calibration samples",
                fold_idx + 1,
                fold_count,
                training_indices.len(),
                calibration_indices.len()
            );

            let training_vectors: Vec<&FeatureVector> =
                training_indices.iter().map(|&i| &vectors[i]).collect();

            let members = class_labels
                .iter()
                .map(|class_label| -> Result<CalibratedMember, Error> {
                    let is_member = |i: &usize| labels[*i].as_ref() == class_label.as_str();

                    let training_targets: Vec<bool> =
                        training_indices.iter().map(is_member).collect();
                    let model =
                        svc.fit_binary(&training_vectors, &training_targets, feature_dimension)?;

                    let calibration_scores: Vec<f64> = calibration_indices
                        .iter()
                        .map(|&i| model.decision_score(&vectors[i]))
                        .collect();
                    let calibration_targets: Vec<bool> =
                        calibration_indices.iter().map(is_member).collect();
                    let scaler = PlattScaler::fit(&calibration_scores, &calibration_targets);

                    Ok(CalibratedMember { model, scaler })
                })
                .collect::<Result<Vec<_>, Error>>()?;

            folds.push(CalibratedFold { members });
        }

        Ok(Self {
            labels: class_labels,
            feature_dimension,
            folds,
        })
    }

    /// Labels in the order used by every distribution this classifier produces.
    pub fn labels(&self) -> &[DepartmentLabel] {
        &self.labels
    }

    pub fn feature_dimension(&self) -> usize {
        self.feature_dimension
    }

    pub fn fold_count(&self) -> usize {
        self.folds.len()
    }

    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `vector` was not produced by the paired vectorizer.
    pub fn predict_proba(
        &self,
        vector: &FeatureVector,
    ) -> Result<ClassProbabilityDistribution, Error> {
        if vector.dimension() != self.feature_dimension {
            return Err(Error::DimensionMismatch {
                expected: self.feature_dimension,
                actual: vector.dimension(),
            });
        }

        Ok(self.probabilities_for(vector))
    }

    /// Most probable label, with the same tie-break as triage.
    pub fn predict(&self, vector: &FeatureVector) -> Result<DepartmentLabel, Error> {
        let distribution = self.predict_proba(vector)?;
        Ok(distribution.argmax().0.to_string())
    }

    /// Caller guarantees `vector.dimension() == self.feature_dimension`.
    pub(crate) fn probabilities_for(&self, vector: &FeatureVector) -> ClassProbabilityDistribution {
        let label_count = self.labels.len();
        let mut averaged: Vec<Probability> = vec![0.0; label_count];

        for fold in &self.folds {
            let probabilities: Vec<Probability> = fold
                .members
                .iter()
                .map(|member| member.scaler.probability(member.model.decision_score(vector)))
                .collect();
            let total: Probability = probabilities.iter().sum();

            for (accumulated, probability) in averaged.iter_mut().zip(&probabilities) {
                *accumulated += if total > 0.0 {
                    probability / total
                } else {
                    1.0 / label_count as f64
                };
            }
        }

        let fold_count = self.folds.len().max(1) as f64;
        let entries = self
            .labels
            .iter()
            .cloned()
            .zip(averaged.into_iter().map(|sum| (sum / fold_count).clamp(0.0, 1.0)))
            .collect();

        ClassProbabilityDistribution::from_sorted_entries(entries)
    }

    /// Hash of the label set, recorded in the artifact manifest.
    pub fn label_signature(&self) -> Signature {
        compute_signature("labels", self.labels.iter().map(|label| label.as_bytes()))
    }

    /// Checks the invariants a freshly deserialized classifier must hold.
    pub fn validate(&self) -> Result<(), Error> {
        if self.labels.len() < 2 {
            return Err(Error::InsufficientLabels(self.labels.len()));
        }
        if self.labels.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::ArtifactMismatch(
                "classifier labels are not strictly sorted".to_string(),
            ));
        }
        if self.folds.is_empty() {
            return Err(Error::ArtifactMismatch(
                "classifier has no calibrated folds".to_string(),
            ));
        }

        for fold in &self.folds {
            if fold.members.len() != self.labels.len() {
                return Err(Error::ArtifactMismatch(format!(
                    "calibrated fold has {} members for {} labels",
                    fold.members.len(),
                    self.labels.len()
                )));
            }
            if let Some(member) = fold
                .members
                .iter()
                .find(|member| member.model.weights().len() != self.feature_dimension)
            {
                return Err(Error::DimensionMismatch {
                    expected: self.feature_dimension,
                    actual: member.model.weights().len(),
                });
            }
        }

        Ok(())
    }
}

/// Assigns fold numbers round-robin after grouping samples by label, so every fold receives
/// a near-equal share of each label.
fn stratified_fold_assignments<L: AsRef<str>>(labels: &[L], fold_count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..labels.len()).collect();
    order.sort_by(|&a, &b| labels[a].as_ref().cmp(labels[b].as_ref()));

    let mut assignments = vec![0; labels.len()];
    for (position, &sample_idx) in order.iter().enumerate() {
        assignments[sample_idx] = position % fold_count;
    }

    assignments
}
