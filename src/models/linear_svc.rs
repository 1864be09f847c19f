use crate::models::{FeatureVector, PipelineConfig};
use crate::types::DecisionScore;
use crate::Error;
use linfa::prelude::*;
use linfa_svm::Svm;
use log::warn;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// A binary linear decision function `w·x + b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Decides every input the same way: positive when `bias > 0`.
    fn constant(dimension: usize, bias: f64) -> Self {
        Self::new(vec![0.0; dimension], bias)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Signed distance-like score; positive means the positive class.
    pub fn decision_score(&self, vector: &FeatureVector) -> DecisionScore {
        vector.dot(&self.weights) + self.bias
    }
}

/// Soft-margin linear-kernel SVM trained with `linfa-svm`'s SMO solver.
///
/// The fitted support vectors are folded into a single weight vector, `w = Σ αᵢ·xᵢ`, and the
/// solver's offset becomes the bias, `b = -ρ`, so scoring needs no training data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSvc {
    c: f64,
    tolerance: f64,
}

impl LinearSvc {
    pub fn new(c: f64, tolerance: f64) -> Self {
        Self { c, tolerance }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.svm_c, config.svm_tolerance)
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Fits a one-vs-rest member: `targets[i]` says whether `vectors[i]` is in the class.
    ///
    /// With only one class present the solver has nothing to separate, so the result is a
    /// constant model leaning toward that class.
    ///
    /// # Errors
    ///
    /// - `MismatchedTrainingData` when `vectors` and `targets` differ in length.
    /// - `DimensionMismatch` when a vector is not `dimension` wide.
    /// - `SvmTraining` when the solver rejects its parameters or the data.
    pub fn fit_binary(
        &self,
        vectors: &[&FeatureVector],
        targets: &[bool],
        dimension: usize,
    ) -> Result<LinearModel, Error> {
        if vectors.len() != targets.len() {
            return Err(Error::MismatchedTrainingData {
                vectors: vectors.len(),
                labels: targets.len(),
            });
        }
        if let Some(vector) = vectors.iter().find(|v| v.dimension() != dimension) {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                actual: vector.dimension(),
            });
        }

        let positives = targets.iter().filter(|&&target| target).count();
        if vectors.is_empty() {
            return Ok(LinearModel::constant(dimension, 0.0));
        }
        if positives == 0 || positives == targets.len() {
            warn!(
                "Training set of {} samples has a single class; using a constant decision",
                targets.len()
            );
            let bias = if positives == 0 { -1.0 } else { 1.0 };
            return Ok(LinearModel::constant(dimension, bias));
        }

        let records = dense_records(vectors, dimension)?;
        let dataset = Dataset::new(records.clone(), Array1::from_vec(targets.to_vec()));

        let svm = Svm::<f64, bool>::params()
            .pos_neg_weights(self.c, self.c)
            .eps(self.tolerance)
            .linear_kernel()
            .fit(&dataset)
            .map_err(|err| Error::SvmTraining(err.to_string()))?;

        // w = Σ(αᵢ·xᵢ); the solver's alphas already carry the target sign
        let mut weights = Array1::<f64>::zeros(dimension);
        for (row, &alpha) in records.rows().into_iter().zip(svm.alpha.iter()) {
            weights.scaled_add(alpha, &row);
        }

        Ok(LinearModel::new(weights.to_vec(), -svm.rho))
    }
}

fn dense_records(vectors: &[&FeatureVector], dimension: usize) -> Result<Array2<f64>, Error> {
    let mut data = Vec::with_capacity(vectors.len() * dimension);
    for vector in vectors {
        data.extend(vector.to_dense());
    }

    Array2::from_shape_vec((vectors.len(), dimension), data).map_err(|err| {
        Error::SvmTraining(format!("failed to build training matrix: {}", err))
    })
}
