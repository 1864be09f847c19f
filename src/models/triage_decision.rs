use crate::constants::{DEFAULT_TRIAGE_THRESHOLD, MANUAL_TRIAGE_ROUTE};
use crate::models::ClassProbabilityDistribution;
use crate::types::{DepartmentLabel, Probability};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum confidence for automated routing, guaranteed to lie in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TriageThreshold(f64);

impl TriageThreshold {
    pub fn new(value: f64) -> Result<Self, Error> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidConfig(format!(
                "triage_threshold must be in (0, 1] but was {}",
                value
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for TriageThreshold {
    fn default() -> Self {
        Self(DEFAULT_TRIAGE_THRESHOLD)
    }
}

impl TryFrom<f64> for TriageThreshold {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TriageThreshold> for f64 {
    fn from(threshold: TriageThreshold) -> f64 {
        threshold.0
    }
}

/// Where a complaint goes, and whether a person needs to look at it first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageDecision {
    pub predicted_label: DepartmentLabel,
    pub confidence: Probability,
    /// `predicted_label` when confident, otherwise [`MANUAL_TRIAGE_ROUTE`].
    pub routed_to: String,
    pub requires_human_review: bool,
}

impl TriageDecision {
    /// Routes on the most probable label. Confidence exactly at the threshold is confident.
    pub fn decide(
        distribution: &ClassProbabilityDistribution,
        threshold: TriageThreshold,
    ) -> Self {
        let (predicted_label, confidence) = distribution.argmax();

        let requires_human_review = confidence < threshold.value();
        let routed_to = if requires_human_review {
            MANUAL_TRIAGE_ROUTE.to_string()
        } else {
            predicted_label.to_string()
        };

        Self {
            predicted_label: predicted_label.to_string(),
            confidence,
            routed_to,
            requires_human_review,
        }
    }
}

impl fmt::Display for TriageDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2}%) -> {}",
            self.predicted_label,
            self.confidence * 100.0,
            self.routed_to
        )
    }
}
