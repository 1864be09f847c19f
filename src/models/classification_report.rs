use crate::types::DepartmentLabel;
use crate::Error;
use std::collections::BTreeMap;
use std::fmt;

/// Per-label precision, recall, and F1 on held-out data.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMetrics {
    pub label: DepartmentLabel,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Number of held-out samples whose true label is `label`.
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    /// Sorted by label.
    pub per_label: Vec<LabelMetrics>,
    pub accuracy: f64,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1_score: f64,
    pub total_support: usize,
}

#[derive(Default)]
struct Counts {
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
}

impl ClassificationReport {
    /// Compares expected labels with predictions position by position. Labels that only ever
    /// appear as predictions are reported with zero support.
    ///
    /// # Errors
    ///
    /// Returns `MismatchedTrainingData` when the slices differ in length and `EmptyCorpus`
    /// when both are empty.
    pub fn from_predictions<E: AsRef<str>, P: AsRef<str>>(
        expected: &[E],
        predicted: &[P],
    ) -> Result<Self, Error> {
        if expected.len() != predicted.len() {
            return Err(Error::MismatchedTrainingData {
                vectors: predicted.len(),
                labels: expected.len(),
            });
        }
        if expected.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut counts: BTreeMap<&str, Counts> = BTreeMap::new();
        let mut correct = 0;
        for (expected, predicted) in expected.iter().zip(predicted) {
            let (expected, predicted) = (expected.as_ref(), predicted.as_ref());
            if expected == predicted {
                correct += 1;
                counts.entry(expected).or_default().true_positives += 1;
            } else {
                counts.entry(expected).or_default().false_negatives += 1;
                counts.entry(predicted).or_default().false_positives += 1;
            }
        }

        let per_label: Vec<LabelMetrics> = counts
            .into_iter()
            .map(|(label, counts)| {
                let precision = ratio(
                    counts.true_positives,
                    counts.true_positives + counts.false_positives,
                );
                let recall = ratio(
                    counts.true_positives,
                    counts.true_positives + counts.false_negatives,
                );
                let f1_score = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                LabelMetrics {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1_score,
                    support: counts.true_positives + counts.false_negatives,
                }
            })
            .collect();

        let label_count = per_label.len() as f64;
        let macro_average =
            |metric: fn(&LabelMetrics) -> f64| per_label.iter().map(metric).sum::<f64>() / label_count;

        Ok(Self {
            accuracy: correct as f64 / expected.len() as f64,
            macro_precision: macro_average(|metrics| metrics.precision),
            macro_recall: macro_average(|metrics| metrics.recall),
            macro_f1_score: macro_average(|metrics| metrics.f1_score),
            total_support: expected.len(),
            per_label,
        })
    }

    pub fn get(&self, label: &str) -> Option<&LabelMetrics> {
        self.per_label.iter().find(|metrics| metrics.label == label)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for metrics in &self.per_label {
            writeln!(
                f,
                "{:<20} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                metrics.label, metrics.precision, metrics.recall, metrics.f1_score, metrics.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<20} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.total_support
        )?;
        write!(
            f,
            "{:<20} {:>10.2} {:>10.2} {:>10.2} {:>10}",
            "macro avg",
            self.macro_precision,
            self.macro_recall,
            self.macro_f1_score,
            self.total_support
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let expected = ["A", "A", "B", "B"];
        let predicted = ["A", "B", "B", "B"];
        let report = ClassificationReport::from_predictions(&expected, &predicted).unwrap();

        assert_eq!(report.accuracy, 0.75);
        let a = report.get("A").unwrap();
        assert_eq!((a.precision, a.recall, a.support), (1.0, 0.5, 2));
        let b = report.get("B").unwrap();
        assert!((b.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(b.recall, 1.0);
        assert!((b.f1_score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_prediction_only_label_has_zero_support() {
        let report = ClassificationReport::from_predictions(&["A"], &["C"]).unwrap();
        assert_eq!(report.get("C").unwrap().support, 0);
        assert_eq!(report.get("C").unwrap().precision, 0.0);
        assert_eq!(report.accuracy, 0.0);
    }

    #[test]
    fn test_display_lists_every_label() {
        let report = ClassificationReport::from_predictions(&["Sanitation", "General"], &["Sanitation", "General"]).unwrap();
        let table = report.to_string();
        assert!(table.contains("Sanitation"));
        assert!(table.contains("General"));
        assert!(table.contains("macro avg"));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(ClassificationReport::from_predictions(&["A"], &["A", "B"]).is_err());
        let empty: [&str; 0] = [];
        assert!(matches!(
            ClassificationReport::from_predictions(&empty, &empty),
            Err(Error::EmptyCorpus)
        ));
    }
}
