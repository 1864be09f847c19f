use crate::types::{DepartmentLabel, Probability};
use crate::Error;
use std::collections::BTreeMap;

/// Probability per department label, ordered by label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilityDistribution {
    // Sorted by label, never empty
    entries: Vec<(DepartmentLabel, Probability)>,
}

impl ClassProbabilityDistribution {
    /// Builds a distribution from `(label, probability)` pairs; a repeated label keeps its
    /// last probability.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDistribution` when no pairs are given and `InvalidProbability` when a
    /// value is not a finite number in `[0, 1]`.
    pub fn new<I, L>(probabilities: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (L, Probability)>,
        L: Into<DepartmentLabel>,
    {
        let by_label: BTreeMap<DepartmentLabel, Probability> = probabilities
            .into_iter()
            .map(|(label, probability)| (label.into(), probability))
            .collect();

        if by_label.is_empty() {
            return Err(Error::EmptyDistribution);
        }

        if let Some((label, &value)) = by_label
            .iter()
            .find(|(_, probability)| !(0.0..=1.0).contains(*probability))
        {
            return Err(Error::InvalidProbability {
                label: label.clone(),
                value,
            });
        }

        Ok(Self {
            entries: by_label.into_iter().collect(),
        })
    }

    /// Caller guarantees `entries` are sorted by label, unique, non-empty, and in range.
    pub(crate) fn from_sorted_entries(entries: Vec<(DepartmentLabel, Probability)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, label: &str) -> Option<Probability> {
        self.entries
            .binary_search_by(|(entry_label, _)| entry_label.as_str().cmp(label))
            .ok()
            .map(|position| self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Probability)> + '_ {
        self.entries
            .iter()
            .map(|(label, probability)| (label.as_str(), *probability))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Probability {
        self.entries.iter().map(|(_, probability)| probability).sum()
    }

    /// The most probable label. Among exactly tied labels the lexicographically first wins.
    pub fn argmax(&self) -> (&str, Probability) {
        let (first_label, first_probability) = &self.entries[0];
        let mut best = (first_label.as_str(), *first_probability);

        // Entries are label-ordered, so strict `>` keeps the earliest of any tie
        for (label, probability) in &self.entries[1..] {
            if *probability > best.1 {
                best = (label.as_str(), *probability);
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_label_ordered() {
        let distribution =
            ClassProbabilityDistribution::new([("Sanitation", 0.2), ("Healthcare", 0.8)]).unwrap();
        assert_eq!(
            distribution.labels().collect::<Vec<_>>(),
            vec!["Healthcare", "Sanitation"]
        );
        assert_eq!(distribution.get("Healthcare"), Some(0.8));
        assert_eq!(distribution.get("General"), None);
    }

    #[test]
    fn test_argmax_breaks_ties_lexicographically() {
        let distribution =
            ClassProbabilityDistribution::new([("B", 0.4), ("A", 0.4), ("C", 0.2)]).unwrap();
        assert_eq!(distribution.argmax(), ("A", 0.4));
    }

    #[test]
    fn test_argmax_prefers_higher_probability() {
        let distribution =
            ClassProbabilityDistribution::new([("A", 0.1), ("B", 0.6), ("C", 0.3)]).unwrap();
        assert_eq!(distribution.argmax(), ("B", 0.6));
    }

    #[test]
    fn test_rejects_empty_and_out_of_range() {
        let empty: [(&str, f64); 0] = [];
        assert!(matches!(
            ClassProbabilityDistribution::new(empty),
            Err(Error::EmptyDistribution)
        ));
        assert!(matches!(
            ClassProbabilityDistribution::new([("A", 1.2)]),
            Err(Error::InvalidProbability { .. })
        ));
        assert!(matches!(
            ClassProbabilityDistribution::new([("A", f64::NAN)]),
            Err(Error::InvalidProbability { .. })
        ));
    }
}
