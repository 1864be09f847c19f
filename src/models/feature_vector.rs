use crate::types::FeatureIndex;
use crate::Error;

/// A sparse vector with a fixed dimensionality. Entries are kept sorted by index and only
/// non-zero positions are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(FeatureIndex, f64)>,
}

impl FeatureVector {
    /// The zero vector; this is what text with no known n-grams turns into.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Builds a vector from `(index, value)` pairs in any order. Zero values are dropped and
    /// repeated indices are summed.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if an index is outside `0..dimension`.
    pub fn from_entries(
        dimension: usize,
        mut entries: Vec<(FeatureIndex, f64)>,
    ) -> Result<Self, Error> {
        if let Some(&(index, _)) = entries.iter().find(|(index, _)| *index >= dimension) {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                actual: index + 1,
            });
        }

        entries.sort_by_key(|(index, _)| *index);

        let mut merged: Vec<(FeatureIndex, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some((last_index, last_value)) if *last_index == index => *last_value += value,
                _ => merged.push((index, value)),
            }
        }
        merged.retain(|(_, value)| *value != 0.0);

        Ok(Self::from_sorted_entries(dimension, merged))
    }

    /// Caller guarantees `entries` are sorted, unique, and within `dimension`.
    pub(crate) fn from_sorted_entries(dimension: usize, entries: Vec<(FeatureIndex, f64)>) -> Self {
        Self { dimension, entries }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureIndex, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn get(&self, index: FeatureIndex) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map_or(0.0, |position| self.entries[position].1)
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for &(index, value) in &self.entries {
            dense[index] = value;
        }
        dense
    }

    /// Dot product against a dense weight vector; positions beyond `weights` count as zero.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(index, value)| weights.get(index).map(|weight| weight * value))
            .sum()
    }

    /// `weights += scale * self`
    pub fn add_scaled_to(&self, weights: &mut [f64], scale: f64) {
        for &(index, value) in &self.entries {
            if let Some(weight) = weights.get_mut(index) {
                *weight += scale * value;
            }
        }
    }

    pub fn squared_norm(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value * value).sum()
    }

    /// Scales the vector to unit Euclidean length; the zero vector is left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.squared_norm().sqrt();
        if norm > 0.0 {
            for (_, value) in self.entries.iter_mut() {
                *value /= norm;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_and_merges() {
        let vector = FeatureVector::from_entries(5, vec![(3, 1.0), (1, 2.0), (3, 0.5)]).unwrap();
        assert_eq!(vector.iter().collect::<Vec<_>>(), vec![(1, 2.0), (3, 1.5)]);
        assert_eq!(vector.get(3), 1.5);
        assert_eq!(vector.get(0), 0.0);
    }

    #[test]
    fn test_from_entries_rejects_out_of_range() {
        let result = FeatureVector::from_entries(2, vec![(2, 1.0)]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_dot_and_scaled_add() {
        let vector = FeatureVector::from_entries(3, vec![(0, 1.0), (2, 2.0)]).unwrap();
        let mut weights = vec![1.0, 1.0, 1.0];
        assert_eq!(vector.dot(&weights), 3.0);

        vector.add_scaled_to(&mut weights, 0.5);
        assert_eq!(weights, vec![1.5, 1.0, 2.0]);
    }

    #[test]
    fn test_l2_normalize() {
        let mut vector = FeatureVector::from_entries(2, vec![(0, 3.0), (1, 4.0)]).unwrap();
        vector.l2_normalize();
        assert!((vector.squared_norm() - 1.0).abs() < 1e-12);
        assert_eq!(vector.to_dense(), vec![0.6, 0.8]);
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let mut vector = FeatureVector::zeros(4);
        vector.l2_normalize();
        assert!(vector.is_zero());
        assert_eq!(vector.to_dense(), vec![0.0; 4]);
    }
}
