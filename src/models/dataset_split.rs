use crate::models::TrainingRecord;
use crate::Error;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A reproducible train/test partition of a corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit<'a> {
    pub train: Vec<&'a TrainingRecord>,
    pub test: Vec<&'a TrainingRecord>,
}

impl<'a> DatasetSplit<'a> {
    /// Shuffles with `seed` and holds out `ceil(len * test_ratio)` records, always leaving at
    /// least one record for training. A ratio of 0 puts everything in `train`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCorpus` for no records and `InvalidConfig` for a ratio outside `[0, 1)`.
    pub fn new(records: &'a [TrainingRecord], test_ratio: f64, seed: u64) -> Result<Self, Error> {
        if records.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        if !(0.0..1.0).contains(&test_ratio) {
            return Err(Error::InvalidConfig(format!(
                "test_ratio must be in [0, 1) but was {}",
                test_ratio
            )));
        }

        let mut shuffled: Vec<&TrainingRecord> = records.iter().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        shuffled.shuffle(&mut rng);

        let test_size = ((records.len() as f64 * test_ratio).ceil() as usize).min(records.len() - 1);
        let train = shuffled.split_off(test_size);

        Ok(Self {
            train,
            test: shuffled,
        })
    }
}
