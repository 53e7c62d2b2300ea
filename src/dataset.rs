use rand::Rng;

use crate::constants::TRAIN_VALIDATION_SPLIT;
use crate::sampler::{self, Batch, SampleError};
use crate::tokenizer::{Tokenizer, TokenizerError};

/// The encoded corpus, split positionally into training and validation
/// regions: the first 90% of positions train, the remainder validates.
///
/// The split is positional, not random, so rebuilding from the same corpus
/// yields the same regions on every run. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct DataSet {
    data: Vec<i64>,
    split: usize,
}

impl DataSet {
    pub fn new(text: &str, tokenizer: &Tokenizer) -> Result<DataSet, TokenizerError> {
        let data = tokenizer.encode(text)?;
        let split = (TRAIN_VALIDATION_SPLIT * data.len() as f64) as usize;
        Ok(DataSet { data, split })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get_training_data(&self) -> &[i64] {
        &self.data[..self.split]
    }

    pub fn get_validation_data(&self) -> &[i64] {
        &self.data[self.split..]
    }

    /// Draws one (input, target) batch pair from the training region.
    pub fn sample_training(
        &self,
        batch_size: usize,
        block_size: usize,
        rng: &mut impl Rng,
    ) -> Result<(Batch, Batch), SampleError> {
        sampler::sample_batch(self.get_training_data(), batch_size, block_size, rng)
    }

    /// Draws one (input, target) batch pair from the validation region.
    pub fn sample_validation(
        &self,
        batch_size: usize,
        block_size: usize,
        rng: &mut impl Rng,
    ) -> Result<(Batch, Batch), SampleError> {
        sampler::sample_batch(self.get_validation_data(), batch_size, block_size, rng)
    }
}
