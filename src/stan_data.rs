use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_NEW_TOKENS;
use crate::dataset::DataSet;
use crate::sampler::{Batch, SampleError};

/// Optional architecture knobs. Earlier model stages declare none of these in
/// their data blocks, and a key the model does not declare must not appear in
/// its input, so absent values are omitted from the serialized form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hyperparams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_embed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_head: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_layer: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropout: Option<f64>,
}

/// The input data block handed to the external Stan compiler/optimizer:
/// dimensions, architecture hyperparameters, and the current training and
/// validation batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelData {
    pub vocab_size: i64,
    pub batch_size: usize,
    pub block_size: usize,
    #[serde(flatten)]
    pub hyperparams: Hyperparams,
    pub xb: Batch,
    pub yb: Batch,
    pub xb_val: Batch,
    pub yb_val: Batch,
    pub max_new_tokens: i64,
}

impl ModelData {
    /// Builds the data block for one stage, drawing fresh batches from both
    /// regions of the dataset.
    pub fn new(
        vocab_size: i64,
        batch_size: usize,
        block_size: usize,
        hyperparams: Hyperparams,
        dataset: &DataSet,
        rng: &mut impl Rng,
    ) -> Result<ModelData, SampleError> {
        let (xb, yb) = dataset.sample_training(batch_size, block_size, rng)?;
        let (xb_val, yb_val) = dataset.sample_validation(batch_size, block_size, rng)?;
        Ok(ModelData {
            vocab_size,
            batch_size,
            block_size,
            hyperparams,
            xb,
            yb,
            xb_val,
            yb_val,
            max_new_tokens: MAX_NEW_TOKENS,
        })
    }

    /// Re-draws all four batches in place, as the training loop does before
    /// every optimization step. Dimensions and hyperparameters are untouched.
    pub fn refresh_batches(
        &mut self,
        dataset: &DataSet,
        rng: &mut impl Rng,
    ) -> Result<(), SampleError> {
        let (xb, yb) = dataset.sample_training(self.batch_size, self.block_size, rng)?;
        let (xb_val, yb_val) = dataset.sample_validation(self.batch_size, self.block_size, rng)?;
        self.xb = xb;
        self.yb = yb;
        self.xb_val = xb_val;
        self.yb_val = yb_val;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fixture() -> (DataSet, i64) {
        let text = "a".repeat(900) + &"b".repeat(100);
        let tokenizer = Tokenizer::new(&text);
        let dataset = DataSet::new(&text, &tokenizer).unwrap();
        (dataset, tokenizer.vocab_size())
    }

    #[test]
    fn test_new_draws_batches_from_both_regions() {
        let (dataset, vocab_size) = fixture();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let data = ModelData::new(
            vocab_size,
            4,
            8,
            Hyperparams::default(),
            &dataset,
            &mut rng,
        )
        .unwrap();
        assert_eq!(data.xb.len(), 4);
        assert_eq!(data.xb[0].len(), 8);
        assert!(data.xb.iter().flatten().all(|&t| t == 1));
        assert!(data.xb_val.iter().flatten().all(|&t| t == 2));
        assert_eq!(data.max_new_tokens, MAX_NEW_TOKENS);
    }

    #[test]
    fn test_refresh_keeps_dimensions() {
        let (dataset, vocab_size) = fixture();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut data = ModelData::new(
            vocab_size,
            4,
            8,
            Hyperparams::default(),
            &dataset,
            &mut rng,
        )
        .unwrap();
        data.refresh_batches(&dataset, &mut rng).unwrap();
        assert_eq!(data.xb.len(), 4);
        assert_eq!(data.yb[0].len(), 8);
        assert_eq!(data.vocab_size, vocab_size);
    }

    #[test]
    fn test_absent_hyperparams_are_omitted_from_json() {
        let (dataset, vocab_size) = fixture();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let data = ModelData::new(
            vocab_size,
            4,
            8,
            Hyperparams {
                n_embed: Some(32),
                ..Hyperparams::default()
            },
            &dataset,
            &mut rng,
        )
        .unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["n_embed"], 32);
        assert!(json.get("n_head").is_none());
        assert!(json.get("n_layer").is_none());
        assert!(json.get("dropout").is_none());
        assert_eq!(json["vocab_size"], vocab_size);
    }
}
