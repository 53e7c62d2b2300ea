use rand::Rng;

use crate::constants::{BATCH_SIZE, BLOCK_SIZE, DROPOUT, N_EMBED, N_HEAD, N_LAYER};
use crate::dataset::DataSet;
use crate::sampler::SampleError;
use crate::stan_data::{Hyperparams, ModelData};

/// One stage of the model progression: the Stan file implementing it and the
/// dimensions and hyperparameters its data block declares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSpec {
    pub name: &'static str,
    pub batch_size: usize,
    pub block_size: usize,
    pub hyperparams: Hyperparams,
}

impl StageSpec {
    /// File name of the Stan model implementing this stage.
    pub fn stan_file(&self) -> String {
        format!("{}.stan", self.name)
    }

    /// Builds this stage's input data block from the dataset.
    pub fn model_data(
        &self,
        vocab_size: i64,
        dataset: &DataSet,
        rng: &mut impl Rng,
    ) -> Result<ModelData, SampleError> {
        ModelData::new(
            vocab_size,
            self.batch_size,
            self.block_size,
            self.hyperparams,
            dataset,
            rng,
        )
    }
}

const NO_PARAMS: Hyperparams = Hyperparams {
    n_embed: None,
    n_head: None,
    n_layer: None,
    dropout: None,
};

const WITH_EMBEDDING: Hyperparams = Hyperparams {
    n_embed: Some(N_EMBED),
    n_head: None,
    n_layer: None,
    dropout: None,
};

const WITH_HEADS: Hyperparams = Hyperparams {
    n_embed: Some(N_EMBED),
    n_head: Some(N_HEAD),
    n_layer: None,
    dropout: None,
};

const WITH_BLOCKS: Hyperparams = Hyperparams {
    n_embed: Some(N_EMBED),
    n_head: Some(N_HEAD),
    n_layer: Some(N_LAYER),
    dropout: None,
};

const WITH_DROPOUT: Hyperparams = Hyperparams {
    n_embed: Some(N_EMBED),
    n_head: Some(N_HEAD),
    n_layer: Some(N_LAYER),
    dropout: Some(DROPOUT),
};

const fn stage(name: &'static str, hyperparams: Hyperparams) -> StageSpec {
    StageSpec {
        name,
        batch_size: BATCH_SIZE,
        block_size: BLOCK_SIZE,
        hyperparams,
    }
}

/// The model progression, one architectural feature per stage. Each stage's
/// data block declares exactly the knobs its Stan model has grown so far.
pub const STAGES: &[StageSpec] = &[
    stage("01-bigram", NO_PARAMS),
    stage("02-different-embedding-size", WITH_EMBEDDING),
    stage("03-positional-encoding", WITH_EMBEDDING),
    stage("04-self-attention", WITH_EMBEDDING),
    stage("05-multi-headed-self-attention", WITH_HEADS),
    stage("06-feed-forward", WITH_HEADS),
    stage("07-skip-connections", WITH_HEADS),
    stage("08-larger-feed-forward-layer", WITH_HEADS),
    stage("09-layer-norm", WITH_HEADS),
    stage("10-blocks", WITH_BLOCKS),
    stage("11-dropout", WITH_DROPOUT),
    stage("12-final", WITH_DROPOUT),
];

/// The scaled-up configuration of the final model, used for the long run:
/// longer context, wider embedding, more heads and layers.
pub const SCALED_UP_FINAL: StageSpec = StageSpec {
    name: "12-final",
    batch_size: 16,
    block_size: 64,
    hyperparams: Hyperparams {
        n_embed: Some(128),
        n_head: Some(4),
        n_layer: Some(4),
        dropout: Some(DROPOUT),
    },
};
