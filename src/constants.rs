/// The fraction of the encoded corpus used for training; the rest is held out for validation.
pub const TRAIN_VALIDATION_SPLIT: f64 = 0.9;
/// How many independent sequences are processed in parallel; B.
pub const BATCH_SIZE: usize = 32;
/// The maximum context length for predictions; T.
pub const BLOCK_SIZE: usize = 8;
/// The number of dimensions in the embedding space.
pub const N_EMBED: i64 = 32;
/// The number of attention heads; head size is `N_EMBED / N_HEAD`.
pub const N_HEAD: i64 = 2;
/// The number of transformer blocks.
pub const N_LAYER: i64 = 2;
/// The proportion of activations to drop out during training.
pub const DROPOUT: f64 = 0.2;
/// How many tokens each fit generates for inspection.
pub const MAX_NEW_TOKENS: i64 = 500;
