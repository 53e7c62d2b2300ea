use rand::seq::index;
use rand::Rng;
use thiserror::Error;

/// A batch: `batch_size` rows of `block_size` token codes each.
pub type Batch = Vec<Vec<i64>>;

#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("region of {len} tokens is too short for block_size {block_size}")]
    InsufficientData { len: usize, block_size: usize },
    #[error("batch_size {batch_size} exceeds the {population} distinct start offsets available")]
    SampleSizeExceedsPopulation {
        batch_size: usize,
        population: usize,
    },
}

/// Draws `batch_size` aligned (input, target) windows of `block_size` tokens
/// from `data`, at distinct start offsets chosen uniformly at random from
/// `[0, data.len() - block_size)`.
///
/// Each target row is its input row shifted one position to the right:
/// `targets[k][j] == inputs[k][j + 1]` for `j < block_size - 1`, and the last
/// target element is the token immediately following the input window. Both
/// windows stay in bounds by construction.
///
/// The RNG is an explicit parameter so callers can seed it for reproducible
/// draws; successive calls are independent and may repeat offsets across
/// calls.
pub fn sample_batch(
    data: &[i64],
    batch_size: usize,
    block_size: usize,
    rng: &mut impl Rng,
) -> Result<(Batch, Batch), SampleError> {
    if data.len() <= block_size {
        return Err(SampleError::InsufficientData {
            len: data.len(),
            block_size,
        });
    }
    let population = data.len() - block_size;
    if batch_size > population {
        return Err(SampleError::SampleSizeExceedsPopulation {
            batch_size,
            population,
        });
    }
    // Offsets are distinct within a single call.
    let offsets = index::sample(rng, population, batch_size);
    let inputs = offsets
        .iter()
        .map(|i| data[i..i + block_size].to_vec())
        .collect();
    let targets = offsets
        .iter()
        .map(|i| data[i + 1..i + block_size + 1].to_vec())
        .collect();
    Ok((inputs, targets))
}
