use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};

use crate::stan_data::ModelData;

/// Writes a model's input data block to disk as Stan-consumable JSON, so a
/// later run can re-generate quantities against a cached fit without
/// re-sampling.
pub fn write_stan_json(path: &Path, data: &ModelData) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), data)
        .with_context(|| format!("writing model data to {}", path.display()))?;
    Ok(())
}

/// Reads a previously cached data block back. The tokenizer mapping is not
/// cached alongside it; rebuilding from the corpus gives the same codes.
pub fn read_stan_json(path: &Path) -> Result<ModelData> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let data = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing model data from {}", path.display()))?;
    Ok(data)
}
