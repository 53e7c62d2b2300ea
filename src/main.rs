use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cache;
mod constants;
mod dataset;
mod sampler;
mod stage;
mod stan_data;
mod tokenizer;
mod train;

use crate::dataset::DataSet;
use crate::sampler::Batch;
use crate::tokenizer::Tokenizer;

fn main() -> Result<()> {
    let corpus_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/tinyshakespeare/input.txt"));
    let text = fs::read_to_string(&corpus_path)
        .with_context(|| format!("reading corpus from {}", corpus_path.display()))?;

    let tokenizer = Tokenizer::new(&text);
    print_corpus_info(&text, &tokenizer);
    print_encode_decode_info(&tokenizer, &text)?;

    let dataset = DataSet::new(&text, &tokenizer)?;
    let mut rng = StdRng::from_entropy();

    let (xb, yb) = dataset.sample_training(10, 8, &mut rng)?;
    let (xb_val, yb_val) = dataset.sample_validation(10, 8, &mut rng)?;
    print_batch_info(&tokenizer, &xb, &yb, &xb_val, &yb_val)?;

    // Write every stage's data block out for the Stan side to pick up.
    let cache_dir = PathBuf::from("cache");
    fs::create_dir_all(&cache_dir)
        .with_context(|| format!("creating {}", cache_dir.display()))?;
    for stage in stage::STAGES {
        let data = stage.model_data(tokenizer.vocab_size(), &dataset, &mut rng)?;
        let path = cache_dir.join(format!("{}_data.json", stage.name));
        cache::write_stan_json(&path, &data)?;
        println!("wrote {} (model: {})", path.display(), stage.stan_file());
    }
    Ok(())
}

fn print_corpus_info(text: &str, tokenizer: &Tokenizer) {
    println!("************************************************************");
    println!("Some information about the corpus");
    println!("* length of dataset in characters: {}", text.chars().count());
    println!("* number of unique characters: {}", tokenizer.vocab_size());
    println!(
        "* characters: {}",
        tokenizer.alphabet().iter().collect::<String>()
    );
    println!("* initial 1000 characters of dataset");
    println!("------------------------------------------------------------");
    println!("{}", text.chars().take(1000).collect::<String>());
    println!("------------------------------------------------------------");
    println!();
}

fn print_encode_decode_info(tokenizer: &Tokenizer, text: &str) -> Result<()> {
    let sample: String = text.chars().take(10).collect();
    let codes = tokenizer.encode(&sample)?;
    println!("************************************************************");
    println!("Some information using encode and decode");
    println!("initial 10 characters:  {:?}", sample);
    println!("encoded:                {:?}", codes);
    println!("decoded back:           {:?}", tokenizer.decode(&codes)?);
    println!();
    Ok(())
}

fn print_batch_info(
    tokenizer: &Tokenizer,
    xb: &Batch,
    yb: &Batch,
    xb_val: &Batch,
    yb_val: &Batch,
) -> Result<()> {
    println!("************************************************************");
    println!("Some information about the training and validation batches");
    println!("input xb:      {} x {}", xb.len(), xb[0].len());
    println!("target yb:     {} x {}", yb.len(), yb[0].len());
    println!("decode(xb[0]): {:?}", tokenizer.decode(&xb[0])?);
    println!("decode(yb[0]): {:?}", tokenizer.decode(&yb[0])?);
    println!("input xb_val:  {} x {}", xb_val.len(), xb_val[0].len());
    println!("target yb_val: {} x {}", yb_val.len(), yb_val[0].len());
    println!("decode(xb_val[0]): {:?}", tokenizer.decode(&xb_val[0])?);
    println!("decode(yb_val[0]): {:?}", tokenizer.decode(&yb_val[0])?);
    println!();
    Ok(())
}
