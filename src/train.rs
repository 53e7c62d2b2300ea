use anyhow::Result;
use rand::Rng;

use crate::dataset::DataSet;
use crate::stan_data::ModelData;

/// The result of one optimization pass over the current data block, as read
/// back from the fit's output variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    pub loss: f64,
    pub loss_validation: f64,
    /// Generated token ids; decode them with the tokenizer for display.
    pub new_tokens: Vec<i64>,
}

/// Seam to the external probabilistic-programming optimizer.
///
/// An implementation compiles the stage's model file and runs one
/// quasi-Newton iteration over `data`, warm-starting from the parameters of
/// `previous` when given. Fitting the model itself happens entirely on the
/// other side of this trait.
pub trait StanOptimizer {
    fn optimize(
        &mut self,
        data: &ModelData,
        previous: Option<&Fit>,
        show_console: bool,
    ) -> Result<Fit>;
}

/// Stochastic quasi-Newton training driver.
///
/// Every step re-draws all four batches of the data block and re-optimizes
/// warm-started from the previous fit, so the optimizer sees a fresh random
/// window of the corpus each iteration. One driver serves every stage of the
/// model progression; only the data block differs.
pub struct Trainer<O, R> {
    optimizer: O,
    dataset: DataSet,
    data: ModelData,
    rng: R,
    log_every: usize,
}

impl<O: StanOptimizer, R: Rng> Trainer<O, R> {
    pub fn new(optimizer: O, dataset: DataSet, data: ModelData, rng: R) -> Trainer<O, R> {
        Trainer {
            optimizer,
            dataset,
            data,
            rng,
            log_every: 100,
        }
    }

    /// Runs the initial optimization plus `steps` stochastic steps, and
    /// returns the final fit.
    pub fn run(&mut self, steps: usize) -> Result<Fit> {
        let mut fit = self.optimizer.optimize(&self.data, None, true)?;
        for step in 0..steps {
            self.data.refresh_batches(&self.dataset, &mut self.rng)?;
            let show_console = step % self.log_every == 0;
            if show_console {
                println!(
                    "step: {}, loss: {}, loss_validation: {}",
                    step, fit.loss, fit.loss_validation
                );
            }
            fit = self.optimizer.optimize(&self.data, Some(&fit), show_console)?;
        }
        Ok(fit)
    }

    /// The data block in its current state, batches included.
    pub fn data(&self) -> &ModelData {
        &self.data
    }
}
