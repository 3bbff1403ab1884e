use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
  data::{read_test_set, read_training_set, Dimensions},
  error::LoadError,
  network::{TrainParams, Trainer, UnitBank},
  report::Report,
};

/// A single batch run: load both files, train, classify the test vectors.
#[derive(Debug)]
pub struct Session {
  dims: Dimensions,
  training_path: PathBuf,
  test_path: PathBuf,
  params: TrainParams,
}

impl Session {
  pub fn new(dims: Dimensions, training_path: &Path, test_path: &Path, params: TrainParams) -> Self {
    Self {
      dims,
      training_path: PathBuf::from(training_path),
      test_path: PathBuf::from(test_path),
      params,
    }
  }

  /// Both files are loaded before training starts, so a bad test file
  /// fails the run without wasting a training pass.
  #[instrument(level = "info", skip(self), fields(inputs = self.dims.inputs, outputs = self.dims.outputs))]
  pub fn run(self) -> Result<Report, LoadError> {
    let training = read_training_set(&self.training_path, self.dims)?;
    let test = read_test_set(&self.test_path, self.dims)?;
    info!(
      examples = training.len(),
      tests = test.len(),
      max_sweeps = ?self.params.max_sweeps,
      "starting training"
    );

    let mut bank = UnitBank::new(self.dims);
    let outcome = Trainer::with_params(self.params).train(&training, &mut bank);
    Ok(Report::new(&bank, outcome, &test))
  }
}
