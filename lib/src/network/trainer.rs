use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::UnitBank;
use crate::data::TrainingSet;

/// Training configuration. Without a sweep cap training runs until a sweep
/// makes no corrections, which never happens on non-separable data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainParams {
  pub max_sweeps: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
  Sweeping,
  /// Terminal: the last sweep made no corrections.
  Converged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrainOutcome {
  Converged { sweeps: usize, corrections: usize },
  SweepLimitReached { sweeps: usize, corrections: usize },
}

impl TrainOutcome {
  pub fn is_converged(&self) -> bool {
    matches!(self, Self::Converged { .. })
  }

  /// Sweeps run, the final correction-free one included.
  pub fn sweeps(&self) -> usize {
    match *self {
      Self::Converged { sweeps, .. } | Self::SweepLimitReached { sweeps, .. } => sweeps,
    }
  }

  pub fn corrections(&self) -> usize {
    match *self {
      Self::Converged { corrections, .. } | Self::SweepLimitReached { corrections, .. } => {
        corrections
      }
    }
  }
}

/// One pass over the training set in load order, correcting each unit as
/// soon as it misclassifies an example. Returns the number of corrections.
///
/// Examples form the outer loop and units the inner one. Corrections apply
/// immediately, so later examples in the same sweep see the updated state.
///
/// # Panics
///
/// If the training set and the bank disagree on dimensions.
pub fn sweep(training_set: &TrainingSet, bank: &mut UnitBank) -> usize {
  assert_eq!(
    training_set.dims(),
    bank.dimensions(),
    "training set and unit bank dimensions differ"
  );
  let mut corrections = 0;
  for example in training_set.examples() {
    for (unit, &expected) in example.labels.iter().enumerate() {
      let actual = bank.unit_output(unit, &example.features);
      let error = i32::from(expected) - i32::from(actual);
      if error != 0 {
        bank.adjust(unit, error, &example.features);
        corrections += 1;
      }
    }
  }
  corrections
}

/// Runs one sweep and reports whether it changed anything.
pub fn run_sweep(training_set: &TrainingSet, bank: &mut UnitBank) -> bool {
  sweep(training_set, bank) > 0
}

/// Drives a [`UnitBank`] to zero training error with the perceptron rule.
#[derive(Debug, Clone)]
pub struct Trainer {
  params: TrainParams,
  state: TrainerState,
  sweeps: usize,
  corrections: usize,
}

impl Default for Trainer {
  fn default() -> Self {
    Self::with_params(TrainParams::default())
  }
}

impl Trainer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_params(params: TrainParams) -> Self {
    Self {
      params,
      state: TrainerState::Sweeping,
      sweeps: 0,
      corrections: 0,
    }
  }

  pub fn with_max_sweeps(max_sweeps: usize) -> Self {
    Self::with_params(TrainParams {
      max_sweeps: Some(max_sweeps),
    })
  }

  pub fn state(&self) -> TrainerState {
    self.state
  }

  pub fn params(&self) -> TrainParams {
    self.params
  }

  /// Sweeps until one makes no corrections, or until the sweep cap is hit.
  ///
  /// The cap is only checked between sweeps. Once converged, further calls
  /// return the same outcome without touching the bank.
  #[instrument(level = "debug", skip_all, fields(examples = training_set.len()))]
  pub fn train(&mut self, training_set: &TrainingSet, bank: &mut UnitBank) -> TrainOutcome {
    let start = std::time::Instant::now();

    while self.state == TrainerState::Sweeping {
      if self.params.max_sweeps.is_some_and(|max| self.sweeps >= max) {
        warn!(
          sweeps = self.sweeps,
          corrections = self.corrections,
          "sweep limit reached before convergence"
        );
        return self.outcome();
      }

      let corrections = sweep(training_set, bank);
      self.sweeps += 1;
      self.corrections += corrections;
      debug!(sweep = self.sweeps, corrections, "sweep finished");

      if corrections == 0 {
        self.state = TrainerState::Converged;
      }
    }

    info!(
      sweeps = self.sweeps,
      corrections = self.corrections,
      "converged in {:.2}ms",
      start.elapsed().as_secs_f64() * 1e3
    );
    self.outcome()
  }

  fn outcome(&self) -> TrainOutcome {
    match self.state {
      TrainerState::Converged => TrainOutcome::Converged {
        sweeps: self.sweeps,
        corrections: self.corrections,
      },
      TrainerState::Sweeping => TrainOutcome::SweepLimitReached {
        sweeps: self.sweeps,
        corrections: self.corrections,
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::Dimensions;
  use proptest::prelude::*;

  fn set(inputs: usize, outputs: usize, rows: &[Vec<f64>]) -> TrainingSet {
    TrainingSet::from_rows(Dimensions::new(inputs, outputs).unwrap(), rows).unwrap()
  }

  fn and_set() -> TrainingSet {
    set(
      2,
      1,
      &[
        vec![0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![1.0, 1.0, 1.0],
      ],
    )
  }

  fn xor_set() -> TrainingSet {
    set(
      2,
      1,
      &[
        vec![0.0, 0.0, 0.0],
        vec![0.0, 1.0, 1.0],
        vec![1.0, 0.0, 1.0],
        vec![1.0, 1.0, 0.0],
      ],
    )
  }

  #[test]
  fn learns_and() {
    let _guard = crate::utils::init_logging_tests();
    let training = and_set();
    let mut bank = UnitBank::new(training.dims());
    let mut trainer = Trainer::new();

    let outcome = trainer.train(&training, &mut bank);

    assert_eq!(
      outcome,
      TrainOutcome::Converged {
        sweeps: 6,
        corrections: 11
      }
    );
    assert_eq!(trainer.state(), TrainerState::Converged);
    assert_eq!(bank.weights(), &[vec![2.0, 1.0]]);
    assert_eq!(bank.biases(), &[-3]);
    assert_eq!(bank.classify(&[1.0, 1.0]), vec![1]);
    assert_eq!(bank.classify(&[0.0, 0.0]), vec![0]);
    assert_eq!(bank.classify(&[0.0, 1.0]), vec![0]);
    assert_eq!(bank.classify(&[1.0, 0.0]), vec![0]);
    assert!(!run_sweep(&training, &mut bank));
  }

  #[test]
  fn first_sweep_on_and() {
    let training = and_set();
    let mut bank = UnitBank::new(training.dims());
    assert_eq!(sweep(&training, &mut bank), 2);
    assert_eq!(bank.weights(), &[vec![1.0, 1.0]]);
    assert_eq!(bank.biases(), &[0]);
  }

  #[test]
  fn xor_never_converges() {
    let _guard = crate::utils::init_logging_tests();
    let training = xor_set();
    let mut bank = UnitBank::new(training.dims());
    let mut trainer = Trainer::with_max_sweeps(500);

    let outcome = trainer.train(&training, &mut bank);

    assert!(!outcome.is_converged());
    assert_eq!(outcome.sweeps(), 500);
    assert!(outcome.corrections() >= 500);
    assert_eq!(trainer.state(), TrainerState::Sweeping);
    for _ in 0..100 {
      assert!(run_sweep(&training, &mut bank));
    }
  }

  #[test]
  fn zero_cap_runs_nothing() {
    let training = and_set();
    let mut bank = UnitBank::new(training.dims());
    let outcome = Trainer::with_max_sweeps(0).train(&training, &mut bank);
    assert_eq!(
      outcome,
      TrainOutcome::SweepLimitReached {
        sweeps: 0,
        corrections: 0
      }
    );
    assert_eq!(bank, UnitBank::new(training.dims()));
  }

  #[test]
  fn converged_trainer_is_terminal() {
    let training = and_set();
    let mut bank = UnitBank::new(training.dims());
    let mut trainer = Trainer::with_max_sweeps(100);
    let first = trainer.train(&training, &mut bank);
    let snapshot = bank.clone();
    let second = trainer.train(&training, &mut bank);
    assert_eq!(first, second);
    assert_eq!(bank, snapshot);
  }

  #[test]
  fn empty_set_converges_in_one_sweep() {
    let training = set(3, 2, &[]);
    let mut bank = UnitBank::new(training.dims());
    let outcome = Trainer::new().train(&training, &mut bank);
    assert_eq!(
      outcome,
      TrainOutcome::Converged {
        sweeps: 1,
        corrections: 0
      }
    );
  }

  #[test]
  fn units_train_independently() {
    // outputs: AND, OR
    let training = set(
      2,
      2,
      &[
        vec![0.0, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 1.0],
        vec![1.0, 0.0, 0.0, 1.0],
        vec![1.0, 1.0, 1.0, 1.0],
      ],
    );
    let mut bank = UnitBank::new(training.dims());
    assert!(Trainer::new().train(&training, &mut bank).is_converged());
    assert_eq!(bank.weights(), &[vec![2.0, 1.0], vec![1.0, 1.0]]);
    assert_eq!(bank.biases(), &[-3, -1]);
    for example in training.examples() {
      assert_eq!(bank.classify(&example.features), example.labels);
    }
  }

  #[test]
  #[should_panic(expected = "dimensions differ")]
  fn mismatched_bank_fails_fast() {
    let training = and_set();
    let mut bank = UnitBank::new(Dimensions::new(3, 1).unwrap());
    Trainer::new().train(&training, &mut bank);
  }

  /// Points on an integer grid labelled by integer hyperplanes, one per unit.
  fn separable() -> impl Strategy<Value = TrainingSet> {
    let planes = prop::collection::vec((prop::collection::vec(-3..=3i32, 3), -3..=3i32), 2);
    let points = prop::collection::vec(prop::collection::vec(-3..=3i32, 3), 0..12);
    (planes, points).prop_map(|(planes, points)| {
      let rows: Vec<Vec<f64>> = points
        .iter()
        .map(|x| {
          let labels = planes.iter().map(|(w, b)| {
            let s: i32 = w.iter().zip(x).map(|(w, x)| w * x).sum::<i32>() + b;
            if s >= 0 {
              1.0
            } else {
              0.0
            }
          });
          x.iter().map(|&v| f64::from(v)).chain(labels).collect()
        })
        .collect();
      set(3, 2, &rows)
    })
  }

  proptest! {
    #[test]
    fn separable_sets_converge(training in separable()) {
      let mut bank = UnitBank::new(training.dims());
      let outcome = Trainer::with_max_sweeps(20_000).train(&training, &mut bank);
      prop_assert!(outcome.is_converged());
      prop_assert!(!run_sweep(&training, &mut bank));
      for example in training.examples() {
        prop_assert_eq!(bank.classify(&example.features), example.labels.clone());
      }
    }

    #[test]
    fn training_is_reproducible(training in separable()) {
      let mut a = UnitBank::new(training.dims());
      let mut b = UnitBank::new(training.dims());
      let first = Trainer::with_max_sweeps(20_000).train(&training, &mut a);
      let second = Trainer::with_max_sweeps(20_000).train(&training, &mut b);
      prop_assert_eq!(first, second);
      prop_assert_eq!(a, b);
    }
  }
}
