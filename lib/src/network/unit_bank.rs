use serde::Serialize;

use super::numeric::{activation, dot};
use crate::data::Dimensions;

/// Weights and biases of every output unit.
///
/// Row `n` of the weight matrix and entry `n` of the bias vector belong to
/// unit `n`. Both start at zero and only change through [`UnitBank::adjust`].
///
/// Biases are integers while weights are reals. Corrections are always ±1,
/// so the bias moves in whole steps and stays compatible with parameters
/// trained by the original tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitBank {
  dims: Dimensions,
  weights: Vec<Vec<f64>>,
  biases: Vec<i32>,
}

impl UnitBank {
  pub fn new(dims: Dimensions) -> Self {
    Self {
      dims,
      weights: vec![vec![0.0; dims.inputs]; dims.outputs],
      biases: vec![0; dims.outputs],
    }
  }

  pub fn dimensions(&self) -> Dimensions {
    self.dims
  }

  pub fn weights(&self) -> &[Vec<f64>] {
    &self.weights
  }

  pub fn unit_weights(&self, unit: usize) -> &[f64] {
    &self.weights[unit]
  }

  pub fn biases(&self) -> &[i32] {
    &self.biases
  }

  /// Output of a single unit for `input`.
  ///
  /// # Panics
  ///
  /// If `input` does not hold exactly one value per network input.
  pub fn unit_output(&self, unit: usize, input: &[f64]) -> u8 {
    self.check_input(input);
    activation(dot(&self.weights[unit], input), self.biases[unit])
  }

  /// Output of every unit for `input`, in unit order.
  ///
  /// # Panics
  ///
  /// If `input` does not hold exactly one value per network input.
  pub fn classify(&self, input: &[f64]) -> Vec<u8> {
    (0..self.dims.outputs)
      .map(|unit| self.unit_output(unit, input))
      .collect()
  }

  /// Perceptron correction of one unit: the bias moves by `error` and every
  /// weight by `error` times its input.
  ///
  /// # Panics
  ///
  /// If `input` does not hold exactly one value per network input.
  pub fn adjust(&mut self, unit: usize, error: i32, input: &[f64]) {
    self.check_input(input);
    debug_assert!((-1..=1).contains(&error), "error out of range: {error}");
    if error == 0 {
      return;
    }
    self.biases[unit] += error;
    let step = f64::from(error);
    for (w, x) in self.weights[unit].iter_mut().zip(input) {
      *w += step * x;
    }
  }

  fn check_input(&self, input: &[f64]) {
    assert_eq!(
      input.len(),
      self.dims.inputs,
      "input vector has {} values, network expects {}",
      input.len(),
      self.dims.inputs
    );
  }
}
