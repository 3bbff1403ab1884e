use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::{
  data::TestSet,
  network::{TrainOutcome, UnitBank},
};

/// A test vector and the network's answer for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
  pub input: Vec<f64>,
  pub output: Vec<u8>,
}

/// Everything a run hands back: final parameters, how training ended, and
/// the classification of every test vector in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
  pub weights: Vec<Vec<f64>>,
  pub biases: Vec<i32>,
  pub training: TrainOutcome,
  pub classifications: Vec<Classification>,
}

impl Report {
  pub fn new(bank: &UnitBank, training: TrainOutcome, test_set: &TestSet) -> Self {
    let classifications = test_set
      .vectors()
      .iter()
      .map(|input| Classification {
        input: input.clone(),
        output: bank.classify(input),
      })
      .collect();
    Self {
      weights: bank.weights().to_vec(),
      biases: bank.biases().to_vec(),
      training,
      classifications,
    }
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}

fn real(x: f64) -> String {
  format!("{x:?}")
}

fn column(values: impl Iterator<Item = String>) -> String {
  format!("[ {} ]", values.format(" "))
}

/// Plain text layout: weight rows, biases, then one line per test vector.
impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Weights:")?;
    for row in &self.weights {
      for &w in row {
        write!(f, "{}\t", real(w))?;
      }
      writeln!(f)?;
    }
    writeln!(f, "Biases:")?;
    for b in &self.biases {
      writeln!(f, "{b}\t")?;
    }
    for (i, c) in self.classifications.iter().enumerate() {
      writeln!(
        f,
        "Input Vector {}: {}^T -- Output: {}^T",
        i + 1,
        column(c.input.iter().map(|&x| real(x))),
        column(c.output.iter().map(|&y| real(f64::from(y)))),
      )?;
    }
    Ok(())
  }
}
