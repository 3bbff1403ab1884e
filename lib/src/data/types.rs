use serde::Serialize;

use crate::error::ShapeError;

/// Fixed input and output counts for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
  pub inputs: usize,
  pub outputs: usize,
}

impl Dimensions {
  pub fn new(inputs: usize, outputs: usize) -> Result<Self, ShapeError> {
    if inputs == 0 || outputs == 0 {
      return Err(ShapeError::ZeroDimension { inputs, outputs });
    }
    Ok(Self { inputs, outputs })
  }
}

pub type FeatureVector = Vec<f64>;
pub type LabelVector = Vec<u8>;

/// One labelled training vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
  pub features: FeatureVector,
  pub labels: LabelVector,
}

/// Labelled examples in load order. Every vector matches the dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
  dims: Dimensions,
  examples: Vec<Example>,
}

impl TrainingSet {
  pub fn new(dims: Dimensions, examples: Vec<Example>) -> Result<Self, ShapeError> {
    for (index, example) in examples.iter().enumerate() {
      check_len("features", index, dims.inputs, example.features.len())?;
      check_len("labels", index, dims.outputs, example.labels.len())?;
      if let Some((unit, &value)) = example.labels.iter().enumerate().find(|&(_, &l)| l > 1) {
        return Err(ShapeError::Label {
          index,
          unit,
          value: f64::from(value),
        });
      }
    }
    Ok(Self { dims, examples })
  }

  /// Builds a set from rows holding inputs followed by expected outputs.
  pub fn from_rows(dims: Dimensions, rows: &[Vec<f64>]) -> Result<Self, ShapeError> {
    let examples = rows
      .iter()
      .enumerate()
      .map(|(index, row)| split_row(dims, index, row))
      .collect::<Result<Vec<_>, _>>()?;
    Self::new(dims, examples)
  }

  pub fn dims(&self) -> Dimensions {
    self.dims
  }

  pub fn examples(&self) -> &[Example] {
    &self.examples
  }

  pub fn len(&self) -> usize {
    self.examples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.examples.is_empty()
  }
}

/// Unlabelled vectors to classify, in load order.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSet {
  dims: Dimensions,
  vectors: Vec<FeatureVector>,
}

impl TestSet {
  pub fn new(dims: Dimensions, vectors: Vec<FeatureVector>) -> Result<Self, ShapeError> {
    for (index, v) in vectors.iter().enumerate() {
      check_len("features", index, dims.inputs, v.len())?;
    }
    Ok(Self { dims, vectors })
  }

  pub fn dims(&self) -> Dimensions {
    self.dims
  }

  pub fn vectors(&self) -> &[FeatureVector] {
    &self.vectors
  }

  pub fn len(&self) -> usize {
    self.vectors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vectors.is_empty()
  }
}

fn check_len(
  what: &'static str,
  index: usize,
  expected: usize,
  found: usize,
) -> Result<(), ShapeError> {
  if expected != found {
    return Err(ShapeError::Length {
      what,
      index,
      expected,
      found,
    });
  }
  Ok(())
}

fn split_row(dims: Dimensions, index: usize, row: &[f64]) -> Result<Example, ShapeError> {
  check_len("row", index, dims.inputs + dims.outputs, row.len())?;
  let (features, expected) = row.split_at(dims.inputs);
  let labels = expected
    .iter()
    .enumerate()
    .map(|(unit, &value)| match value {
      v if v == 0.0 => Ok(0),
      v if v == 1.0 => Ok(1),
      value => Err(ShapeError::Label { index, unit, value }),
    })
    .collect::<Result<LabelVector, _>>()?;
  Ok(Example {
    features: features.to_vec(),
    labels,
  })
}
