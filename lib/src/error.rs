use std::path::PathBuf;

use thiserror::Error;

/// A vector does not have the length the run's dimensions require.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
  #[error("dimensions must be positive (inputs = {inputs}, outputs = {outputs})")]
  ZeroDimension { inputs: usize, outputs: usize },
  #[error("{what} of vector {index} has {found} values, expected {expected}")]
  Length {
    what: &'static str,
    index: usize,
    expected: usize,
    found: usize,
  },
  #[error("label {value} for output {unit} of vector {index} is not 0 or 1")]
  Label { index: usize, unit: usize, value: f64 },
}

impl ShapeError {
  /// Position of the offending vector in its set, if the error concerns one.
  pub fn vector_index(&self) -> Option<usize> {
    match self {
      Self::ZeroDimension { .. } => None,
      Self::Length { index, .. } | Self::Label { index, .. } => Some(*index),
    }
  }
}

/// Malformed vector file contents. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
  #[error("missing vector count")]
  MissingCount,
  #[error("line {line}: expected a vector count, found {found:?}")]
  BadCount { line: usize, found: String },
  #[error("line {line}: {token:?} is not a number")]
  BadNumber { line: usize, token: String },
  #[error("line {line}: expected {expected} values, found {found}")]
  DimensionMismatch {
    line: usize,
    expected: usize,
    found: usize,
  },
  #[error("expected {expected} vectors, found only {found}")]
  TooFewVectors { expected: usize, found: usize },
  #[error("line {line}: {source}")]
  Shape {
    line: usize,
    #[source]
    source: ShapeError,
  },
}

/// Failure to turn a file on disk into a training or test set.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("{}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: ParseError,
  },
}
