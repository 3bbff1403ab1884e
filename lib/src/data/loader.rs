use std::path::Path;

use tracing::{debug, instrument, warn};

use super::{Dimensions, TestSet, TrainingSet};
use crate::error::{LoadError, ParseError, ShapeError};

/// Parses a training file: a vector count, then one line per vector holding
/// the inputs followed by the expected outputs.
pub fn parse_training_set(content: &str, dims: Dimensions) -> Result<TrainingSet, ParseError> {
  let rows = parse_vectors(content, dims.inputs + dims.outputs)?;
  let (lines, rows): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
  TrainingSet::from_rows(dims, &rows).map_err(|source| shape_error(&lines, source))
}

/// Parses a test file: a vector count, then one line of inputs per vector.
pub fn parse_test_set(content: &str, dims: Dimensions) -> Result<TestSet, ParseError> {
  let rows = parse_vectors(content, dims.inputs)?;
  let (lines, vectors): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
  TestSet::new(dims, vectors).map_err(|source| shape_error(&lines, source))
}

#[instrument(level = "debug")]
pub fn read_training_set(path: &Path, dims: Dimensions) -> Result<TrainingSet, LoadError> {
  let content = read(path)?;
  let set = parse_training_set(&content, dims).map_err(|source| LoadError::Parse {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(examples = set.len(), "loaded training set");
  Ok(set)
}

#[instrument(level = "debug")]
pub fn read_test_set(path: &Path, dims: Dimensions) -> Result<TestSet, LoadError> {
  let content = read(path)?;
  let set = parse_test_set(&content, dims).map_err(|source| LoadError::Parse {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(vectors = set.len(), "loaded test set");
  Ok(set)
}

fn read(path: &Path) -> Result<String, LoadError> {
  std::fs::read_to_string(path).map_err(|source| LoadError::Io {
    path: path.to_path_buf(),
    source,
  })
}

fn shape_error(lines: &[usize], source: ShapeError) -> ParseError {
  let line = source
    .vector_index()
    .and_then(|index| lines.get(index).copied())
    .unwrap_or(1);
  ParseError::Shape { line, source }
}

/// Reads the count line and that many rows of exactly `width` numbers.
/// Returns each row with its 1-based line number.
fn parse_vectors(content: &str, width: usize) -> Result<Vec<(usize, Vec<f64>)>, ParseError> {
  let mut lines = content
    .lines()
    .enumerate()
    .map(|(i, line)| (i + 1, line.trim()))
    .filter(|(_, line)| !line.is_empty());

  let (count_line, count) = lines.next().ok_or(ParseError::MissingCount)?;
  let count: usize = count.parse().map_err(|_| ParseError::BadCount {
    line: count_line,
    found: count.to_string(),
  })?;

  let mut rows = Vec::new();
  for (line, text) in lines.by_ref().take(count) {
    let row = text
      .split_whitespace()
      .map(|token| {
        token.parse::<f64>().map_err(|_| ParseError::BadNumber {
          line,
          token: token.to_string(),
        })
      })
      .collect::<Result<Vec<_>, _>>()?;
    if row.len() != width {
      return Err(ParseError::DimensionMismatch {
        line,
        expected: width,
        found: row.len(),
      });
    }
    rows.push((line, row));
  }

  if rows.len() < count {
    return Err(ParseError::TooFewVectors {
      expected: count,
      found: rows.len(),
    });
  }

  let ignored = lines.count();
  if ignored > 0 {
    warn!(ignored, "ignoring lines after the declared {count} vectors");
  }
  Ok(rows)
}
