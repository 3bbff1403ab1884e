use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

/// Run settings. Also defines the config file format (every field can be
/// omitted).
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
  /// Stop after this many sweeps even without convergence
  pub max_sweeps: Option<usize>,
  /// How the report is printed
  pub format: Option<OutputFormat>,
  /// Log every sweep
  pub verbose: Option<bool>,
}

impl AppConfig {
  pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
      .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
    Self::from_yaml(&content).map_err(|e| format!("{}: {e}", path.display()).into())
  }

  pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
    // an empty document deserializes as unit, not as a map
    if content.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(content)
  }

  // merge configs where the second overwrites the first
  pub fn merge(self, other: Self) -> Self {
    Self {
      max_sweeps: other.max_sweeps.or(self.max_sweeps),
      format: other.format.or(self.format),
      verbose: other.verbose.or(self.verbose),
    }
  }
}
