mod app_config;

use perceptron::*;

use app_config::{AppConfig, OutputFormat};
use clap::Parser;
use std::{error::Error, num::NonZeroUsize, path::PathBuf, process::ExitCode};
use tracing::Level;

/// Train a single-layer perceptron network and classify test vectors.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
  /// Number of inputs per vector
  #[arg(value_name = "numInputs")]
  num_inputs: NonZeroUsize,
  /// Number of output units
  #[arg(value_name = "numOutputs")]
  num_outputs: NonZeroUsize,
  /// Training vectors: a count line, then inputs followed by expected outputs
  #[arg(value_name = "trainingFile")]
  training_file: PathBuf,
  /// Test vectors: a count line, then inputs only
  #[arg(value_name = "testFile")]
  test_file: PathBuf,
  /// Give up after this many sweeps (default: train until convergence)
  #[arg(long, value_name = "INT")]
  max_sweeps: Option<usize>,
  /// Report format
  #[arg(long, value_enum)]
  format: Option<OutputFormat>,
  /// YAML config file; command line options override it
  #[arg(short, long, value_name = "PATH")]
  config: Option<PathBuf>,
  /// Log every sweep
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn overrides(&self) -> AppConfig {
    AppConfig {
      max_sweeps: self.max_sweeps,
      format: self.format,
      verbose: self.verbose.then_some(true),
    }
  }
}

const FAILED: u8 = 1;
// clap exits with 2 on usage errors
const NOT_CONVERGED: u8 = 3;

fn run(args: Cli, config: AppConfig) -> Result<u8, Box<dyn Error>> {
  let dims = Dimensions::new(args.num_inputs.get(), args.num_outputs.get())?;
  let params = TrainParams {
    max_sweeps: config.max_sweeps,
  };

  let report = Session::new(dims, &args.training_file, &args.test_file, params).run()?;

  match config.format.unwrap_or_default() {
    OutputFormat::Text => print!("{report}"),
    OutputFormat::Json => println!("{}", report.to_json()?),
  }

  // the trainer already logged the sweep limit
  Ok(if report.training.is_converged() {
    0
  } else {
    NOT_CONVERGED
  })
}

/// Process exit status of a run; errors are printed here.
fn execute(args: Cli, config: AppConfig) -> u8 {
  match run(args, config) {
    Ok(status) => status,
    Err(e) => {
      eprintln!("error: {e}");
      FAILED
    }
  }
}

fn main() -> ExitCode {
  let args = Cli::parse();

  let file_config = match args.config.as_deref().map(AppConfig::from_file).transpose() {
    Ok(config) => config.unwrap_or_default(),
    Err(e) => {
      eprintln!("error: {e}");
      return ExitCode::from(FAILED);
    }
  };
  let config = file_config.merge(args.overrides());

  let level = if config.verbose.unwrap_or(false) {
    Level::DEBUG
  } else {
    Level::INFO
  };
  if let Err(e) = utils::init_logging(level) {
    eprintln!("error: {e}");
    return ExitCode::from(FAILED);
  }

  ExitCode::from(execute(args, config))
}
