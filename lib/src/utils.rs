#[cfg(not(debug_assertions))]
use human_panic::setup_panic;
use tracing::{
  subscriber::{DefaultGuard, SetGlobalDefaultError},
  Level,
};

#[cfg(debug_assertions)]
extern crate better_panic;

// [NOTE] tracing
//
// Library code logs through the `tracing` macros only. The binary installs
// the global subscriber once, tests install a scoped one.
// Everything goes to stderr so that stdout carries nothing but the report.

pub fn install_logger(level: Level) -> Result<(), SetGlobalDefaultError> {
  let subscriber = tracing_subscriber::fmt()
    .compact()
    .with_max_level(level)
    .with_writer(std::io::stderr)
    .finish();
  tracing::subscriber::set_global_default(subscriber)
}

pub fn init_logging(level: Level) -> Result<(), SetGlobalDefaultError> {
  // Human Panic. Only enabled when *not* debugging.
  #[cfg(not(debug_assertions))]
  {
    setup_panic!();
  }

  // Better Panic. Only enabled *when* debugging.
  #[cfg(debug_assertions)]
  {
    better_panic::Settings::debug()
      .most_recent_first(false)
      .lineno_suffix(true)
      .verbosity(better_panic::Verbosity::Full)
      .install();
  }

  install_logger(level)?;

  Ok(())
}

/// Thread-local subscriber for tests; logging stops when the guard drops.
pub fn init_logging_tests() -> DefaultGuard {
  let subscriber = tracing_subscriber::fmt()
    .compact()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .finish();
  tracing::subscriber::set_default(subscriber)
}
