//! Single-layer network of binary-threshold units trained with the
//! perceptron learning rule.
//!
//! [`network`] holds the learning engine, [`data`] loads vector files,
//! [`report`] renders the results and [`session`] ties a run together.

pub mod data;
pub mod error;
pub mod network;
pub mod report;
pub mod session;
pub mod utils;

pub use data::{Dimensions, Example, TestSet, TrainingSet};
pub use error::{LoadError, ParseError, ShapeError};
pub use network::{TrainOutcome, TrainParams, Trainer, TrainerState, UnitBank};
pub use report::{Classification, Report};
pub use session::Session;
