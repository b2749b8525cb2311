use std::path::PathBuf;
use thiserror::Error;

pub type SlopeResult<T = ()> = Result<T, SlopeError>;

#[derive(Debug, Error)]
pub enum SlopeError {
  /// The input path does not exist or is not a file
  #[error("The provided data file cannot be found: {0:?}")]
  MissingInputFile(PathBuf),

  /// A required column is not in the header row
  #[error("Column `{0}` is missing from the header row")]
  MissingColumn(String),

  /// A row whose elapsed seconds, value or timestamp failed to parse.
  /// Ingestion drops these and only reports a count.
  #[error("Malformed row at line {line}: {reason}")]
  MalformedRow { line: u64, reason: String },

  #[error("Invalid smoothing window {window} for a series of length {len}")]
  InvalidWindow { window: usize, len: usize },

  #[error("{0}")]
  Csv(#[from] csv::Error),

  #[error("{0}")]
  Io(#[from] std::io::Error),

  #[error("{0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Failed to render chart: {0}")]
  Plot(String),
}
