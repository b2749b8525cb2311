use crate::{Columns, SlopeResult, DEFAULT_DIFF_NOISE, DEFAULT_SMOOTHING_WINDOW};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopesConfig {
  /// Largest sample-to-sample drop tolerated inside one slope
  pub diff_noise: f64,
  /// Directory that receives one CSV file per slope
  pub output_dir: PathBuf,
  /// File stem of each slope file, suffixed with `_<n>.csv`
  pub base_name: String,
  /// Chart image, relative to `output_dir` unless absolute
  pub chart_file: PathBuf,
  pub columns: Columns,
  /// Compute the moving average of the values. Off by default.
  pub smooth: bool,
  pub smoothing_window: usize,
}

impl Default for SlopesConfig {
  fn default() -> Self {
    Self {
      diff_noise: DEFAULT_DIFF_NOISE,
      output_dir: PathBuf::from("files/"),
      base_name: "positive_slope".to_string(),
      chart_file: PathBuf::from("slopes.png"),
      columns: Columns::default(),
      smooth: false,
      smoothing_window: DEFAULT_SMOOTHING_WINDOW,
    }
  }
}

impl SlopesConfig {
  pub fn from_yaml(contents: &str) -> SlopeResult<Self> {
    Ok(serde_yaml::from_str(contents)?)
  }

  /// Read the YAML file at `path`, then apply environment overrides.
  pub fn read(path: &Path) -> SlopeResult<Self> {
    let contents = std::fs::read_to_string(path)?;
    let mut cfg = Self::from_yaml(&contents)?;
    if let Ok(dir) = std::env::var("SLOPES_OUTPUT_DIR") {
      info!("Output directory overridden by SLOPES_OUTPUT_DIR: {}", dir);
      cfg.output_dir = PathBuf::from(dir);
    }
    Ok(cfg)
  }
}
