use crate::*;
use crate::trunc;
use log::{info, warn};
use std::path::Path;

/// Outcome of a full ingestion → segmentation → export pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
  pub measurements: usize,
  pub ignored: usize,
  pub runs: usize,
  pub files_written: usize,
}

/// Hand every run to the sink, numbered from 1 in run order.
/// Empty runs are written too so numbering stays sequential.
pub fn export_runs<S: RunSink>(runs: &[Run], sink: &mut S) -> SlopeResult<usize> {
  for (i, run) in runs.iter().enumerate() {
    sink.write_run(i + 1, run)?;
  }
  Ok(runs.len())
}

pub fn plot_runs<C: ChartSink>(series: &MeasurementSeries, runs: &[Run], chart: &mut C) -> SlopeResult<()> {
  let runs: Vec<Vec<Data>> = runs.iter().map(|run| run.points()).collect();
  chart.render(&series.points(), &runs)
}

pub fn process<S: RunSink, C: ChartSink>(
  csv_path: &Path,
  cfg: &SlopesConfig,
  sink: &mut S,
  chart: &mut C,
) -> SlopeResult<Report> {
  let Ingested {
    measurements,
    ignored,
  } = read_measurements(csv_path, &cfg.columns)?;
  let count = measurements.len();

  let series = MeasurementSeries::new(measurements, cfg.diff_noise);
  let runs = series.runs();

  if cfg.smooth {
    // a bad window only skips smoothing
    match series.smooth(cfg.smoothing_window) {
      Ok(smoothed) => info!(
        "Smoothed {} values with window {} into {} values, mean {}",
        series.len(),
        cfg.smoothing_window,
        smoothed.values.len(),
        trunc!(mean(&smoothed.values), 3)
      ),
      Err(e) => warn!("Skipping smoothing: {}", e),
    }
  }

  let files_written = export_runs(&runs, sink)?;
  plot_runs(&series, &runs, chart)?;

  Ok(Report {
    measurements: count,
    ignored,
    runs: runs.len(),
    files_written,
  })
}
