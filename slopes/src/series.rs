use crate::{derivative, moving_average, points, Data, Measurement, SlopeResult};
use chrono::NaiveDateTime;
use log::{debug, info};

/// Downward fluctuation tolerated inside a single slope, in value units.
pub const DEFAULT_DIFF_NOISE: f64 = 0.4;

/// Classification of the gap between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
  /// Flat, rising or mildly falling. Stays inside the current run.
  Continuing,
  /// Drops steeper than the noise floor. Ends the current run.
  Breaking,
}

impl Gap {
  /// A diff of exactly `-diff_noise` is still continuing.
  pub fn classify(diff: f64, diff_noise: f64) -> Self {
    match diff < -diff_noise {
      true => Gap::Breaking,
      false => Gap::Continuing,
    }
  }
}

/// A contiguous slice `[start, start + len)` of the original series.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
  pub start: usize,
  pub values: Vec<f64>,
  pub seconds: Vec<f64>,
  pub timestamps: Vec<NaiveDateTime>,
}

impl Run {
  /// Exclusive end index into the original series
  pub fn end(&self) -> usize {
    self.start + self.values.len()
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn measurements(&self) -> Vec<Measurement> {
    self
      .timestamps
      .iter()
      .zip(self.seconds.iter())
      .zip(self.values.iter())
      .map(|((timestamp, seconds), value)| Measurement::new(*timestamp, *seconds, *value))
      .collect()
  }

  pub fn points(&self) -> Vec<Data> {
    points(&self.seconds, &self.values)
  }
}

/// Moving average of the values, each aligned to the last sample of its window.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedSeries {
  pub seconds: Vec<f64>,
  pub values: Vec<f64>,
}

/// Ordered measurements split into parallel, index-aligned columns.
#[derive(Debug, Clone)]
pub struct MeasurementSeries {
  measurements: Vec<Measurement>,
  values: Vec<f64>,
  seconds: Vec<f64>,
  timestamps: Vec<NaiveDateTime>,
  diffs: Vec<f64>,
  diff_noise: f64,
}

impl MeasurementSeries {
  pub fn new(measurements: Vec<Measurement>, diff_noise: f64) -> Self {
    let values: Vec<f64> = measurements.iter().map(|m| m.value).collect();
    let seconds = measurements.iter().map(|m| m.elapsed_seconds).collect();
    let timestamps = measurements.iter().map(|m| m.timestamp).collect();
    let diffs = derivative(&values);
    Self {
      measurements,
      values,
      seconds,
      timestamps,
      diffs,
      diff_noise,
    }
  }

  pub fn with_default_noise(measurements: Vec<Measurement>) -> Self {
    Self::new(measurements, DEFAULT_DIFF_NOISE)
  }

  pub fn measurements(&self) -> &[Measurement] {
    &self.measurements
  }

  pub fn values(&self) -> &[f64] {
    &self.values
  }

  pub fn seconds(&self) -> &[f64] {
    &self.seconds
  }

  pub fn timestamps(&self) -> &[NaiveDateTime] {
    &self.timestamps
  }

  /// `diffs[i] = values[i + 1] - values[i]`
  pub fn diffs(&self) -> &[f64] {
    &self.diffs
  }

  pub fn diff_noise(&self) -> f64 {
    self.diff_noise
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn points(&self) -> Vec<Data> {
    self.measurements.iter().map(Data::from).collect()
  }

  pub fn gaps(&self) -> Vec<Gap> {
    self
      .diffs
      .iter()
      .map(|d| Gap::classify(*d, self.diff_noise))
      .collect()
  }

  /// Indices into `diffs` of every breaking gap, ascending.
  pub fn breaking_indices(&self) -> Vec<usize> {
    self
      .gaps()
      .iter()
      .enumerate()
      .filter(|(_, gap)| **gap == Gap::Breaking)
      .map(|(k, _)| k)
      .collect()
  }

  /// Value-array boundaries: a breaking gap at diff index `k` sits between
  /// samples `k` and `k + 1`, so sample `k + 1` opens the next run.
  pub fn split_points(&self) -> Vec<usize> {
    self.breaking_indices().into_iter().map(|k| k + 1).collect()
  }

  /// Samples whose outgoing gap is continuing.
  pub fn continuing_points(&self) -> Vec<Data> {
    self.points_with_gap(Gap::Continuing)
  }

  /// Samples whose outgoing gap is breaking, i.e. the last sample of every run but the final one.
  pub fn breaking_points(&self) -> Vec<Data> {
    self.points_with_gap(Gap::Breaking)
  }

  fn points_with_gap(&self, wanted: Gap) -> Vec<Data> {
    self
      .gaps()
      .into_iter()
      .enumerate()
      .filter(|(_, gap)| *gap == wanted)
      .map(|(i, _)| Data {
        x: self.seconds[i],
        y: self.values[i],
      })
      .collect()
  }

  /// Split the series into maximal runs with no internal breaking gap.
  /// Always returns `breaking_indices().len() + 1` runs which, concatenated,
  /// reproduce the series.
  pub fn runs(&self) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut start = 0;
    for end in self.split_points().into_iter().chain(std::iter::once(self.len())) {
      debug!("Run {} covers [{}, {})", runs.len(), start, end);
      runs.push(self.slice(start, end));
      start = end;
    }
    info!("Found {} positive slopes!", runs.len());
    runs
  }

  fn slice(&self, start: usize, end: usize) -> Run {
    Run {
      start,
      values: self.values[start..end].to_vec(),
      seconds: self.seconds[start..end].to_vec(),
      timestamps: self.timestamps[start..end].to_vec(),
    }
  }

  /// Smooth the values with a moving average of size `window`.
  pub fn smooth(&self, window: usize) -> SlopeResult<SmoothedSeries> {
    let values = moving_average(&self.values, window)?;
    let seconds = self.seconds[window - 1..].to_vec();
    Ok(SmoothedSeries { seconds, values })
  }
}
