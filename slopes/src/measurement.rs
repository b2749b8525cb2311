use chrono::NaiveDateTime;

/// Date and time format used by both the input rows and the exported runs.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait Y: Clone {
  fn y(&self) -> f64;
}

pub trait X: Clone {
  fn x(&self) -> f64;
}

impl Y for f64 {
  fn y(&self) -> f64 {
    *self
  }
}

impl X for f64 {
  fn x(&self) -> f64 {
    *self
  }
}

/// One sensor sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
  pub timestamp: NaiveDateTime,
  /// Offset in seconds from the start of the recording
  pub elapsed_seconds: f64,
  pub value: f64,
}

impl Measurement {
  pub fn new(timestamp: NaiveDateTime, elapsed_seconds: f64, value: f64) -> Self {
    Self {
      timestamp,
      elapsed_seconds,
      value,
    }
  }

  pub fn formatted_timestamp(&self) -> String {
    self.timestamp.format(TIMESTAMP_FORMAT).to_string()
  }
}

impl Y for Measurement {
  fn y(&self) -> f64 {
    self.value
  }
}

impl X for Measurement {
  fn x(&self) -> f64 {
    self.elapsed_seconds
  }
}

/// A (seconds, value) point handed to a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Data {
  pub x: f64,
  pub y: f64,
}

impl Y for Data {
  fn y(&self) -> f64 {
    self.y.y()
  }
}

impl X for Data {
  fn x(&self) -> f64 {
    self.x.x()
  }
}

impl From<&Measurement> for Data {
  fn from(m: &Measurement) -> Self {
    Self {
      x: m.x(),
      y: m.y(),
    }
  }
}

/// Zip parallel x and y slices into chart points.
pub fn points(x: &[f64], y: &[f64]) -> Vec<Data> {
  x.iter()
    .zip(y.iter())
    .map(|(x, y)| Data { x: *x, y: *y })
    .collect()
}
