use crate::{Measurement, SlopeError, SlopeResult, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use csv::StringRecord;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Header names of the input columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
  pub date: String,
  pub time: String,
  pub seconds: String,
  pub measurement: String,
}

impl Default for Columns {
  fn default() -> Self {
    Self {
      date: "Date".to_string(),
      time: "Time".to_string(),
      seconds: "Time(s)".to_string(),
      measurement: "O2 Charge".to_string(),
    }
  }
}

/// Header positions of each column, resolved once per file.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndex {
  pub date: usize,
  pub time: usize,
  pub seconds: usize,
  pub measurement: usize,
}

impl ColumnIndex {
  pub fn resolve(headers: &StringRecord, columns: &Columns) -> SlopeResult<Self> {
    let find = |name: &str| {
      headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| SlopeError::MissingColumn(name.to_string()))
    };
    Ok(Self {
      date: find(&columns.date)?,
      time: find(&columns.time)?,
      seconds: find(&columns.seconds)?,
      measurement: find(&columns.measurement)?,
    })
  }
}

#[derive(Debug, Clone)]
pub struct Ingested {
  pub measurements: Vec<Measurement>,
  /// Rows dropped because a field failed to parse
  pub ignored: usize,
}

/// Parse one data row. `line` is only used for the error message.
pub fn parse_row(record: &StringRecord, index: &ColumnIndex, line: u64) -> SlopeResult<Measurement> {
  let field = |i: usize| {
    record.get(i).map(str::trim).ok_or_else(|| SlopeError::MalformedRow {
      line,
      reason: format!("row has {} fields, missing field {}", record.len(), i),
    })
  };
  let malformed = |reason: String| SlopeError::MalformedRow { line, reason };

  // format is: 2020-08-11 06:00:00
  let date = format!("{} {}", field(index.date)?, field(index.time)?);
  let timestamp = NaiveDateTime::parse_from_str(&date, TIMESTAMP_FORMAT)
    .map_err(|e| malformed(format!("invalid timestamp {:?}: {}", date, e)))?;

  // `inf` and `NaN` parse as f64 but are not readings
  let number = |name: &str, raw: &str| match f64::from_str(raw) {
    Ok(n) if n.is_finite() => Ok(n),
    Ok(_) => Err(malformed(format!("non-finite {} {:?}", name, raw))),
    Err(e) => Err(malformed(format!("invalid {} {:?}: {}", name, raw, e))),
  };
  let elapsed_seconds = number("elapsed seconds", field(index.seconds)?)?;
  let value = number("value", field(index.measurement)?)?;

  Ok(Measurement::new(timestamp, elapsed_seconds, value))
}

/// Read the sensor data from a CSV file.
/// Malformed rows are dropped and counted, a missing file fails before anything is opened.
pub fn read_measurements(csv_path: &Path, columns: &Columns) -> SlopeResult<Ingested> {
  if !csv_path.is_file() {
    return Err(SlopeError::MissingInputFile(csv_path.to_path_buf()));
  }
  let file_buffer = File::open(csv_path)?;
  let mut csv = csv::ReaderBuilder::new()
    .flexible(true)
    .from_reader(file_buffer);

  let index = ColumnIndex::resolve(csv.headers()?, columns)?;

  let mut measurements = vec![];
  let mut ignored = 0;
  for record in csv.records() {
    let record = record?;
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    match parse_row(&record, &index, line) {
      Ok(measurement) => measurements.push(measurement),
      Err(e) => {
        debug!("{}", e);
        ignored += 1;
      }
    }
  }
  info!(
    "Ignored {} rows because some value was invalid. For example \"--\" instead of a sensor value.",
    ignored
  );

  Ok(Ingested {
    measurements,
    ignored,
  })
}
