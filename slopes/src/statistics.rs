use crate::{SlopeError, SlopeResult};

/// Moving average window used when smoothing is enabled without a size.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

pub fn mean(x: &[f64]) -> f64 {
  let sum: f64 = x.iter().sum();
  let n: f64 = x.len() as f64;
  sum / n
}

/// Simple moving average over a fixed window.
/// `result[i]` is the mean of `x[i..i + window]`, so the output has
/// `x.len() - window + 1` elements.
pub fn moving_average(x: &[f64], window: usize) -> SlopeResult<Vec<f64>> {
  // Guard: window must fit inside the series
  if window == 0 || window > x.len() {
    return Err(SlopeError::InvalidWindow {
      window,
      len: x.len(),
    });
  }

  if window == 1 {
    return Ok(x.to_vec());
  }

  let n = window as f64;
  let mut sum: f64 = x[..window].iter().sum();
  let mut result = Vec::with_capacity(x.len() - window + 1);
  result.push(sum / n);
  for i in window..x.len() {
    sum += x[i] - x[i - window];
    result.push(sum / n);
  }
  Ok(result)
}
