/// First difference of the series: `result[i] = series[i + 1] - series[i]`.
/// Empty when the series has fewer than two elements.
pub fn derivative(series: &[f64]) -> Vec<f64> {
  series.windows(2).map(|w| w[1] - w[0]).collect()
}
