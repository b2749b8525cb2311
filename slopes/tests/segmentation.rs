use chrono::{Duration, NaiveDate, NaiveDateTime};
use slopes::*;

fn start() -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2024, 3, 1)
    .unwrap()
    .and_hms_opt(6, 0, 0)
    .unwrap()
}

fn measurements(values: &[f64]) -> Vec<Measurement> {
  values
    .iter()
    .enumerate()
    .map(|(i, v)| Measurement::new(start() + Duration::seconds(i as i64), i as f64, *v))
    .collect()
}

fn run_values(runs: &[Run]) -> Vec<Vec<f64>> {
  runs.iter().map(|r| r.values.clone()).collect()
}

/// Deterministic sawtooth with small jitter and periodic sharp drops.
fn sawtooth(n: usize) -> Vec<f64> {
  (0..n)
    .map(|i| {
      let phase = (i % 17) as f64;
      let jitter = ((i as f64) * 1.7).sin() * 0.35;
      10.0 + phase * 0.8 + jitter
    })
    .collect()
}

#[test]
fn splits_at_sharp_drop() {
  let series = MeasurementSeries::new(measurements(&[10.0, 10.5, 10.2, 6.0, 6.3, 6.5]), 0.4);

  let diffs: Vec<f64> = series.diffs().iter().map(|d| trunc!(*d, 6)).collect();
  assert_eq!(diffs, vec![0.5, -0.3, -4.2, 0.3, 0.2]);
  assert_eq!(series.breaking_indices(), vec![2]);
  assert_eq!(series.split_points(), vec![3]);

  let runs = series.runs();
  assert_eq!(
    run_values(&runs),
    vec![vec![10.0, 10.5, 10.2], vec![6.0, 6.3, 6.5]]
  );
  assert_eq!(runs[0].start, 0);
  assert_eq!(runs[0].end(), 3);
  assert_eq!(runs[1].start, 3);
  assert_eq!(runs[1].end(), 6);
  assert_eq!(runs[1].seconds, vec![3.0, 4.0, 5.0]);
  assert_eq!(runs[1].timestamps[0], start() + Duration::seconds(3));
}

#[test]
fn two_samples_with_breaking_drop() {
  let series = MeasurementSeries::new(measurements(&[5.0, 4.5]), 0.4);
  assert_eq!(series.gaps(), vec![Gap::Breaking]);
  assert_eq!(run_values(&series.runs()), vec![vec![5.0], vec![4.5]]);
}

#[test]
fn drop_equal_to_noise_is_continuing() {
  assert_eq!(Gap::classify(-0.4, 0.4), Gap::Continuing);
  assert_eq!(Gap::classify(-0.41, 0.4), Gap::Breaking);
  assert_eq!(Gap::classify(0.0, 0.4), Gap::Continuing);
  assert_eq!(Gap::classify(3.0, 0.4), Gap::Continuing);

  let series = MeasurementSeries::new(measurements(&[1.0, 0.5, 0.0]), 0.5);
  assert_eq!(series.gaps(), vec![Gap::Continuing, Gap::Continuing]);
  assert_eq!(series.runs().len(), 1);
}

#[test]
fn adjacent_drops_leave_a_singleton_run() {
  let series = MeasurementSeries::new(measurements(&[9.0, 9.2, 7.0, 5.0, 5.1]), 0.4);
  assert_eq!(series.breaking_indices(), vec![1, 2]);
  assert_eq!(
    run_values(&series.runs()),
    vec![vec![9.0, 9.2], vec![7.0], vec![5.0, 5.1]]
  );
}

#[test]
fn degenerate_series_yield_a_single_run() {
  let empty = MeasurementSeries::with_default_noise(vec![]);
  assert!(empty.diffs().is_empty());
  let runs = empty.runs();
  assert_eq!(runs.len(), 1);
  assert!(runs[0].is_empty());

  let single = MeasurementSeries::with_default_noise(measurements(&[3.3]));
  assert!(single.diffs().is_empty());
  assert_eq!(run_values(&single.runs()), vec![vec![3.3]]);
}

#[test]
fn default_noise_is_point_four() {
  let series = MeasurementSeries::with_default_noise(measurements(&[1.0]));
  assert_eq!(series.diff_noise(), DEFAULT_DIFF_NOISE);
  assert_eq!(DEFAULT_DIFF_NOISE, 0.4);
}

#[test]
fn runs_partition_the_series() {
  let values = sawtooth(200);
  for noise in [0.0, 0.2, 0.4, 1.0, 5.0, 100.0] {
    let series = MeasurementSeries::new(measurements(&values), noise);
    let runs = series.runs();

    let breaking = series.diffs().iter().filter(|d| **d < -noise).count();
    assert_eq!(runs.len(), breaking + 1, "noise {}", noise);

    let rebuilt: Vec<f64> = runs.iter().flat_map(|r| r.values.clone()).collect();
    assert_eq!(rebuilt, values);

    let mut expected_start = 0;
    for run in runs.iter() {
      assert_eq!(run.start, expected_start);
      expected_start = run.end();
    }
    assert_eq!(expected_start, values.len());
  }
}

#[test]
fn runs_are_maximal_and_break_free() {
  let values = sawtooth(120);
  let noise = 0.4;
  let series = MeasurementSeries::new(measurements(&values), noise);
  let runs = series.runs();

  for run in runs.iter() {
    assert!(run.values.windows(2).all(|w| w[1] - w[0] >= -noise));
  }
  // neighbouring runs are separated by a breaking drop
  for pair in runs.windows(2) {
    let last = *pair[0].values.last().unwrap();
    let first = pair[1].values[0];
    assert!(first - last < -noise);
  }
}

#[test]
fn resegmenting_a_run_is_idempotent() {
  let series = MeasurementSeries::new(measurements(&sawtooth(90)), 0.4);
  for run in series.runs() {
    let again = MeasurementSeries::new(run.measurements(), 0.4).runs();
    assert_eq!(again.len(), 1);
    assert_eq!(again[0].values, run.values);
    assert_eq!(again[0].seconds, run.seconds);
    assert_eq!(again[0].timestamps, run.timestamps);
  }
}

#[test]
fn segmentation_is_deterministic() {
  let series = MeasurementSeries::new(measurements(&sawtooth(64)), 0.4);
  assert_eq!(series.runs(), series.runs());
}

#[test]
fn classified_points_follow_outgoing_gap() {
  let series = MeasurementSeries::new(measurements(&[10.0, 10.5, 10.2, 6.0, 6.3, 6.5]), 0.4);

  let breaking = series.breaking_points();
  assert_eq!(breaking, vec![Data { x: 2.0, y: 10.2 }]);

  let continuing: Vec<f64> = series.continuing_points().iter().map(|d| d.y).collect();
  assert_eq!(continuing, vec![10.0, 10.5, 6.0, 6.3]);
}
