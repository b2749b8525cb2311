use crate::{Data, Run, SlopeError, SlopeResult, X, Y};
use log::{debug, info};
use plotters::prelude::*;
use plotters::style::full_palette::*;
use plotters::style::{BLACK, WHITE};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const ORIGINAL: RGBColor = BLACK;
const PALETTE: [RGBColor; 6] = [RED_A400, GREEN_500, AMBER_800, BLUE_A700, PURPLE_A400, TEAL_700];

/// Receives each segmented run with its 1-based sequential number.
pub trait RunSink {
  fn write_run(&mut self, number: usize, run: &Run) -> SlopeResult<()>;
}

/// Receives the original series and the points of every run, in run order.
pub trait ChartSink {
  fn render(&mut self, original: &[Data], runs: &[Vec<Data>]) -> SlopeResult<()>;
}

/// Writes one CSV file per run into a directory.
#[derive(Debug, Clone)]
pub struct CsvRunWriter {
  pub output_dir: PathBuf,
  pub base_name: String,
  pub measurement_name: String,
}

impl CsvRunWriter {
  /// `output_dir` is created on the first `write_run`, not here.
  pub fn new(output_dir: &Path, base_name: &str, measurement_name: &str) -> Self {
    Self {
      output_dir: output_dir.to_path_buf(),
      base_name: base_name.to_string(),
      measurement_name: measurement_name.to_string(),
    }
  }

  pub fn file_path(&self, number: usize) -> PathBuf {
    self
      .output_dir
      .join(format!("{}_{}.csv", self.base_name, number))
  }
}

impl RunSink for CsvRunWriter {
  fn write_run(&mut self, number: usize, run: &Run) -> SlopeResult<()> {
    if !self.output_dir.exists() {
      std::fs::create_dir_all(&self.output_dir)?;
    }
    let path = self.file_path(number);
    let mut file = File::create(&path)?;
    writeln!(file, "Time, Time(s), {}", self.measurement_name)?;

    let mut out = csv::WriterBuilder::new()
      .has_headers(false)
      .from_writer(file);
    for m in run.measurements() {
      out.write_record([
        m.formatted_timestamp(),
        m.elapsed_seconds.to_string(),
        m.value.to_string(),
      ])?;
    }
    out.flush()?;
    debug!("Wrote {} rows to {:?}", run.len(), path);
    Ok(())
  }
}

/// Renders the series and its runs to a PNG file.
#[derive(Debug, Clone)]
pub struct PngChart {
  pub out_file: PathBuf,
  pub title: String,
  pub y_label: String,
}

impl PngChart {
  pub fn new(out_file: &Path, title: &str, y_label: &str) -> Self {
    Self {
      out_file: out_file.to_path_buf(),
      title: title.to_string(),
      y_label: y_label.to_string(),
    }
  }

  pub fn run_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
  }
}

fn plot_err<E: std::fmt::Display>(e: E) -> SlopeError {
  SlopeError::Plot(e.to_string())
}

fn is_finite<T: X + Y>(datum: &T) -> bool {
  datum.x().is_finite() && datum.y().is_finite()
}

/// Axis range over every finite point, widened when all points share one coordinate.
fn bounds<'a, T: X + Y + 'a>(
  data: impl Iterator<Item = &'a T>,
) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
  let mut min_x = f64::MAX;
  let mut max_x = f64::MIN;
  let mut min_y = f64::MAX;
  let mut max_y = f64::MIN;
  for datum in data.filter(|d| is_finite(*d)) {
    min_x = min_x.min(datum.x());
    max_x = max_x.max(datum.x());
    min_y = min_y.min(datum.y());
    max_y = max_y.max(datum.y());
  }
  if min_x >= max_x {
    min_x -= 1.0;
    max_x += 1.0;
  }
  if min_y >= max_y {
    min_y -= 1.0;
    max_y += 1.0;
  }
  (min_x..max_x, min_y..max_y)
}

impl ChartSink for PngChart {
  fn render(&mut self, original: &[Data], runs: &[Vec<Data>]) -> SlopeResult<()> {
    // a non-finite coordinate would blow up the axis range
    let original: Vec<Data> = original.iter().copied().filter(is_finite).collect();
    let runs: Vec<Vec<Data>> = runs
      .iter()
      .map(|run| run.iter().copied().filter(is_finite).collect())
      .collect();
    if original.is_empty() {
      info!("Nothing to plot");
      return Ok(());
    }
    let (x_range, y_range) = bounds(original.iter().chain(runs.iter().flatten()));

    if let Some(dir) = self.out_file.parent() {
      if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
      }
    }

    let root = BitMapBackend::new(&self.out_file, (2048, 1024)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(&root)
      .set_all_label_area_size(150)
      .margin(20)
      .caption(&self.title, ("sans-serif", 40.0).into_font())
      .build_cartesian_2d(x_range, y_range)
      .map_err(plot_err)?;

    chart
      .configure_mesh()
      .light_line_style(WHITE)
      .label_style(("sans-serif", 30, &BLACK).into_text_style(&root))
      .x_desc("Time(s)")
      .y_desc(self.y_label.as_str())
      .y_labels(10)
      .draw()
      .map_err(plot_err)?;

    chart
      .draw_series(LineSeries::new(
        original.iter().map(|d| (d.x, d.y)),
        ShapeStyle {
          color: RGBAColor::from(ORIGINAL),
          filled: true,
          stroke_width: 1,
        },
      ))
      .map_err(plot_err)?
      .label("original values")
      .legend(|(x, y)| PathElement::new([(x + 10, y + 1), (x, y)], ORIGINAL.stroke_width(10)));

    for (index, run) in runs.iter().enumerate() {
      let color = Self::run_color(index);
      chart
        .draw_series(run.iter().map(|d| Circle::new((d.x, d.y), 3, color.filled())))
        .map_err(plot_err)?
        .label(format!("positive_slope_{}", index))
        .legend(move |(x, y)| Circle::new((x + 5, y), 5, color.filled()));
    }

    chart
      .configure_series_labels()
      .position(SeriesLabelPosition::UpperLeft)
      .margin(20)
      .legend_area_size(30)
      .border_style(BLACK)
      .background_style(BLACK.mix(0.1))
      .label_font(("sans-serif", 24))
      .draw()
      .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    info!("Chart written to {:?}", self.out_file);
    Ok(())
  }
}
