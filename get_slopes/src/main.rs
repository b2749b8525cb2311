use log::*;
use slopes::*;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
  dotenv::dotenv().ok();
  init_logger();

  let csv_path = match std::env::args().nth(1) {
    Some(path) => PathBuf::from(path),
    None => anyhow::bail!("Usage: get_slopes <csv file>"),
  };

  let dir = env!("CARGO_MANIFEST_DIR");
  let cfg = SlopesConfig::read(&PathBuf::from(dir).join("config.yaml"))?;

  let mut writer = CsvRunWriter::new(&cfg.output_dir, &cfg.base_name, &cfg.columns.measurement);
  let chart_file = cfg.output_dir.join(&cfg.chart_file);
  let mut chart = PngChart::new(&chart_file, "Positive slopes", &cfg.columns.measurement);
  let report = process(&csv_path, &cfg, &mut writer, &mut chart)?;

  info!(
    "{} measurements ({} ignored) split into {} slopes, {} files written to {:?}",
    report.measurements, report.ignored, report.runs, report.files_written, cfg.output_dir
  );
  Ok(())
}
