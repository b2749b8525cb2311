use log::*;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

pub fn init_logger() {
  let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
  let log_level = match log_level.to_lowercase().as_str() {
    "trace" => LevelFilter::Trace,
    "debug" => LevelFilter::Debug,
    "info" => LevelFilter::Info,
    "warn" => LevelFilter::Warn,
    "error" => LevelFilter::Error,
    _ => LevelFilter::Info,
  };

  let mut cfg = ConfigBuilder::new();
  // falls back to UTC when the local offset can't be determined
  let _ = cfg.set_time_offset_to_local();
  let cfg = cfg.build();

  // a second init (e.g. from several tests) is harmless
  if TermLogger::init(log_level, cfg, TerminalMode::Mixed, ColorChoice::Auto).is_err() {
    debug!("Logger already initialized");
  }
}
