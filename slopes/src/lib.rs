pub mod calculus;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logger;
pub mod macros;
pub mod measurement;
pub mod pipeline;
pub mod series;
pub mod sink;
pub mod statistics;

pub use calculus::*;
pub use config::*;
pub use error::*;
pub use ingest::*;
pub use logger::*;
pub use measurement::*;
pub use pipeline::*;
pub use series::*;
pub use sink::*;
pub use statistics::*;
