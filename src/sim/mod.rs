pub mod config;
pub mod log;
pub mod perf_log;
pub mod top;
pub mod trace;

pub use config::{Config, SimConfig, SimSetup};
pub use top::TraceRunner;
pub use trace::{parse_line, TraceReader};
