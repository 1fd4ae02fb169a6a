pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod storage;

pub use config::{ConfigFile, DEFAULT_OUTPUT, DEFAULT_SRC_DIR, GeneratorConfig, RunFlags};
pub use error::{Error, Result};
pub use pipeline::{RunOutcome, run};
pub use report::RunReport;
pub use storage::{read_existing, write_atomic};
