use anyhow::{Context, Result};
use storyboard_runtime::GeneratorConfig;

use crate::args::Cli;
use crate::logging;
use crate::output;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level());

    let flags = cli.run_flags();
    let config = GeneratorConfig::load(cli.config.as_deref(), &flags).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to build configuration".to_string(),
        }
    })?;

    let outcome = storyboard_runtime::run(&config).with_context(|| {
        format!(
            "Failed to generate storyboard from {}",
            config.src_root.display()
        )
    })?;

    output::print(&outcome, cli.format)
}
