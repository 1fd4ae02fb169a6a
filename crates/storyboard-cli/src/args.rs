use crate::types::{LogLevel, OutputFormat};
use clap::Parser;
use std::path::PathBuf;
use storyboard_runtime::RunFlags;

#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(
    about = "Scan a component tree and generate or update a positioned storyboard",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Source directory to scan [default: src]
    #[arg(long, value_name = "DIR")]
    pub src: Option<PathBuf>,

    /// Storyboard file to write [default: utopia/storyboard.js]
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// TOML file overriding paths, keyword lists and layout constants
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Include utility files (utils.js, etc.)
    #[arg(long)]
    pub include_utils: bool,

    /// Include index files
    #[arg(long)]
    pub include_index: bool,

    /// Show detailed logs, including each component's full path
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Create a fresh storyboard, discarding existing scene positions
    #[arg(long)]
    pub no_preserve: bool,

    /// Keep scenes whose component no longer exists
    #[arg(long)]
    pub no_prune: bool,

    /// Don't report components whose scene is missing
    #[arg(long)]
    pub no_force_regen: bool,

    /// Print the generated storyboard instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, default_value = "plain")]
    pub format: OutputFormat,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else if self.quiet {
            LogLevel::Warn
        } else {
            LogLevel::Info
        }
    }

    pub fn run_flags(&self) -> RunFlags {
        RunFlags {
            src: self.src.clone(),
            output: self.output.clone(),
            include_utils: self.include_utils,
            include_index: self.include_index,
            verbose: self.verbose,
            preserve_existing: !self.no_preserve,
            prune: !self.no_prune,
            force_regen_missing: !self.no_force_regen,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_to_default_flags() {
        let cli = Cli::parse_from(["storyboard"]);
        assert_eq!(cli.run_flags(), RunFlags::default());
        assert_eq!(cli.log_level(), LogLevel::Info);
        assert_eq!(cli.format, OutputFormat::Plain);
    }

    #[test]
    fn test_negative_switches() {
        let cli = Cli::parse_from([
            "storyboard",
            "--no-preserve",
            "--no-prune",
            "--no-force-regen",
            "--include-utils",
        ]);
        let flags = cli.run_flags();
        assert!(!flags.preserve_existing);
        assert!(!flags.prune);
        assert!(!flags.force_regen_missing);
        assert!(flags.include_utils);
        assert!(!flags.include_index);
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(
            Cli::parse_from(["storyboard", "--verbose"]).log_level(),
            LogLevel::Debug
        );
        assert_eq!(
            Cli::parse_from(["storyboard", "--quiet"]).log_level(),
            LogLevel::Warn
        );
        assert!(Cli::try_parse_from(["storyboard", "--verbose", "--quiet"]).is_err());
    }
}
