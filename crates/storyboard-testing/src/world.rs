//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated project directory with a `src/` tree
//! - Writing, replacing and removing component sources
//! - Running the generator in-process or through the CLI binary

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use storyboard_runtime::{ConfigFile, GeneratorConfig, RunFlags, RunOutcome};
use tempfile::TempDir;

use crate::fixtures::{PORTFOLIO, SourceFixture};

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use storyboard_testing::TestWorld;
///
/// let world = TestWorld::new().with_portfolio();
/// let result = world.run(&[]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new project with an empty `src/` directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("project");
        std::fs::create_dir_all(root.join("src")).expect("Failed to create src dir");

        Self { temp_dir, root }
    }

    /// Populate `src/` with the sample portfolio app.
    pub fn with_portfolio(self) -> Self {
        for fixture in PORTFOLIO {
            self.write_fixture(fixture).expect("Failed to write fixture");
        }
        self
    }

    /// Project root; commands run here.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// Default output location, `utopia/storyboard.js` under the root.
    pub fn output_path(&self) -> PathBuf {
        self.root.join("utopia").join("storyboard.js")
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a source file relative to `src/`, creating directories as needed.
    pub fn write_source(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.src_dir().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn write_fixture(&self, fixture: &SourceFixture) -> Result<()> {
        self.write_source(fixture.path, fixture.content)
    }

    pub fn remove_source(&self, relative: &str) -> Result<()> {
        std::fs::remove_file(self.src_dir().join(relative))?;
        Ok(())
    }

    pub fn read_output(&self) -> Result<String> {
        Ok(std::fs::read_to_string(self.output_path())?)
    }

    pub fn write_output(&self, content: &str) -> Result<()> {
        let path = self.output_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Flags pointing at this project's source tree and output file.
    pub fn flags(&self) -> RunFlags {
        RunFlags {
            src: Some(self.src_dir()),
            output: Some(self.output_path()),
            ..RunFlags::default()
        }
    }

    /// Run the pipeline in-process.
    pub fn generate(&self, flags: RunFlags) -> Result<RunOutcome> {
        let config = GeneratorConfig::new(ConfigFile::default(), &flags);
        Ok(storyboard_runtime::run(&config)?)
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller must provide the base command (e.g., from `cargo_bin_cmd!("storyboard")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(&self.root);
        cmd
    }

    /// Execute the binary inside the project root and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built (which cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("storyboard")
            .map_err(|e| anyhow::anyhow!("Failed to find storyboard binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
