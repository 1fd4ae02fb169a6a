use storyboard_scanner::scan_components;

use crate::config::GeneratorConfig;
use crate::report::RunReport;
use crate::storage::{read_existing, write_atomic};
use crate::Result;

/// Result of one generation run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    /// Generated storyboard text (written unless this was a dry run)
    pub text: String,
}

/// Scan, reconcile with the existing output, lay out and persist.
///
/// A missing source root or a failed write aborts the run; the existing
/// output file is left as it was in both cases.
pub fn run(config: &GeneratorConfig) -> Result<RunOutcome> {
    tracing::info!(src = %config.src_root.display(), "scanning for components");
    let components = scan_components(&config.src_root, &config.scan)?;
    tracing::info!(count = components.len(), "found components");

    for component in &components {
        tracing::info!(
            component = %component.name,
            path = %component.relative_path,
            category = %component.category,
            style = if component.accepts_external_style { "accepts style" } else { "no style prop" },
            "discovered component"
        );
        if config.verbose {
            tracing::info!(
                component = %component.name,
                full_path = %component.full_path.display(),
                "component location"
            );
        }
    }

    let previous = read_existing(&config.output);
    if previous.is_some() {
        tracing::info!(path = %config.output.display(), "merging with existing storyboard");
    }

    let generation = storyboard_engine::generate(
        &components,
        previous.as_deref(),
        &config.reconcile,
        &config.layout,
        &config.import_prefix,
    );

    let mut report = RunReport::new(
        config.src_root.clone(),
        config.output.clone(),
        components.len(),
        &generation,
    );
    report.dry_run = config.dry_run;

    if config.dry_run {
        tracing::info!(path = %config.output.display(), "dry run, storyboard not written");
    } else {
        write_atomic(&config.output, &generation.text)?;
        report.written = true;
        tracing::info!(path = %config.output.display(), "storyboard updated");
    }

    Ok(RunOutcome {
        report,
        text: generation.text,
    })
}
