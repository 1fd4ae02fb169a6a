use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use storyboard_runtime::{RunOutcome, RunReport};

use crate::types::OutputFormat;

pub fn print(outcome: &RunOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(outcome),
        OutputFormat::Plain if outcome.report.dry_run => {
            print!("{}", outcome.text);
            Ok(())
        }
        OutputFormat::Plain => {
            let color = std::io::stdout().is_terminal();
            print!("{}", format_summary(&outcome.report, color));
            Ok(())
        }
    }
}

/// The report as JSON; dry runs carry the generated text under `storyboard`.
fn print_json(outcome: &RunOutcome) -> Result<()> {
    let mut value = serde_json::to_value(&outcome.report)?;
    if outcome.report.dry_run
        && let Some(object) = value.as_object_mut()
    {
        object.insert(
            "storyboard".to_string(),
            serde_json::Value::String(outcome.text.clone()),
        );
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn format_summary(report: &RunReport, color: bool) -> String {
    let mut out = String::new();

    let title = format!("Storyboard updated: {}", report.output.display());
    if color {
        out.push_str(&format!("{}\n", title.green().bold()));
    } else {
        out.push_str(&format!("{}\n", title));
    }

    out.push_str(&format!(
        "  {} components found, {} scenes kept, {} placed\n",
        report.discovered,
        report.kept,
        report.placed.len()
    ));

    if !report.placed.is_empty() {
        out.push_str(&list_line("placed", &report.placed, color));
    }
    if !report.missing.is_empty() {
        out.push_str(&list_line("missing scenes", &report.missing, color));
    }
    if !report.pruned.is_empty() {
        let ids: Vec<String> = report
            .pruned
            .iter()
            .map(|p| format!("{} ({})", p.id, p.component))
            .collect();
        out.push_str(&list_line("pruned", &ids, color));
    }
    if !report.retained.is_empty() {
        out.push_str(&list_line("retained", &report.retained, color));
    }
    if !report.superseded.is_empty() {
        out.push_str(&list_line("superseded", &report.superseded, color));
    }
    for relocation in &report.relocated {
        let line = format!(
            "  moved {} from ({}, {}) to ({}, {})",
            relocation.id,
            relocation.from.0,
            relocation.from.1,
            relocation.to.0,
            relocation.to.1
        );
        if color {
            out.push_str(&format!("{}\n", line.yellow()));
        } else {
            out.push_str(&format!("{}\n", line));
        }
    }

    if report.is_clean() && report.placed.is_empty() {
        out.push_str("  no changes to the layout\n");
    }

    out
}

fn list_line(label: &str, items: &[String], color: bool) -> String {
    let label = format!("{}:", label);
    if color {
        format!("  {} {}\n", label.cyan(), items.join(", "))
    } else {
        format!("  {} {}\n", label, items.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report() -> RunReport {
        let world = tempfile::TempDir::new().unwrap();
        let src = world.path().join("src");
        std::fs::create_dir_all(src.join("pages")).unwrap();
        std::fs::write(
            src.join("pages/Home.jsx"),
            "export const Home = () => <main>Home</main>\n",
        )
        .unwrap();

        let flags = storyboard_runtime::RunFlags {
            src: Some(src),
            output: Some(PathBuf::from("board.js")),
            dry_run: true,
            ..Default::default()
        };
        let config = storyboard_runtime::GeneratorConfig::new(Default::default(), &flags);
        storyboard_runtime::run(&config).unwrap().report
    }

    #[test]
    fn test_plain_summary_without_color() {
        let summary = format_summary(&report(), false);
        assert_eq!(
            summary,
            "Storyboard updated: board.js\n  1 components found, 0 scenes kept, 1 placed\n  placed: home-scene\n  missing scenes: Home\n"
        );
    }
}
