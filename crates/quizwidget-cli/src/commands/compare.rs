//! The `quizwidget compare` command.

use std::path::PathBuf;

use anyhow::Result;

use quizwidget_core::report::GradeReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = GradeReport::load_json(&baseline_path)?;
    let current = GradeReport::load_json(&current_path)?;

    let report = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            if !report.same_topic {
                println!(
                    "Note: comparing different topics ({} vs {})",
                    baseline.topic_id, current.topic_id
                );
            }
            println!(
                "Comparison: {}% -> {}% ({:+} points), {} improved, {} regressed, {} unchanged",
                report.baseline_percent,
                report.current_percent,
                report.delta,
                report.improved.len(),
                report.regressed.len(),
                report.unchanged
            );

            if !report.improved.is_empty() {
                println!("\nNow correct:");
                for i in &report.improved {
                    println!("  question {}", i + 1);
                }
            }

            if !report.regressed.is_empty() {
                println!("\nNow incorrect:");
                for i in &report.regressed {
                    println!("  question {}", i + 1);
                }
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
