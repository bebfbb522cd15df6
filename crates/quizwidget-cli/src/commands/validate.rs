//! The `quizwidget validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizwidget_core::parser;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        parser::load_bank_directory(&bank_path)?
    } else {
        vec![parser::parse_bank(&bank_path)?]
    };
    anyhow::ensure!(!banks.is_empty(), "no bank files in {}", bank_path.display());

    // Topic ids must be unique across every bank that would be merged.
    parser::merge_banks(banks.clone())?;

    let mut total_warnings = 0;

    for bank in &banks {
        println!(
            "Bank: {} ({} topics, {} questions)",
            bank.name,
            bank.topics.len(),
            bank.question_count()
        );

        let warnings = parser::validate_bank(bank);
        for w in &warnings {
            let prefix = match (&w.topic_id, w.question) {
                (Some(id), Some(q)) => format!("  [{id} #{q}]"),
                (Some(id), None) => format!("  [{id}]"),
                _ => "  ".to_string(),
            };
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
