//! The `quizwidget init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizwidget.toml").exists() {
        println!("quizwidget.toml already exists, skipping.");
    } else {
        std::fs::write("quizwidget.toml", SAMPLE_CONFIG)?;
        println!("Created quizwidget.toml");
    }

    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your questions to banks/example.toml");
    println!("  2. Run: quizwidget validate --bank banks");
    println!("  3. Run: quizwidget play --topic quiz-example");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizwidget configuration

# Locale used when --locale is not given: "en" or "ar".
default_locale = "en"

# Bank file or directory of bank files. Remove to use the built-in bank.
bank = "banks"

# Where `quizwidget grade --save` writes reports.
output_dir = "./quizwidget-out"
"#;

const EXAMPLE_BANK: &str = r#"# Every question needs both translations with the same option order
# and the same zero-based answer index.

[bank]
id = "example"
name = "Example Bank"

[[topics]]
id = "quiz-example"
title = { en = "Getting Started", ar = "البداية" }

[[topics.questions]]
en = { text = "Which tag opens a PHP block?", options = ["<?php", "<php>", "<script>"], answer = 0 }
ar = { text = "ما الوسم الذي يفتح كتلة PHP؟", options = ["<?php", "<php>", "<script>"], answer = 0 }

[[topics.questions]]
en = { text = "Which character ends a PHP statement?", options = [":", ";", "."], answer = 1 }
ar = { text = "ما الحرف الذي ينهي تعليمة PHP؟", options = [":", ";", "."], answer = 1 }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn example_bank_parses_cleanly() {
        let bank =
            quizwidget_core::parser::parse_bank_str(EXAMPLE_BANK, Path::new("example.toml"))
                .unwrap();
        assert_eq!(bank.topic_ids().collect::<Vec<_>>(), vec!["quiz-example"]);
        assert!(quizwidget_core::parser::validate_bank(&bank).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config: crate::config::QuizConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.bank.as_deref(), Some(Path::new("banks")));
    }
}
