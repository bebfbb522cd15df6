//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use quizwidget_core::model::QuestionBank;
use quizwidget_core::parser;

pub mod compare;
pub mod grade;
pub mod init;
pub mod play;
pub mod topics;
pub mod validate;

/// Load the bank at `path`, or the built-in bank when no path is given.
pub fn load_bank(path: Option<&Path>) -> Result<Arc<QuestionBank>> {
    let bank = match path {
        Some(p) => parser::load_bank(p)
            .with_context(|| format!("failed to load bank from {}", p.display()))?,
        None => parser::builtin_bank().context("built-in bank is invalid")?,
    };
    tracing::debug!(
        bank = %bank.id,
        topics = bank.topics.len(),
        questions = bank.question_count(),
        "bank loaded"
    );
    Ok(Arc::new(bank))
}
