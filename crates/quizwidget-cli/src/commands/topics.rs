//! The `quizwidget topics` command.

use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizwidget_core::model::{Locale, QuestionBank};

pub fn execute(bank: Arc<QuestionBank>, locale: Locale) -> Result<()> {
    println!("Bank: {} ({} topics)", bank.name, bank.topics.len());

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Title", "Questions"]);
    for topic in &bank.topics {
        table.add_row(vec![
            Cell::new(&topic.id),
            Cell::new(topic.title(locale)),
            Cell::new(topic.len()),
        ]);
    }

    println!("{table}");
    Ok(())
}
