//! The `quizwidget grade` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use quizwidget_core::locale::LocaleSignal;
use quizwidget_core::model::{Locale, QuestionBank};
use quizwidget_core::report::GradeReport;
use quizwidget_core::widget::{QuizWidget, SubmitOutcome};
use quizwidget_render::{Document, Format};

/// Parse a comma-separated list of 1-based option numbers; `_` skips a question.
pub fn parse_answers(list: &str) -> Result<Vec<Option<usize>>> {
    list.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(i, item)| -> Result<Option<usize>> {
            if item.is_empty() || item == "_" {
                return Ok(None);
            }
            let option: usize = item
                .parse()
                .with_context(|| format!("answer {} is not a number: {item}", i + 1))?;
            anyhow::ensure!(option >= 1, "answer {}: options are numbered from 1", i + 1);
            Ok(Some(option - 1))
        })
        .collect()
}

pub struct GradeArgs {
    pub topic: String,
    pub answers: String,
    pub locale: Locale,
    pub format: Format,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub save: bool,
    pub output_dir: PathBuf,
}

pub fn execute(bank: Arc<QuestionBank>, args: GradeArgs) -> Result<()> {
    let answers = parse_answers(&args.answers)?;

    let mut widget = QuizWidget::mount(
        bank,
        Some(args.format.surface()),
        LocaleSignal::fixed(args.locale),
    )
    .context("quiz widget did not mount")?;

    widget.try_load_topic(&args.topic)?;
    let question_count = widget.topic().map_or(0, |t| t.len());
    anyhow::ensure!(
        answers.len() <= question_count,
        "{} answers given but topic {} has {} questions",
        answers.len(),
        args.topic,
        question_count
    );

    for (question, option) in answers.iter().enumerate() {
        if let Some(option) = option {
            widget
                .select(question, *option)
                .with_context(|| format!("cannot select answer for question {}", question + 1))?;
        }
    }

    let outcome = widget.submit();

    match args.output.as_deref() {
        Some(path) => {
            widget.surface().write_to(path)?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            if let Some(doc) = widget.surface().document() {
                println!("{doc}");
            }
        }
    }

    match outcome {
        SubmitOutcome::Graded(grade) => {
            let (Some(topic), Some(attempt)) = (widget.topic(), widget.attempt()) else {
                anyhow::bail!("graded attempt has no session");
            };
            let report = GradeReport::new(topic, widget.locale(), attempt, &grade);

            if let Some(path) = args.report.as_deref() {
                save_report(&report, path)?;
            }
            if args.save {
                let name = format!(
                    "{}-{}.json",
                    report.topic_id,
                    report.graded_at.format("%Y%m%d-%H%M%S")
                );
                save_report(&report, &args.output_dir.join(name))?;
            }
        }
        SubmitOutcome::Incomplete { unanswered } => {
            eprintln!(
                "Not graded: {} question(s) unanswered ({})",
                unanswered.len(),
                unanswered
                    .iter()
                    .map(|i| (i + 1).to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        SubmitOutcome::Inert => {}
    }

    Ok(())
}

fn save_report(report: &GradeReport, path: &Path) -> Result<()> {
    report.save_json(path)?;
    eprintln!("Grade report: {}", path.display());
    Ok(())
}
