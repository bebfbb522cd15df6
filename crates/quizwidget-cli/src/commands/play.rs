//! The `quizwidget play` command: an interactive session on stdin.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use quizwidget_core::locale::{self, LocaleSwitch};
use quizwidget_core::model::{Locale, QuestionBank};
use quizwidget_core::traits::RetryAction;
use quizwidget_core::widget::{QuizWidget, SubmitOutcome};
use quizwidget_render::{Document, TextSurface};

const HELP: &str = "\
Commands:
  load <topic>          show a topic
  pick <question> <n>   choose option n for a question (both from 1)
  submit                check and grade your answers
  lang                  switch between English and Arabic
  retry                 start over after grading
  show                  print the quiz again
  topics                list topic ids
  help                  this message
  quit                  leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Load(String),
    /// Zero-based indices.
    Pick { question: usize, option: usize },
    Submit,
    Lang,
    Retry,
    Show,
    Topics,
    Help,
    Quit,
}

fn ordinal(word: Option<&str>, what: &str) -> Result<usize, String> {
    let word = word.ok_or_else(|| format!("missing {what} number"))?;
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("invalid {what} number: {word}")),
    }
}

/// Parse a command line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<PlayCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "load" => PlayCommand::Load(
            words
                .next()
                .ok_or_else(|| "usage: load <topic>".to_string())?
                .to_string(),
        ),
        "pick" => PlayCommand::Pick {
            question: ordinal(words.next(), "question")?,
            option: ordinal(words.next(), "option")?,
        },
        "submit" => PlayCommand::Submit,
        "lang" => PlayCommand::Lang,
        "retry" => PlayCommand::Retry,
        "show" => PlayCommand::Show,
        "topics" => PlayCommand::Topics,
        "help" | "?" => PlayCommand::Help,
        "quit" | "exit" | "q" => PlayCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

pub async fn execute(bank: Arc<QuestionBank>, topic: Option<String>, locale: Locale) -> Result<()> {
    let (switch, signal) = locale::channel(locale);
    let mut widget = QuizWidget::mount(bank, Some(TextSurface::new()), signal)
        .context("quiz widget did not mount")?;
    let mut shown = 0u64;

    println!("Type `help` for commands.");
    if let Some(topic) = topic {
        widget.load_topic(&topic);
        if widget.topic().is_none() {
            println!("No such topic: {topic}");
        }
    }
    shown = show_if_changed(&widget, shown);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        if command == PlayCommand::Quit {
            break;
        }
        dispatch(&mut widget, &switch, command);
        shown = show_if_changed(&widget, shown);
    }

    Ok(())
}

fn dispatch(widget: &mut QuizWidget<TextSurface>, switch: &LocaleSwitch, command: PlayCommand) {
    match command {
        PlayCommand::Load(topic) => {
            if let Err(e) = widget.try_load_topic(&topic) {
                println!("{e}");
            }
        }
        PlayCommand::Pick { question, option } => match widget.select(question, option) {
            Ok(()) => {}
            Err(e) if e.is_stale() => println!("{e}. {}", stale_hint(widget)),
            Err(e) => println!("{e}"),
        },
        PlayCommand::Submit => match widget.submit() {
            SubmitOutcome::Incomplete { unanswered } => {
                println!("{} question(s) still unanswered.", unanswered.len());
            }
            SubmitOutcome::Graded(_) => {}
            SubmitOutcome::Inert => {
                if widget.topic().is_none() {
                    println!("No topic loaded. Use `load <topic>`.");
                } else {
                    println!("Already graded. Use `retry` to start over.");
                }
            }
        },
        PlayCommand::Lang => {
            let locale = switch.toggle();
            widget.sync_locale();
            println!("Language: {locale}");
        }
        PlayCommand::Retry => match widget.retry() {
            Some(RetryAction::Reload | RetryAction::Reset) => {
                println!("Quiz reset. Use `load <topic>` to start again.");
            }
            None => println!("Nothing to retry yet."),
        },
        PlayCommand::Show => match widget.surface().document() {
            Some(doc) => println!("{doc}"),
            None => println!("No topic loaded. Use `load <topic>`."),
        },
        PlayCommand::Topics => {
            for id in widget.bank().topic_ids() {
                println!("  {id}");
            }
        }
        PlayCommand::Help => println!("{HELP}"),
        PlayCommand::Quit => {}
    }
}

/// What to do when a command hits a control that is not live.
fn stale_hint(widget: &QuizWidget<TextSurface>) -> &'static str {
    if widget.is_graded() {
        "Use `retry` to start over."
    } else {
        "Use `load <topic>` first."
    }
}

/// Print the surface when it rendered since the last call.
fn show_if_changed(widget: &QuizWidget<TextSurface>, shown: u64) -> u64 {
    let surface = widget.surface();
    if surface.renders() > shown {
        if let Some(doc) = surface.document() {
            println!("{doc}");
        }
    }
    surface.renders()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!(
            parse_command("load quiz-basics"),
            Ok(Some(PlayCommand::Load("quiz-basics".into())))
        );
        assert_eq!(
            parse_command("  PICK 2 3 "),
            Ok(Some(PlayCommand::Pick {
                question: 1,
                option: 2
            }))
        );
        assert_eq!(parse_command("submit"), Ok(Some(PlayCommand::Submit)));
        assert_eq!(parse_command("lang"), Ok(Some(PlayCommand::Lang)));
        assert_eq!(parse_command("retry"), Ok(Some(PlayCommand::Retry)));
        assert_eq!(parse_command("show"), Ok(Some(PlayCommand::Show)));
        assert_eq!(parse_command("topics"), Ok(Some(PlayCommand::Topics)));
        assert_eq!(parse_command("?"), Ok(Some(PlayCommand::Help)));
        assert_eq!(parse_command("exit"), Ok(Some(PlayCommand::Quit)));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("load").is_err());
        assert!(parse_command("pick 1").is_err());
        assert!(parse_command("pick 0 1").is_err());
        assert!(parse_command("pick one two").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn stale_picks_get_a_hint() {
        let bank = Arc::new(quizwidget_core::parser::builtin_bank().unwrap());
        let (switch, signal) = locale::channel(Locale::En);
        let mut widget = QuizWidget::mount(bank, Some(TextSurface::new()), signal).unwrap();
        assert_eq!(stale_hint(&widget), "Use `load <topic>` first.");

        dispatch(&mut widget, &switch, PlayCommand::Load("quiz-basics".into()));
        for (question, option) in [(0, 0), (1, 0), (2, 0)] {
            dispatch(&mut widget, &switch, PlayCommand::Pick { question, option });
        }
        dispatch(&mut widget, &switch, PlayCommand::Submit);
        assert!(widget.select(0, 1).unwrap_err().is_stale());
        assert_eq!(stale_hint(&widget), "Use `retry` to start over.");
    }

    #[test]
    fn dispatch_drives_widget() {
        let bank = Arc::new(quizwidget_core::parser::builtin_bank().unwrap());
        let (switch, signal) = locale::channel(Locale::En);
        let mut widget = QuizWidget::mount(bank, Some(TextSurface::new()), signal).unwrap();

        dispatch(&mut widget, &switch, PlayCommand::Load("quiz-basics".into()));
        for (question, option) in [(0, 1), (1, 2), (2, 0)] {
            dispatch(&mut widget, &switch, PlayCommand::Pick { question, option });
        }
        dispatch(&mut widget, &switch, PlayCommand::Submit);
        assert!(widget.is_graded());
        assert!(widget.surface().document().unwrap().contains("100% (3/3)"));

        dispatch(&mut widget, &switch, PlayCommand::Lang);
        assert_eq!(widget.locale(), Locale::Ar);
        assert!(!widget.is_graded());

        dispatch(&mut widget, &switch, PlayCommand::Retry);
        assert!(widget.topic().is_some());
    }
}
