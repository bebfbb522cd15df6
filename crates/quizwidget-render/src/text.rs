//! Plain-text surface for terminals.

use std::fmt::Write as _;

use quizwidget_core::traits::Surface;
use quizwidget_core::view::{QuestionState, QuizView};

use crate::Document;

fn state_marker(state: QuestionState) -> &'static str {
    match state {
        QuestionState::Neutral => "",
        QuestionState::NeedsAttention => " [!]",
        QuestionState::Correct => " [ok]",
        QuestionState::Incorrect => " [x]",
    }
}

/// Render a view as plain text.
///
/// Options are numbered from 1 to match the interactive `pick` command.
/// The scroll target, if any, is marked with `>>`.
pub fn render_text(view: &QuizView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", view.title);
    for q in &view.questions {
        let pointer = if view.scroll_to == Some(q.index) { ">> " } else { "" };
        let _ = writeln!(out);
        let _ = writeln!(out, "{pointer}{}. {}{}", q.ordinal, q.text, state_marker(q.state));
        for option in &q.options {
            let mark = if option.selected { "(*)" } else { "( )" };
            let _ = writeln!(out, "   {mark} {}. {}", option.index + 1, option.label);
        }
        if let Some(feedback) = &q.feedback {
            let _ = writeln!(out, "   -> {feedback}");
        }
    }

    let _ = writeln!(out);
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "! {notice}");
    }
    let _ = writeln!(
        out,
        "[{}]{}",
        view.submit.label,
        if view.submit.enabled { "" } else { " (disabled)" }
    );

    if let Some(result) = &view.result {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}% ({})", result.percent, result.fraction);
        let _ = writeln!(out, "{}", result.headline);
        let _ = writeln!(out, "{}", result.comment);
        let _ = writeln!(out, "[{}]", result.retry_label);
    }

    out
}

/// Keeps the latest plain-text rendition.
#[derive(Debug, Default)]
pub struct TextSurface {
    document: Option<String>,
    renders: u64,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for TextSurface {
    fn apply(&mut self, view: &QuizView) {
        self.document = Some(render_text(view));
        self.renders += 1;
    }

    fn clear(&mut self) {
        self.document = None;
    }
}

impl Document for TextSurface {
    fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    fn renders(&self) -> u64 {
        self.renders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizwidget_core::attempt::Attempt;
    use quizwidget_core::grading::grade;
    use quizwidget_core::mock::topic_with_answers;
    use quizwidget_core::model::Locale;
    use quizwidget_core::view::{compute_view, Phase};

    #[test]
    fn fresh_view_lists_numbered_options() {
        let topic = topic_with_answers("quiz-t", &[0, 1]);
        let text = render_text(&compute_view(
            &topic,
            Locale::En,
            &Attempt::new(&topic),
            &Phase::fresh(),
        ));

        assert!(text.starts_with("== Topic quiz-t =="));
        assert!(text.contains("1. Question 1\n"));
        assert!(text.contains("   ( ) 3. Option 3\n"));
        assert!(text.contains("[Submit Answers]\n"));
        assert!(!text.contains("(*)"));
    }

    #[test]
    fn flagged_and_selected_markers() {
        let topic = topic_with_answers("quiz-t", &[0, 1]);
        let mut attempt = Attempt::new(&topic);
        attempt.select(&topic, 0, 2).unwrap();
        let phase = Phase::Answering { flagged: vec![1] };
        let text = render_text(&compute_view(&topic, Locale::En, &attempt, &phase));

        assert!(text.contains("   (*) 3. Option 3\n"));
        assert!(text.contains(">> 2. Question 2 [!]\n"));
        assert!(text.contains("! 1 question(s) still need an answer."));
    }

    #[test]
    fn graded_view_shows_result() {
        let topic = topic_with_answers("quiz-t", &[0, 1]);
        let mut attempt = Attempt::new(&topic);
        attempt.select(&topic, 0, 0).unwrap();
        attempt.select(&topic, 1, 0).unwrap();
        let g = grade(&topic, &attempt).unwrap();
        let text = render_text(&compute_view(&topic, Locale::En, &attempt, &Phase::Graded(g)));

        assert!(text.contains("1. Question 1 [ok]"));
        assert!(text.contains("2. Question 2 [x]"));
        assert!(text.contains("-> Incorrect. The correct answer is: Option 2"));
        assert!(text.contains("[Submit Answers] (disabled)"));
        assert!(text.contains("50% (1/2)"));
        assert!(text.contains("[Try Again]"));
    }

    #[test]
    fn surface_tracks_renders() {
        let topic = topic_with_answers("quiz-t", &[0]);
        let view = compute_view(&topic, Locale::Ar, &Attempt::new(&topic), &Phase::fresh());
        let mut surface = TextSurface::new();
        surface.apply(&view);
        surface.apply(&view);
        assert_eq!(surface.renders(), 2);
        assert!(surface.document().unwrap().contains("إرسال الإجابات"));
    }
}
