//! HTML surface.
//!
//! Produces a self-contained HTML document with all CSS/JS inlined.

use quizwidget_core::traits::Surface;
use quizwidget_core::view::{QuestionView, QuizView, ResultView};

use crate::Document;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Element id of a question's container.
pub fn question_anchor(index: usize) -> String {
    format!("question-{index}")
}

/// Generate an HTML document for a quiz view.
pub fn generate_html(view: &QuizView) -> String {
    let mut html = String::new();
    let graded = view.result.is_some();

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"{}\" dir=\"{}\">\n<head>\n",
        view.locale.code(),
        view.direction.as_str()
    ));
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(&view.title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "<section class=\"quiz-container\" id=\"quiz-container\" data-topic=\"{}\"",
        html_escape(&view.topic_id)
    ));
    if let Some(target) = view.scroll_to {
        html.push_str(&format!(" data-scroll-to=\"{}\"", question_anchor(target)));
    }
    html.push_str(">\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&view.title)));

    html.push_str("<form class=\"quiz-form\" onsubmit=\"return false\">\n");
    for question in &view.questions {
        push_question(&mut html, question, graded);
    }

    if let Some(notice) = &view.notice {
        html.push_str(&format!(
            "<p class=\"notice\" role=\"alert\">{}</p>\n",
            html_escape(notice)
        ));
    }

    html.push_str(&format!(
        "<button type=\"submit\" class=\"submit-quiz\"{}>{}</button>\n",
        if view.submit.enabled { "" } else { " disabled" },
        html_escape(&view.submit.label)
    ));
    html.push_str("</form>\n");

    if let Some(result) = &view.result {
        push_result(&mut html, result);
    }

    html.push_str("</section>\n");

    if view.scroll_to.is_some() {
        html.push_str("<script>\n");
        html.push_str(JS);
        html.push_str("</script>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

fn push_question(html: &mut String, q: &QuestionView, graded: bool) {
    html.push_str(&format!(
        "<fieldset class=\"question {}\" id=\"{}\">\n",
        q.state.css_class(),
        question_anchor(q.index)
    ));
    html.push_str(&format!(
        "<legend>{}. {}</legend>\n",
        q.ordinal,
        html_escape(&q.text)
    ));

    for option in &q.options {
        html.push_str(&format!(
            "<label class=\"option\"><input type=\"radio\" name=\"{}\" value=\"{}\"{}{}> {}</label>\n",
            html_escape(&q.group),
            option.index,
            if option.selected { " checked" } else { "" },
            if graded { " disabled" } else { "" },
            html_escape(&option.label)
        ));
    }

    if let Some(feedback) = &q.feedback {
        html.push_str(&format!(
            "<p class=\"feedback\">{}</p>\n",
            html_escape(feedback)
        ));
    }
    html.push_str("</fieldset>\n");
}

fn push_result(html: &mut String, result: &ResultView) {
    html.push_str(&format!(
        "<div class=\"quiz-result tier-{}\">\n",
        result.tier.as_str()
    ));
    html.push_str(&format!(
        "<p class=\"percent\">{}%</p>\n<p class=\"fraction\">{}</p>\n",
        result.percent,
        html_escape(&result.fraction)
    ));
    html.push_str(&format!(
        "<p class=\"headline\">{}</p>\n<p class=\"comment\">{}</p>\n",
        html_escape(&result.headline),
        html_escape(&result.comment)
    ));
    html.push_str(&format!(
        "<button type=\"button\" class=\"retry-quiz\">{}</button>\n",
        html_escape(&result.retry_label)
    ));
    html.push_str("</div>\n");
}

/// Renders every applied view into an HTML document.
#[derive(Debug, Default)]
pub struct HtmlSurface {
    document: Option<String>,
    renders: u64,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for HtmlSurface {
    fn apply(&mut self, view: &QuizView) {
        self.document = Some(generate_html(view));
        self.renders += 1;
        tracing::trace!(topic = %view.topic_id, renders = self.renders, "html surface updated");
    }

    fn clear(&mut self) {
        self.document = None;
    }
}

impl Document for HtmlSurface {
    fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    fn renders(&self) -> u64 {
        self.renders
    }
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --warn: #fef3c7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --warn: #78350f; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Naskh Arabic', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1 { margin-top: 0; }
fieldset.question { border: 1px solid var(--border); border-radius: 8px; margin: 1rem 0; padding: 1rem; }
legend { font-weight: bold; padding: 0 0.5rem; }
label.option { display: block; margin: 0.25rem 0; cursor: pointer; }
.needs-attention { background: var(--warn); }
.correct { background: var(--pass); }
.incorrect { background: var(--fail); }
.feedback { margin: 0.5rem 0 0; font-style: italic; }
.notice { font-weight: bold; }
button { padding: 0.5rem 1.5rem; border-radius: 6px; border: 1px solid var(--border); cursor: pointer; }
button:disabled { opacity: 0.5; cursor: not-allowed; }
.quiz-result { margin-top: 2rem; padding: 1rem; border: 1px solid var(--border); border-radius: 8px; text-align: center; }
.quiz-result .percent { font-size: 2.5rem; font-weight: bold; margin: 0; }
"#;

const JS: &str = r#"
(function () {
  const container = document.getElementById('quiz-container');
  const target = container && document.getElementById(container.dataset.scrollTo);
  if (target) target.scrollIntoView({ behavior: 'smooth', block: 'center' });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizwidget_core::attempt::Attempt;
    use quizwidget_core::grading::grade;
    use quizwidget_core::mock::topic_with_answers;
    use quizwidget_core::model::{Locale, Topic};
    use quizwidget_core::view::{compute_view, Phase};

    fn answered(topic: &Topic, picks: &[usize]) -> Attempt {
        let mut attempt = Attempt::new(topic);
        for (q, &o) in picks.iter().enumerate() {
            attempt.select(topic, q, o).unwrap();
        }
        attempt
    }

    #[test]
    fn html_contains_required_elements() {
        let topic = topic_with_answers("quiz-h", &[1, 2, 0]);
        let view = compute_view(&topic, Locale::En, &Attempt::new(&topic), &Phase::fresh());
        let html = generate_html(&view);

        assert!(html.contains("<html lang=\"en\" dir=\"ltr\">"));
        assert!(html.contains("</html>"));
        assert_eq!(html.matches("<fieldset").count(), 3);
        assert_eq!(html.matches("name=\"q1\"").count(), 3);
        assert!(html.contains("Submit Answers"));
        assert!(!html.contains(" disabled"));
        assert!(!html.contains("quiz-result"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn arabic_is_right_to_left() {
        let topic = topic_with_answers("quiz-h", &[0]);
        let view = compute_view(&topic, Locale::Ar, &Attempt::new(&topic), &Phase::fresh());
        let html = generate_html(&view);
        assert!(html.contains("<html lang=\"ar\" dir=\"rtl\">"));
        assert!(html.contains("إرسال الإجابات"));
    }

    #[test]
    fn flagged_questions_get_class_and_scroll_anchor() {
        let topic = topic_with_answers("quiz-h", &[1, 2, 0]);
        let attempt = answered(&topic, &[1]);
        let phase = Phase::Answering {
            flagged: vec![1, 2],
        };
        let html = generate_html(&compute_view(&topic, Locale::En, &attempt, &phase));

        assert_eq!(html.matches("class=\"question needs-attention\"").count(), 2);
        assert!(html.contains("data-scroll-to=\"question-1\""));
        assert!(html.contains("scrollIntoView"));
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("value=\"1\" checked"));
    }

    #[test]
    fn graded_view_shows_result_and_disables_submit() {
        let topic = topic_with_answers("quiz-h", &[1, 2, 0]);
        let attempt = answered(&topic, &[1, 0, 0]);
        let g = grade(&topic, &attempt).unwrap();
        let html = generate_html(&compute_view(&topic, Locale::En, &attempt, &Phase::Graded(g)));

        assert!(html.contains("class=\"submit-quiz\" disabled"));
        assert!(html.contains("class=\"quiz-result tier-moderate\""));
        assert!(html.contains("<p class=\"percent\">67%</p>"));
        assert_eq!(html.matches("class=\"question correct\"").count(), 2);
        assert_eq!(html.matches("class=\"question incorrect\"").count(), 1);
        assert!(html.contains("Try Again"));
    }

    #[test]
    fn bank_text_is_escaped() {
        let mut topic = topic_with_answers("quiz-h", &[0]);
        topic.questions[0].translations.en.text = "Is <?php echo \"x\"; ?> valid?".into();
        topic.questions[0].translations.en.options[0] = "a & b".into();
        let html = generate_html(&compute_view(
            &topic,
            Locale::En,
            &Attempt::new(&topic),
            &Phase::fresh(),
        ));

        assert!(html.contains("Is &lt;?php echo &quot;x&quot;; ?&gt; valid?"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("<?php"));
    }

    #[test]
    fn surface_writes_to_file() {
        let topic = topic_with_answers("quiz-h", &[0, 1]);
        let view = compute_view(&topic, Locale::En, &Attempt::new(&topic), &Phase::fresh());
        let mut surface = HtmlSurface::new();
        surface.apply(&view);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("quiz.html");
        surface.write_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
