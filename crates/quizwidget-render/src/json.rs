//! JSON surface: the view model serialized as-is.

use anyhow::{Context, Result};

use quizwidget_core::traits::Surface;
use quizwidget_core::view::QuizView;

use crate::Document;

/// Serialize a view as pretty-printed JSON.
pub fn generate_json(view: &QuizView) -> Result<String> {
    serde_json::to_string_pretty(view).context("failed to serialize quiz view")
}

/// Keeps the latest view as JSON.
#[derive(Debug, Default)]
pub struct JsonSurface {
    document: Option<String>,
    renders: u64,
}

impl JsonSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for JsonSurface {
    fn apply(&mut self, view: &QuizView) {
        match generate_json(view) {
            Ok(json) => {
                self.document = Some(json);
                self.renders += 1;
            }
            Err(e) => tracing::warn!(topic = %view.topic_id, "json surface not updated: {e:#}"),
        }
    }

    fn clear(&mut self) {
        self.document = None;
    }
}

impl Document for JsonSurface {
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
    use quizwidget_core::mock::topic_with_answers;
    use quizwidget_core::model::Locale;
    use quizwidget_core::view::{compute_view, Phase};

    fn view() -> QuizView {
        let topic = topic_with_answers("quiz-j", &[1, 0]);
        let attempt = Attempt::new(&topic);
        compute_view(
            &topic,
            Locale::Ar,
            &attempt,
            &Phase::Answering { flagged: vec![0] },
        )
    }

    #[test]
    fn json_carries_view_fields() {
        let json = generate_json(&view()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["topic_id"], "quiz-j");
        assert_eq!(value["locale"], "ar");
        assert_eq!(value["direction"], "rtl");
        assert_eq!(value["questions"][0]["state"], "needs-attention");
        assert_eq!(value["questions"][0]["group"], "q0");
        assert_eq!(value["scroll_to"], 0);
        assert!(value["result"].is_null());
    }

    #[test]
    fn write_and_parse_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        let mut surface = JsonSurface::new();
        surface.apply(&view());
        surface.write_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: QuizView = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, view());
    }
}
