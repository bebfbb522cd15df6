//! Recording surface, reset hook and fixture builders for tests.

use std::cell::Cell;
use std::rc::Rc;

use crate::model::{Localized, LocalizedQuestion, Question, QuestionBank, Topic};
use crate::traits::{ResetHook, Surface};
use crate::view::QuizView;

/// Something the widget did to a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Applied(QuizView),
    Cleared,
}

/// A surface that remembers every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// The view currently displayed, if any.
    pub fn current(&self) -> Option<&QuizView> {
        match self.events.last() {
            Some(SurfaceEvent::Applied(view)) => Some(view),
            _ => None,
        }
    }

    /// Number of `apply` calls so far.
    pub fn apply_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Applied(_)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn apply(&mut self, view: &QuizView) {
        self.events.push(SurfaceEvent::Applied(view.clone()));
    }

    fn clear(&mut self) {
        self.events.push(SurfaceEvent::Cleared);
    }
}

/// A reset hook that counts invocations. Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct RecordingReset {
    calls: Rc<Cell<u32>>,
}

impl RecordingReset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl ResetHook for RecordingReset {
    fn reset(&mut self) {
        self.calls.set(self.calls.get() + 1);
    }
}

/// A topic whose question `i` has `answers[i]` as its correct option.
///
/// Each question gets `max(3, answer + 1)` options labelled
/// `Option {n}` / `الخيار {n}`.
pub fn topic_with_answers(id: &str, answers: &[usize]) -> Topic {
    let questions = answers
        .iter()
        .enumerate()
        .map(|(i, &answer)| {
            let count = (answer + 1).max(3);
            Question {
                translations: Localized {
                    en: LocalizedQuestion {
                        text: format!("Question {}", i + 1),
                        options: (1..=count).map(|n| format!("Option {n}")).collect(),
                        answer,
                    },
                    ar: LocalizedQuestion {
                        text: format!("السؤال {}", i + 1),
                        options: (1..=count).map(|n| format!("الخيار {n}")).collect(),
                        answer,
                    },
                },
            }
        })
        .collect();

    Topic {
        id: id.to_string(),
        title: Localized {
            en: format!("Topic {id}"),
            ar: format!("موضوع {id}"),
        },
        questions,
    }
}

/// A bank holding the given topics.
pub fn bank_with_topics(topics: Vec<Topic>) -> QuestionBank {
    QuestionBank {
        id: "mock-bank".into(),
        name: "Mock Bank".into(),
        topics,
    }
}
