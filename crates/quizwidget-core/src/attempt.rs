//! The transient set of selections for the displayed topic.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::Topic;

/// Selected option per question. Lives only as long as one topic render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    id: Uuid,
    selections: Vec<Option<usize>>,
}

impl Attempt {
    /// A fresh attempt with nothing selected.
    pub fn new(topic: &Topic) -> Self {
        Self {
            id: Uuid::new_v4(),
            selections: vec![None; topic.len()],
        }
    }

    /// Diagnostic identifier; never shown to the user.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Select `option` for `question`, replacing any earlier choice.
    pub fn select(&mut self, topic: &Topic, question: usize, option: usize) -> Result<(), QuizError> {
        let count = self.selections.len();
        let q = topic
            .questions
            .get(question)
            .filter(|_| question < count)
            .ok_or(QuizError::QuestionOutOfRange {
                index: question,
                count,
            })?;

        if option >= q.option_count() {
            return Err(QuizError::OptionOutOfRange {
                question,
                option,
                count: q.option_count(),
            });
        }

        self.selections[question] = Some(option);
        Ok(())
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(question).copied().flatten()
    }

    pub fn selections(&self) -> &[Option<usize>] {
        &self.selections
    }

    /// Indices of questions without a selection, in order.
    pub fn unanswered(&self) -> Vec<usize> {
        self.selections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.selections.iter().all(Option::is_some)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
