//! Widget error types.
//!
//! None of these are fatal to the page hosting the widget. The topic-load
//! entry point logs them; the fallible variants hand them to callers that
//! want to react (the CLI prints them and keeps reading commands).

use thiserror::Error;

/// Errors produced by widget operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The requested topic id is not in the bank.
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    /// An operation needs a loaded topic but none is rendered.
    #[error("no topic is loaded")]
    NoTopicLoaded,

    /// The question index is outside the loaded topic.
    #[error("question {index} is out of range (topic has {count} questions)")]
    QuestionOutOfRange { index: usize, count: usize },

    /// The option index is outside the question's options.
    #[error("option {option} is out of range for question {question} ({count} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        count: usize,
    },

    /// A locale code outside `en` and `ar`.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// The attempt has been graded; its controls are inert until a new load.
    #[error("the attempt is already graded")]
    AlreadyGraded,
}

impl QuizError {
    /// Returns `true` for errors caused by stale UI state rather than bad input.
    ///
    /// A click on a control that was disabled by grading is stale; an option
    /// index that never existed is not.
    pub fn is_stale(&self) -> bool {
        matches!(self, QuizError::AlreadyGraded | QuizError::NoTopicLoaded)
    }
}
