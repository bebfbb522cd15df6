//! Pure view model for the quiz widget.
//!
//! [`compute_view`] turns `(topic, locale, attempt, phase)` into a
//! [`QuizView`] without touching any presentation surface. Surfaces in
//! `quizwidget-render` only ever see the finished view.

use serde::{Deserialize, Serialize};

use crate::attempt::Attempt;
use crate::grading::{Grade, Tier};
use crate::i18n::{self, Message};
use crate::model::{Direction, Locale, Topic};

/// Where the displayed attempt is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Collecting answers. `flagged` holds the questions the last submit
    /// found unanswered (empty before the first submit).
    Answering { flagged: Vec<usize> },
    /// Terminal until the next topic load.
    Graded(Grade),
}

impl Phase {
    pub fn fresh() -> Self {
        Phase::Answering {
            flagged: Vec::new(),
        }
    }

    pub fn is_graded(&self) -> bool {
        matches!(self, Phase::Graded(_))
    }

    pub fn grade(&self) -> Option<&Grade> {
        match self {
            Phase::Graded(g) => Some(g),
            Phase::Answering { .. } => None,
        }
    }
}

/// Visual state of a question container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionState {
    Neutral,
    NeedsAttention,
    Correct,
    Incorrect,
}

impl QuestionState {
    /// CSS class used by markup surfaces.
    pub fn css_class(&self) -> &'static str {
        match self {
            QuestionState::Neutral => "neutral",
            QuestionState::NeedsAttention => "needs-attention",
            QuestionState::Correct => "correct",
            QuestionState::Incorrect => "incorrect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub index: usize,
    /// 1-based number shown before the text.
    pub ordinal: usize,
    /// Name shared by this question's exclusive controls (`q{index}`).
    pub group: String,
    pub text: String,
    pub options: Vec<OptionView>,
    pub state: QuestionState,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitView {
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultView {
    pub percent: u32,
    pub score: usize,
    pub total: usize,
    pub fraction: String,
    pub headline: String,
    pub comment: String,
    pub tier: Tier,
    pub retry_label: String,
}

/// Everything a surface needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizView {
    pub topic_id: String,
    pub title: String,
    pub locale: Locale,
    pub direction: Direction,
    pub questions: Vec<QuestionView>,
    /// Validation notice after an incomplete submit.
    pub notice: Option<String>,
    pub submit: SubmitView,
    pub result: Option<ResultView>,
    /// Question the surface should bring into view.
    pub scroll_to: Option<usize>,
}

impl QuizView {
    pub fn flagged(&self) -> Vec<usize> {
        self.questions
            .iter()
            .filter(|q| q.state == QuestionState::NeedsAttention)
            .map(|q| q.index)
            .collect()
    }
}

/// Group name for a question's exclusive controls.
pub fn group_name(index: usize) -> String {
    format!("q{index}")
}

/// Compute the view for a topic in `locale`.
pub fn compute_view(topic: &Topic, locale: Locale, attempt: &Attempt, phase: &Phase) -> QuizView {
    let grade = phase.grade();
    let flagged: &[usize] = match phase {
        Phase::Answering { flagged } => flagged,
        Phase::Graded(_) => &[],
    };

    let questions = topic
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let lq = question.localized(locale);
            let selected = attempt.selection(index);

            let (state, feedback) = match grade.and_then(|g| g.result(index)) {
                Some(r) if r.is_correct => (
                    QuestionState::Correct,
                    Some(i18n::text(locale, Message::Correct)),
                ),
                Some(_) => (
                    QuestionState::Incorrect,
                    Some(i18n::incorrect_feedback(locale, lq.correct_option())),
                ),
                None if flagged.contains(&index) => (
                    QuestionState::NeedsAttention,
                    Some(i18n::text(locale, Message::NeedsAttention)),
                ),
                None => (QuestionState::Neutral, None),
            };

            QuestionView {
                index,
                ordinal: index + 1,
                group: group_name(index),
                text: lq.text.clone(),
                options: lq
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, label)| OptionView {
                        index: i,
                        label: label.clone(),
                        selected: selected == Some(i),
                    })
                    .collect(),
                state,
                feedback,
            }
        })
        .collect();

    let result = grade.map(|g| ResultView {
        percent: g.percent,
        score: g.score,
        total: g.total,
        fraction: g.fraction(),
        headline: i18n::headline(locale, g.score, g.total),
        comment: i18n::comment(locale, g.tier),
        tier: g.tier,
        retry_label: i18n::text(locale, Message::RetryLabel),
    });

    QuizView {
        topic_id: topic.id.clone(),
        title: topic.title(locale).to_string(),
        locale,
        direction: locale.direction(),
        questions,
        notice: (!flagged.is_empty()).then(|| i18n::unanswered_summary(locale, flagged.len())),
        submit: SubmitView {
            label: i18n::text(locale, Message::SubmitLabel),
            enabled: grade.is_none(),
        },
        result,
        scroll_to: flagged.iter().min().copied(),
    }
}
