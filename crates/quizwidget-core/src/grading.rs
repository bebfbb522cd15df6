//! Scoring of a completed attempt.
//!
//! All thresholds are evaluated with integer arithmetic so that e.g. 4/5 is
//! exactly on the 80% boundary rather than a float rounding away from it.

use serde::{Deserialize, Serialize};

use crate::attempt::Attempt;
use crate::model::Topic;

/// Qualitative band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Every question correct.
    Perfect,
    /// At least 80%.
    Strong,
    /// At least 50%.
    Moderate,
    /// Below 50%.
    Retry,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Perfect => "perfect",
            Tier::Strong => "strong",
            Tier::Moderate => "moderate",
            Tier::Retry => "retry",
        }
    }

    pub fn for_score(score: usize, total: usize) -> Tier {
        if score == total {
            Tier::Perfect
        } else if score * 5 >= total * 4 {
            Tier::Strong
        } else if score * 2 >= total {
            Tier::Moderate
        } else {
            Tier::Retry
        }
    }
}

/// `round(100 * score / total)` with halves rounded up. Zero when `total` is zero.
pub fn percent(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * score + total) / (2 * total)) as u32
}

/// Outcome for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    /// Zero-based question index.
    pub index: usize,
    /// The option the user picked.
    pub selected: usize,
    /// The correct option.
    pub correct: usize,
    pub is_correct: bool,
}

/// A graded attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub results: Vec<QuestionResult>,
    pub score: usize,
    pub total: usize,
    pub percent: u32,
    pub tier: Tier,
}

impl Grade {
    /// `score/total`, as displayed next to the percentage.
    pub fn fraction(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }

    pub fn result(&self, index: usize) -> Option<&QuestionResult> {
        self.results.get(index)
    }
}

/// Grade `attempt` against `topic`. Returns `None` while any question is unanswered.
pub fn grade(topic: &Topic, attempt: &Attempt) -> Option<Grade> {
    if !attempt.is_complete() || attempt.len() != topic.len() {
        return None;
    }

    let results: Vec<QuestionResult> = topic
        .questions
        .iter()
        .zip(attempt.selections())
        .enumerate()
        .map(|(index, (question, selected))| {
            let selected = selected.unwrap_or_default();
            let correct = question.correct_index();
            QuestionResult {
                index,
                selected,
                correct,
                is_correct: selected == correct,
            }
        })
        .collect();

    let score = results.iter().filter(|r| r.is_correct).count();
    let total = results.len();

    Some(Grade {
        results,
        score,
        total,
        percent: percent(score, total),
        tier: Tier::for_score(score, total),
    })
}
