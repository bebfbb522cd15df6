//! Widget chrome strings for every supported locale.
//!
//! Question text comes from the bank; this module only covers the labels
//! and feedback the widget itself produces. The catalog lives in
//! `locales/{en,ar}.yml` and is compiled in by `rust_i18n::i18n!` at the
//! crate root, with English as the fallback.

use rust_i18n::t;

use crate::grading::Tier;
use crate::model::Locale;

/// A widget string without placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    SubmitLabel,
    RetryLabel,
    Correct,
    NeedsAttention,
}

/// Look up a message in the given locale.
pub fn text(locale: Locale, msg: Message) -> String {
    let locale = locale.code();
    match msg {
        Message::SubmitLabel => t!("quiz.submit", locale = locale),
        Message::RetryLabel => t!("quiz.retry", locale = locale),
        Message::Correct => t!("quiz.correct", locale = locale),
        Message::NeedsAttention => t!("quiz.needs_attention", locale = locale),
    }
    .into_owned()
}

/// Feedback for a wrongly answered question.
pub fn incorrect_feedback(locale: Locale, correct_option: &str) -> String {
    t!("quiz.incorrect", locale = locale.code(), answer = correct_option).into_owned()
}

/// `You scored {score} out of {total}`.
pub fn headline(locale: Locale, score: usize, total: usize) -> String {
    t!(
        "quiz.headline",
        locale = locale.code(),
        score = score,
        total = total
    )
    .into_owned()
}

/// Summary shown while questions are still unanswered.
pub fn unanswered_summary(locale: Locale, count: usize) -> String {
    t!("quiz.unanswered", locale = locale.code(), count = count).into_owned()
}

/// The qualitative comment for a score tier.
pub fn comment(locale: Locale, tier: Tier) -> String {
    let locale = locale.code();
    match tier {
        Tier::Perfect => t!("quiz.comment.perfect", locale = locale),
        Tier::Strong => t!("quiz.comment.strong", locale = locale),
        Tier::Moderate => t!("quiz.comment.moderate", locale = locale),
        Tier::Retry => t!("quiz.comment.retry", locale = locale),
    }
    .into_owned()
}
