//! Core data model types for quizwidget.
//!
//! A [`QuestionBank`] is an ordered list of topics, each an ordered list of
//! questions translated into every supported [`Locale`]. Banks are built once
//! (see [`crate::parser`]) and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// Supported display locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// All supported locales, in display order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

    /// ISO 639-1 code for this locale.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Text direction for content in this locale.
    pub fn direction(&self) -> Direction {
        match self {
            Locale::En => Direction::Ltr,
            Locale::Ar => Direction::Rtl,
        }
    }

    /// The other locale. Mirrors the page's two-state language toggle.
    pub fn toggled(&self) -> Locale {
        match self {
            Locale::En => Locale::Ar,
            Locale::Ar => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ar" | "arabic" => Ok(Locale::Ar),
            other => Err(QuizError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// Writing direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// A value per supported locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    pub en: T,
    pub ar: T,
}

impl<T> Localized<T> {
    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::Ar => &self.ar,
        }
    }

    /// `(locale, value)` pairs in [`Locale::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Locale, &T)> {
        Locale::ALL.into_iter().map(move |l| (l, self.get(l)))
    }
}

/// One question in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedQuestion {
    /// The question text.
    pub text: String,
    /// Option labels, in display order.
    pub options: Vec<String>,
    /// Zero-based index of the correct option.
    pub answer: usize,
}

impl LocalizedQuestion {
    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.answer)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// A question with one translation per supported locale.
///
/// Construction through [`crate::parser`] guarantees that the answer index
/// and option count agree across locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub translations: Localized<LocalizedQuestion>,
}

impl Question {
    pub fn localized(&self, locale: Locale) -> &LocalizedQuestion {
        self.translations.get(locale)
    }

    /// Index of the correct option. Identical in every locale.
    pub fn correct_index(&self) -> usize {
        self.translations.en.answer
    }

    /// Number of options. Identical in every locale.
    pub fn option_count(&self) -> usize {
        self.translations.en.options.len()
    }
}

/// A named, ordered set of questions on one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier (e.g. `quiz-basics`).
    pub id: String,
    /// Display title per locale.
    pub title: Localized<String>,
    pub questions: Vec<Question>,
}

impl Topic {
    pub fn title(&self, locale: Locale) -> &str {
        self.title.get(locale)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The immutable question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Bank identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Topics in display order.
    pub topics: Vec<Topic>,
}

impl QuestionBank {
    /// Look up a topic by id.
    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Topic ids in display order.
    pub fn topic_ids(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.id.as_str())
    }

    /// Total number of questions across all topics.
    pub fn question_count(&self) -> usize {
        self.topics.iter().map(Topic::len).sum()
    }
}
