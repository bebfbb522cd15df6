//! quizwidget-core: quiz model and widget state machine.
//!
//! This crate defines the bilingual data model, the pure view computation,
//! and the [`widget::QuizWidget`] that drives a single quiz session. Drawing
//! is left to implementations of [`traits::Surface`].

rust_i18n::i18n!("locales", fallback = "en");

pub mod attempt;
pub mod error;
pub mod grading;
pub mod i18n;
pub mod locale;
pub mod mock;
pub mod model;
pub mod parser;
pub mod report;
pub mod traits;
pub mod view;
pub mod widget;
