//! The quiz widget.
//!
//! Owns the single session (topic, attempt, phase) for its mount point and
//! drives it through `Answering → Graded`. Every operation runs to completion
//! and finishes by pushing a freshly computed view to the surface.

use std::sync::Arc;

use crate::attempt::Attempt;
use crate::error::QuizError;
use crate::grading::{grade, Grade};
use crate::locale::LocaleSignal;
use crate::model::{Locale, QuestionBank, Topic};
use crate::traits::{ResetHook, RetryAction, Surface};
use crate::view::{compute_view, Phase, QuizView};

/// Result of pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Some questions have no selection; they are now flagged.
    Incomplete { unanswered: Vec<usize> },
    /// The attempt was graded.
    Graded(Grade),
    /// Nothing to do: no topic loaded, or already graded.
    Inert,
}

#[derive(Debug)]
struct Session {
    /// Index into the bank's topics.
    topic: usize,
    attempt: Attempt,
    phase: Phase,
}

/// A mounted quiz widget.
pub struct QuizWidget<S: Surface> {
    bank: Arc<QuestionBank>,
    surface: S,
    signal: LocaleSignal,
    locale: Locale,
    reset_hook: Option<Box<dyn ResetHook>>,
    session: Option<Session>,
}

impl<S: Surface> QuizWidget<S> {
    /// Mount the widget on `surface`.
    ///
    /// Returns `None` when the page has no quiz container: the widget is
    /// then simply not present and nothing is initialized.
    pub fn mount(bank: Arc<QuestionBank>, surface: Option<S>, signal: LocaleSignal) -> Option<Self> {
        let Some(surface) = surface else {
            tracing::debug!("no quiz container on this page; widget not mounted");
            return None;
        };

        let locale = signal.current();
        tracing::debug!(%locale, topics = bank.topics.len(), "quiz widget mounted");

        Some(Self {
            bank,
            surface,
            signal,
            locale,
            reset_hook: None,
            session: None,
        })
    }

    /// Install the page's "hide quiz" collaborator used by retry.
    pub fn with_reset_hook(mut self, hook: impl ResetHook + 'static) -> Self {
        self.reset_hook = Some(Box::new(hook));
        self
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// The locale the widget last rendered with.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The loaded topic, if any.
    pub fn topic(&self) -> Option<&Topic> {
        self.session.as_ref().map(|s| &self.bank.topics[s.topic])
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.session.as_ref().map(|s| &s.attempt)
    }

    pub fn phase(&self) -> Option<&Phase> {
        self.session.as_ref().map(|s| &s.phase)
    }

    pub fn is_graded(&self) -> bool {
        self.phase().is_some_and(Phase::is_graded)
    }

    /// The view for the current session, if a topic is loaded.
    pub fn view(&self) -> Option<QuizView> {
        let session = self.session.as_ref()?;
        let topic = &self.bank.topics[session.topic];
        Some(compute_view(topic, self.locale, &session.attempt, &session.phase))
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Page entry point: load a topic by id.
    ///
    /// Unknown ids are logged and otherwise ignored; whatever is rendered
    /// stays as it is.
    pub fn load_topic(&mut self, topic_id: &str) {
        if let Err(e) = self.try_load_topic(topic_id) {
            tracing::warn!(topic = topic_id, "cannot load quiz topic: {e}");
        }
    }

    /// Load a topic, reporting an unknown id to the caller.
    pub fn try_load_topic(&mut self, topic_id: &str) -> Result<(), QuizError> {
        let index = self
            .bank
            .topics
            .iter()
            .position(|t| t.id == topic_id)
            .ok_or_else(|| QuizError::UnknownTopic(topic_id.to_string()))?;

        // Render in whatever the document says now; a pending change is
        // consumed here rather than triggering a second render.
        if let Some(locale) = self.signal.take_change() {
            self.locale = locale;
        }

        self.start_session(index);
        self.render();
        Ok(())
    }

    /// Pick `option` for `question` (both zero-based).
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        self.sync_locale();

        let session = self.session.as_mut().ok_or(QuizError::NoTopicLoaded)?;
        if session.phase.is_graded() {
            return Err(QuizError::AlreadyGraded);
        }

        let topic = &self.bank.topics[session.topic];
        session.attempt.select(topic, question, option)?;
        self.render();
        Ok(())
    }

    /// Validate and, when every question is answered, grade the attempt.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.sync_locale();

        let Some(session) = self.session.as_mut() else {
            tracing::debug!("submit ignored: no topic loaded");
            return SubmitOutcome::Inert;
        };
        if session.phase.is_graded() {
            tracing::debug!(attempt = %session.attempt.id(), "submit ignored: already graded");
            return SubmitOutcome::Inert;
        }

        let topic = &self.bank.topics[session.topic];
        let unanswered = session.attempt.unanswered();

        let outcome = if !unanswered.is_empty() {
            tracing::debug!(
                attempt = %session.attempt.id(),
                unanswered = unanswered.len(),
                "submit blocked by unanswered questions"
            );
            session.phase = Phase::Answering {
                flagged: unanswered.clone(),
            };
            SubmitOutcome::Incomplete { unanswered }
        } else {
            match grade(topic, &session.attempt) {
                Some(g) => {
                    tracing::info!(
                        topic = %topic.id,
                        attempt = %session.attempt.id(),
                        score = g.score,
                        total = g.total,
                        percent = g.percent,
                        "attempt graded"
                    );
                    session.phase = Phase::Graded(g.clone());
                    SubmitOutcome::Graded(g)
                }
                None => SubmitOutcome::Inert,
            }
        };

        self.render();
        outcome
    }

    /// The result block's retry action.
    ///
    /// Hands off to the page's reset hook when one is installed and reloads
    /// otherwise. Returns `None` when there is no graded attempt to retry.
    pub fn retry(&mut self) -> Option<RetryAction> {
        if !self.is_graded() {
            tracing::debug!("retry ignored: nothing graded");
            return None;
        }

        self.session = None;
        let action = match self.reset_hook.as_mut() {
            Some(hook) => {
                hook.reset();
                RetryAction::Reset
            }
            None => {
                self.reload();
                RetryAction::Reload
            }
        };
        tracing::debug!(?action, "quiz retried");
        Some(action)
    }

    /// Full reload: clear the surface, drop the session and re-read the locale.
    pub fn reload(&mut self) {
        self.session = None;
        self.surface.clear();
        self.signal.take_change();
        self.locale = self.signal.current();
    }

    /// React to a locale change notification.
    ///
    /// Re-renders the loaded topic in the new locale with a fresh attempt.
    /// Returns `true` when a change was observed.
    pub fn sync_locale(&mut self) -> bool {
        let Some(locale) = self.signal.take_change() else {
            return false;
        };
        if locale == self.locale {
            return false;
        }

        tracing::debug!(from = %self.locale, to = %locale, "locale changed");
        self.locale = locale;
        if let Some(index) = self.session.as_ref().map(|s| s.topic) {
            self.start_session(index);
            self.render();
        }
        true
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn start_session(&mut self, topic: usize) {
        let attempt = Attempt::new(&self.bank.topics[topic]);
        tracing::debug!(
            topic = %self.bank.topics[topic].id,
            attempt = %attempt.id(),
            locale = %self.locale,
            "new attempt"
        );
        self.session = Some(Session {
            topic,
            attempt,
            phase: Phase::fresh(),
        });
    }

    fn render(&mut self) {
        if let Some(view) = self.view() {
            self.surface.apply(&view);
        }
    }
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for QuizWidget<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizWidget")
            .field("bank", &self.bank.id)
            .field("surface", &self.surface)
            .field("locale", &self.locale)
            .field("reset_hook", &self.reset_hook.is_some())
            .field("session", &self.session)
            .finish()
    }
}
