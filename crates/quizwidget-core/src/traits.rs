//! Seams between the widget and its host page.
//!
//! The widget draws through a [`Surface`] and, on retry, may hand control
//! to a [`ResetHook`] owned by the page. Implementations live in
//! `quizwidget-render` and in the CLI; [`crate::mock`] has recording ones
//! for tests.

use crate::view::QuizView;

// ---------------------------------------------------------------------------
// Presentation surface
// ---------------------------------------------------------------------------

/// Where the widget renders. Stands in for the page's quiz container.
pub trait Surface {
    /// Replace whatever is shown with `view`, including its scroll target.
    fn apply(&mut self, view: &QuizView);

    /// Remove the widget's content entirely (page reload).
    fn clear(&mut self);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn apply(&mut self, view: &QuizView) {
        (**self).apply(view)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn apply(&mut self, view: &QuizView) {
        (**self).apply(view)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}

// ---------------------------------------------------------------------------
// Reset collaborator
// ---------------------------------------------------------------------------

/// The page's "hide quiz" function, invoked by the retry action.
pub trait ResetHook {
    fn reset(&mut self);
}

impl<F: FnMut()> ResetHook for F {
    fn reset(&mut self) {
        self()
    }
}

/// How a retry was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// The page's reset hook handled it.
    Reset,
    /// No hook installed; the widget fell back to a full reload.
    Reload,
}
