//! Locale signal shared between the page and the widget.
//!
//! The page owns the [`LocaleSwitch`] (its language toggle); the widget only
//! holds a [`LocaleSignal`] and reacts when it observes a change.

use tokio::sync::watch;

use crate::model::Locale;

/// Publishing side of the document locale.
#[derive(Debug)]
pub struct LocaleSwitch {
    tx: watch::Sender<Locale>,
}

/// Subscribing side of the document locale.
#[derive(Debug, Clone)]
pub struct LocaleSignal {
    rx: watch::Receiver<Locale>,
}

/// Create a linked switch/signal pair starting at `initial`.
pub fn channel(initial: Locale) -> (LocaleSwitch, LocaleSignal) {
    let (tx, rx) = watch::channel(initial);
    (LocaleSwitch { tx }, LocaleSignal { rx })
}

impl LocaleSwitch {
    pub fn current(&self) -> Locale {
        *self.tx.borrow()
    }

    /// Set the locale. Subscribers are only notified when it actually changes.
    pub fn set(&self, locale: Locale) {
        self.tx.send_if_modified(|current| {
            if *current == locale {
                false
            } else {
                *current = locale;
                true
            }
        });
    }

    /// Flip between `en` and `ar`, returning the new locale.
    pub fn toggle(&self) -> Locale {
        let next = self.current().toggled();
        self.set(next);
        next
    }
}

impl LocaleSignal {
    /// A signal with no publisher; it always reads `locale`.
    pub fn fixed(locale: Locale) -> Self {
        let (_, signal) = channel(locale);
        signal
    }

    /// Read the current locale without consuming a pending change.
    pub fn current(&self) -> Locale {
        *self.rx.borrow()
    }

    /// The new locale if it changed since the last observation.
    pub fn take_change(&mut self) -> Option<Locale> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            // A closed channel keeps its last value and never changes again.
            Ok(false) | Err(_) => None,
        }
    }
}
