//! User-facing notifications.
//!
//! The store reports sync outcomes through a [`Notifier`] so that any
//! presentation layer (toasts, terminal output, logs) can render them.

use std::sync::{Mutex, PoisonError};

/// Category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// The change reached the server
    Success,
    /// The change was kept locally without contacting the server
    SavedLocally,
    /// The server could not be reached or refused the change
    ConnectivityError,
}

impl NoticeKind {
    /// Whether a presentation layer should render this as destructive
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        !matches!(self, Self::Success)
    }
}

/// A notification as delivered to a [`Notifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

/// Fire-and-forget notification sink
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, title: &str, message: &str);
}

/// Notifier that emits tracing events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NoticeKind, title: &str, message: &str) {
        match kind {
            NoticeKind::Success => tracing::info!("{title}: {message}"),
            NoticeKind::SavedLocally | NoticeKind::ConnectivityError => {
                tracing::warn!("{title}: {message}");
            }
        }
    }
}

/// Notifier that keeps every notice in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn kinds(&self) -> Vec<NoticeKind> {
        self.notices().into_iter().map(|notice| notice.kind).collect()
    }

    pub fn clear(&self) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, title: &str, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notice {
                kind,
                title: title.to_string(),
                message: message.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(NoticeKind::SavedLocally, "Note saved locally", "later");
        notifier.notify(NoticeKind::Success, "Note created", "done");

        assert_eq!(
            notifier.kinds(),
            vec![NoticeKind::SavedLocally, NoticeKind::Success]
        );
        assert_eq!(notifier.notices()[1].title, "Note created");

        notifier.clear();
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn only_success_is_non_destructive() {
        assert!(!NoticeKind::Success.is_destructive());
        assert!(NoticeKind::SavedLocally.is_destructive());
        assert!(NoticeKind::ConnectivityError.is_destructive());
    }
}
