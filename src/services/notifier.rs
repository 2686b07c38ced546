use std::sync::{Arc, Mutex};
use yansi::Paint;

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

/// Fire-and-forget destination for user-facing messages.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Prints notices to the terminal, colored by kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => println!("{}", Paint::new(message).green()),
            NoticeKind::Info => println!("{}", Paint::new(message).cyan()),
            NoticeKind::Warning => eprintln!("{}", Paint::new(message).yellow()),
            NoticeKind::Error => eprintln!("{}", Paint::new(message).red()),
        }
    }
}

/// Keeps every notice in memory, oldest first.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<Vec<(NoticeKind, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.inner.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<(NoticeKind, String)> {
        self.notices().pop()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        if let Ok(mut entries) = self.inner.lock() {
            entries.push((kind, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let sink = RecordingNotifier::new();
        sink.notify("first", NoticeKind::Info);
        sink.notify("second", NoticeKind::Error);
        assert_eq!(sink.notices().len(), 2);
        assert_eq!(sink.last(), Some((NoticeKind::Error, "second".to_string())));
    }
}
