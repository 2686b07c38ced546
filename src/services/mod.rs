pub mod navigator;
pub mod notifier;

// Re-export commonly used items
pub use navigator::{workspaces_path, ConsoleNavigator, NavigationSink, RecordingNavigator};
pub use notifier::{ConsoleNotifier, NoticeKind, NotificationSink, RecordingNotifier};
