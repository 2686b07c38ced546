use std::sync::{Arc, Mutex};
use yansi::Paint;

use crate::models::Workspace;

/// Where the user is taken once a workspace has been created.
pub trait NavigationSink: Send + Sync {
    fn go_to(&self, path: &str, workspace: &Workspace);
}

/// Reports the destination on stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleNavigator;

impl NavigationSink for ConsoleNavigator {
    fn go_to(&self, path: &str, workspace: &Workspace) {
        println!(
            "{} {} {}",
            Paint::new("Workspace").green(),
            Paint::new(&workspace.id).cyan().bold(),
            Paint::new(format!("is listed at {}", path)).dim()
        );
    }
}

/// Remembers each navigation, for callers that want to inspect the hand-off.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
    inner: Arc<Mutex<Vec<(String, Workspace)>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<(String, Workspace)> {
        self.inner.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl NavigationSink for RecordingNavigator {
    fn go_to(&self, path: &str, workspace: &Workspace) {
        if let Ok(mut visits) = self.inner.lock() {
            visits.push((path.to_string(), workspace.clone()));
        }
    }
}

/// Listing page for a project's workspaces.
pub fn workspaces_path(project_id: &str) -> String {
    format!("/projects/{}/workspaces", project_id)
}
