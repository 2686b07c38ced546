use serde::{Deserialize, Serialize};

use super::draft::{OperatingSystem, WorkspaceKind};

/// Starter template offered on the first step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Declared template type, e.g. `ide_linux` or `windows_cnv`.
    #[serde(rename = "type", default)]
    pub template_type: String,
    #[serde(default)]
    pub created_at: String,
}

impl Template {
    /// Name to show in selection lists; falls back to the id.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn workspace_kind(&self) -> WorkspaceKind {
        if self.template_type.to_lowercase().contains("cnv") {
            WorkspaceKind::Cnv
        } else {
            WorkspaceKind::Ide
        }
    }

    pub fn operating_system(&self) -> OperatingSystem {
        if self.template_type.to_lowercase().contains("windows") {
            OperatingSystem::Windows
        } else {
            OperatingSystem::Linux
        }
    }
}
