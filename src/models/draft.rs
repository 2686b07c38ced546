use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::config::{CUSTOM_TSHIRT_SIZE, DEFAULT_PLATFORM_TAG};
use super::compute_options::ComputeOptions;
use super::step::Step;

/// A wizard enum name that matched no variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

/// Kind of workspace the selected template provisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceKind {
    /// Browser IDE container.
    #[default]
    Ide,
    /// Virtual machine.
    Cnv,
}

impl WorkspaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceKind::Ide => "ide",
            WorkspaceKind::Cnv => "cnv",
        }
    }
}

impl FromStr for WorkspaceKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ide" => Ok(WorkspaceKind::Ide),
            "cnv" => Ok(WorkspaceKind::Cnv),
            _ => Err(ParseEnumError::new("workspace type", s)),
        }
    }
}

/// Whether images come from prebuilt or user-built catalogs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildKind {
    #[default]
    Default,
    Custom,
}

impl BuildKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildKind::Default => "default",
            BuildKind::Custom => "custom",
        }
    }
}

impl FromStr for BuildKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "prebuild" | "pre-build" => Ok(BuildKind::Default),
            "custom" => Ok(BuildKind::Custom),
            _ => Err(ParseEnumError::new("build type", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    #[default]
    Linux,
    Windows,
}

impl OperatingSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Linux => "linux",
            OperatingSystem::Windows => "windows",
        }
    }

    /// Substring an image type must contain to be offered for this OS on `cnv`.
    pub fn cnv_image_marker(&self) -> &'static str {
        match self {
            OperatingSystem::Linux => "linux_cnv",
            OperatingSystem::Windows => "windows_cnv",
        }
    }
}

impl std::fmt::Display for WorkspaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for BuildKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute section of the draft. Numeric fields hold the raw text the user
/// entered or the size catalog supplied; they are parsed at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeSpec {
    pub image: String,
    pub image_name: String,
    pub cpu: String,
    pub memory: String,
    pub drive: String,
    #[serde(rename = "OS")]
    pub os: OperatingSystem,
    pub vm: String,
}

impl Default for ComputeSpec {
    fn default() -> Self {
        Self {
            image: String::new(),
            image_name: String::new(),
            cpu: String::new(),
            memory: String::new(),
            drive: String::new(),
            os: OperatingSystem::Linux,
            vm: DEFAULT_PLATFORM_TAG.to_string(),
        }
    }
}

/// The single configuration object a wizard session assembles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDraft {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub template_id: String,
    pub template_name: String,
    pub workspace_type: WorkspaceKind,
    pub build_type: BuildKind,
    pub schedule: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cron_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_cron_expression: Option<String>,
    pub tshirt_size: String,
    pub tfconfig: ComputeSpec,
    pub step: Step,
    pub created_by: String,
}

impl WorkspaceDraft {
    /// Fresh draft for a wizard mounted in `project_id` by `created_by`.
    pub fn new(project_id: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            project_id: project_id.into(),
            template_id: String::new(),
            template_name: String::new(),
            workspace_type: WorkspaceKind::Ide,
            build_type: BuildKind::Default,
            schedule: false,
            start_cron_expression: None,
            stop_cron_expression: None,
            tshirt_size: String::new(),
            tfconfig: ComputeSpec::default(),
            step: Step::Template,
            created_by: created_by.into(),
        }
    }

    pub fn is_custom_size(&self) -> bool {
        self.tshirt_size == CUSTOM_TSHIRT_SIZE
    }

    /// Size options offered for the current workspace kind.
    pub fn compute_options(&self) -> &'static ComputeOptions {
        ComputeOptions::for_kind(self.workspace_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_uses_wizard_defaults() {
        let draft = WorkspaceDraft::new("proj-1", "dev@example.com");
        assert_eq!(draft.workspace_type, WorkspaceKind::Ide);
        assert_eq!(draft.build_type, BuildKind::Default);
        assert_eq!(draft.tfconfig.os, OperatingSystem::Linux);
        assert_eq!(draft.tfconfig.vm, "vscode");
        assert_eq!(draft.step, Step::Template);
        assert!(!draft.schedule);
        assert!(draft.start_cron_expression.is_none());
    }

    #[test]
    fn draft_serializes_os_under_backend_key() {
        let draft = WorkspaceDraft::new("proj-1", "dev@example.com");
        let json = serde_json::to_value(&draft).expect("draft serializes");
        assert_eq!(json["tfconfig"]["OS"], "linux");
        assert_eq!(json["workspace_type"], "ide");
        assert!(json.get("start_cron_expression").is_none());
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!("CNV".parse::<WorkspaceKind>(), Ok(WorkspaceKind::Cnv));
        assert_eq!(" prebuild ".parse::<BuildKind>(), Ok(BuildKind::Default));
        assert_eq!("Custom".parse::<BuildKind>(), Ok(BuildKind::Custom));
        let err = "vm".parse::<WorkspaceKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown workspace type \"vm\"");
    }
}
