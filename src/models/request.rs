use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::draft::OperatingSystem;

/// Compute section of the create request. `cpu`/`memory` are only present
/// for custom sizes; the backend derives them from the size code otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputePayload {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    pub drive: i64,
    #[serde(rename = "OS")]
    pub os: OperatingSystem,
    pub vm: String,
}

/// Body of `POST /workspaces`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateWorkspaceRequest {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub template_id: String,
    pub tshirt_size: String,
    pub tfconfig: ComputePayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cron_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_cron_expression: Option<String>,
    pub created_by: String,
}

/// Workspace record the backend returns after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Successful create result: the record plus the backend's message.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedWorkspace {
    pub workspace: Workspace,
    pub message: String,
}
