use crate::models::{CreateWorkspaceRequest, CreatedWorkspace, Workspace};
use super::client::ApiClient;
use super::error::ApiError;

/// Submit a create-workspace request.
pub async fn create_workspace(
    api: &ApiClient,
    request: &CreateWorkspaceRequest,
) -> Result<CreatedWorkspace, ApiError> {
    let resp = api.post::<_, Workspace>("workspaces", request).await?;
    tracing::info!(workspace_id = %request.id, project_id = %request.project_id, "workspace created");
    Ok(CreatedWorkspace {
        workspace: resp.body,
        message: resp
            .message
            .unwrap_or_else(|| format!("Workspace {} created", request.name)),
    })
}
