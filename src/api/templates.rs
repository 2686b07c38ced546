use crate::models::Template;
use super::client::ApiClient;
use super::error::ApiError;

/// Load the starter templates available to a project.
pub async fn load_templates(api: &ApiClient, project_id: &str) -> Result<Vec<Template>, ApiError> {
    let params = vec![("project_id", project_id.to_string())];
    let resp = api.get::<Vec<Template>>("templates", params).await?;
    tracing::info!(project_id, count = resp.body.len(), "loaded templates");
    Ok(resp.body)
}
