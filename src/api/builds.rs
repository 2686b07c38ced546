use crate::models::{BuildImage, ImageQuery, RawImage};
use super::client::ApiClient;
use super::error::ApiError;

/// Load build images for a project, workspace kind and build kind.
///
/// The endpoint has no OS parameter; `query.os_filter` is applied by the
/// caller against each image's declared type.
pub async fn load_builds(api: &ApiClient, query: &ImageQuery) -> Result<Vec<BuildImage>, ApiError> {
    let params = vec![
        ("project_id", query.project_id.clone()),
        ("build_type", query.build_kind.as_str().to_string()),
        ("workspace_type", query.workspace_kind.as_str().to_string()),
    ];
    let resp = api.get::<Vec<RawImage>>("builds", params).await?;
    let images: Vec<BuildImage> = resp.body.into_iter().map(BuildImage::from).collect();
    tracing::info!(%query, count = images.len(), "loaded build images");
    Ok(images)
}
