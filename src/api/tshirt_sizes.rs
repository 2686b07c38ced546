use crate::models::TshirtSize;
use super::client::ApiClient;
use super::error::ApiError;

/// Load the billing tshirt-size catalog.
pub async fn load_tshirt_sizes(api: &ApiClient) -> Result<Vec<TshirtSize>, ApiError> {
    let resp = api.get::<Vec<TshirtSize>>("billing/tshirtsize", Vec::new()).await?;
    tracing::info!(count = resp.body.len(), "loaded tshirt sizes");
    Ok(resp.body)
}
