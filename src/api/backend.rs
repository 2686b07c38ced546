//! Collaborator seams the wizard core talks through.
//!
//! The controller only sees these traits; `HttpBackend` is the production
//! implementation over [`ApiClient`], tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::models::{BuildImage, CreateWorkspaceRequest, CreatedWorkspace, ImageQuery, Template, TshirtSize};
use super::client::ApiClient;
use super::error::ApiError;
use super::{builds, templates, tshirt_sizes, workspaces};

/// Read-only catalogs the wizard offers choices from.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_templates(&self, project_id: &str) -> Result<Vec<Template>, ApiError>;

    async fn list_tshirt_sizes(&self) -> Result<Vec<TshirtSize>, ApiError>;

    /// Images for the query's project, kind and build kind. Implementations
    /// may ignore `os_filter`; the wizard filters results itself.
    async fn list_images(&self, query: &ImageQuery) -> Result<Vec<BuildImage>, ApiError>;
}

/// Backend that turns a finished draft into a workspace.
#[async_trait]
pub trait ProvisioningService: Send + Sync {
    async fn create_workspace(&self, request: &CreateWorkspaceRequest) -> Result<CreatedWorkspace, ApiError>;
}

/// Both services backed by the REST API.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    api: ApiClient,
}

impl HttpBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[async_trait]
impl CatalogService for HttpBackend {
    async fn list_templates(&self, project_id: &str) -> Result<Vec<Template>, ApiError> {
        templates::load_templates(&self.api, project_id).await
    }

    async fn list_tshirt_sizes(&self) -> Result<Vec<TshirtSize>, ApiError> {
        tshirt_sizes::load_tshirt_sizes(&self.api).await
    }

    async fn list_images(&self, query: &ImageQuery) -> Result<Vec<BuildImage>, ApiError> {
        builds::load_builds(&self.api, query).await
    }
}

#[async_trait]
impl ProvisioningService for HttpBackend {
    async fn create_workspace(&self, request: &CreateWorkspaceRequest) -> Result<CreatedWorkspace, ApiError> {
        workspaces::create_workspace(&self.api, request).await
    }
}
