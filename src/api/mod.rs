// Backend API modules
pub mod backend;
pub mod builds;
pub mod client;
pub mod error;
pub mod templates;
pub mod tshirt_sizes;
pub mod workspaces;

// Re-export commonly used items
pub use backend::{CatalogService, HttpBackend, ProvisioningService};
pub use client::{ApiClient, ApiResponse};
pub use error::ApiError;
