pub mod build_image;
pub mod compute_options;
pub mod draft;
pub mod image_query;
pub mod request;
pub mod step;
pub mod template;
pub mod tshirt_size;

pub use build_image::{BuildImage, RawImage};
pub use compute_options::{ComputeOptions, CNV_COMPUTES, IDE_COMPUTES};
pub use draft::{BuildKind, ComputeSpec, OperatingSystem, ParseEnumError, WorkspaceDraft, WorkspaceKind};
pub use image_query::ImageQuery;
pub use request::{ComputePayload, CreateWorkspaceRequest, CreatedWorkspace, Workspace};
pub use step::Step;
pub use template::Template;
pub use tshirt_size::TshirtSize;
