use crate::api::ApiError;
use crate::models::{BuildImage, ImageQuery, Template, TshirtSize};

/// Result of offering an image listing to the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageFetchOutcome {
    /// Listing stored; holds the number of images kept after OS filtering.
    Applied(usize),
    /// A newer query superseded this one; the listing was dropped.
    Stale,
    /// The fetch failed; the listing was cleared.
    Failed(ApiError),
}

/// Externally supplied lists, each tagged with the parameters that produced it.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    templates: Vec<Template>,
    templates_project: Option<String>,
    tshirt_sizes: Vec<TshirtSize>,
    images: Vec<BuildImage>,
    images_query: Option<ImageQuery>,
    pending_images: Option<ImageQuery>,
}

impl CatalogCache {
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Project the template list was fetched for.
    pub fn templates_project(&self) -> Option<&str> {
        self.templates_project.as_deref()
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn store_templates(&mut self, project_id: &str, templates: Vec<Template>) {
        self.templates = templates;
        self.templates_project = Some(project_id.to_string());
    }

    pub fn tshirt_sizes(&self) -> &[TshirtSize] {
        &self.tshirt_sizes
    }

    pub fn tshirt_size(&self, code: &str) -> Option<&TshirtSize> {
        self.tshirt_sizes.iter().find(|s| s.size_code == code)
    }

    pub fn store_tshirt_sizes(&mut self, sizes: Vec<TshirtSize>) {
        self.tshirt_sizes = sizes;
    }

    /// Images fetched for `query`, or nothing if the stored listing belongs
    /// to a different query.
    pub fn images(&self, query: &ImageQuery) -> &[BuildImage] {
        if self.images_query.as_ref() == Some(query) {
            &self.images
        } else {
            &[]
        }
    }

    pub fn image(&self, query: &ImageQuery, reference: &str) -> Option<&BuildImage> {
        self.images(query).iter().find(|img| img.reference == reference)
    }

    pub fn pending_images(&self) -> Option<&ImageQuery> {
        self.pending_images.as_ref()
    }

    /// Record `query` as the only listing whose response will be accepted.
    pub fn begin_image_fetch(&mut self, query: ImageQuery) {
        self.pending_images = Some(query);
    }

    /// Accept or drop a listing response for `query`.
    pub fn finish_image_fetch(
        &mut self,
        query: &ImageQuery,
        result: Result<Vec<BuildImage>, ApiError>,
    ) -> ImageFetchOutcome {
        if self.pending_images.as_ref() != Some(query) {
            tracing::debug!(%query, "dropping superseded image listing");
            return ImageFetchOutcome::Stale;
        }
        self.pending_images = None;
        match result {
            Ok(images) => {
                self.images = images.into_iter().filter(|img| query.admits(&img.image_type)).collect();
                self.images_query = Some(query.clone());
                ImageFetchOutcome::Applied(self.images.len())
            }
            Err(e) => {
                self.images.clear();
                self.images_query = None;
                ImageFetchOutcome::Failed(e)
            }
        }
    }
}
