use thiserror::Error;

use crate::api::ApiError;
use crate::models::{BuildImage, ComputeOptions, CreateWorkspaceRequest, ImageQuery, Step, Template, TshirtSize, WorkspaceDraft};
use super::catalog::{CatalogCache, ImageFetchOutcome};
use super::events::{Effect, EventRejected, WizardEvent};
use super::payload::assemble;
use super::reducer::reduce;
use super::steps;
use super::store::{DraftStore, ValidationReport};

/// Why a submit could not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("A submission is already in progress")]
    InFlight,

    #[error("Submit is not available on the {0} step")]
    NotAvailable(Step),

    #[error("Workspace is incomplete: {0}")]
    Invalid(ValidationReport),
}

/// State of one wizard run: the draft, the catalogs it draws on, and the
/// submission flag. All mutation goes through [`WizardSession::apply`] or the
/// `receive_*` / submit methods.
#[derive(Debug, Clone)]
pub struct WizardSession {
    store: DraftStore,
    catalog: CatalogCache,
    submitting: bool,
}

impl WizardSession {
    pub fn new(project_id: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            store: DraftStore::new(WorkspaceDraft::new(project_id, created_by)),
            catalog: CatalogCache::default(),
            submitting: false,
        }
    }

    pub fn draft(&self) -> &WorkspaceDraft {
        self.store.draft()
    }

    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    pub fn step(&self) -> Step {
        self.draft().step
    }

    pub fn validation(&self) -> ValidationReport {
        self.store.validate()
    }

    pub fn can_advance(&self) -> bool {
        !self.submitting && steps::can_advance(self.draft())
    }

    pub fn can_go_back(&self) -> bool {
        !self.submitting && self.step() != Step::Template
    }

    pub fn submit_visible(&self) -> bool {
        steps::submit_visible(self.draft())
    }

    pub fn can_submit(&self) -> bool {
        steps::can_submit(self.draft(), &self.validation(), self.submitting)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Cpu and memory only accept input for the custom size.
    pub fn sizing_editable(&self) -> bool {
        self.draft().is_custom_size()
    }

    pub fn compute_options(&self) -> &'static ComputeOptions {
        self.draft().compute_options()
    }

    pub fn image_query(&self) -> ImageQuery {
        ImageQuery::for_draft(self.draft())
    }

    /// Images selectable for the draft as it stands.
    pub fn available_images(&self) -> &[BuildImage] {
        self.catalog.images(&self.image_query())
    }

    /// Apply a user event. Returned effects are already registered with the
    /// catalog, so only responses to the latest image query will be accepted.
    pub fn apply(&mut self, event: WizardEvent) -> Result<Vec<Effect>, EventRejected> {
        if self.submitting {
            return Err(EventRejected::SubmitInFlight);
        }
        let reduction = reduce(self.store.draft(), &self.catalog, &event)?;
        self.store.commit(reduction.draft);
        for effect in &reduction.effects {
            match effect {
                Effect::RefreshImages(query) => self.catalog.begin_image_fetch(query.clone()),
            }
        }
        Ok(reduction.effects)
    }

    pub fn receive_templates(&mut self, project_id: &str, templates: Vec<Template>) {
        self.catalog.store_templates(project_id, templates);
    }

    pub fn receive_tshirt_sizes(&mut self, sizes: Vec<TshirtSize>) {
        self.catalog.store_tshirt_sizes(sizes);
    }

    /// Offer an image listing. Listings for a query the draft no longer
    /// matches are dropped.
    pub fn receive_images(
        &mut self,
        query: &ImageQuery,
        result: Result<Vec<BuildImage>, ApiError>,
    ) -> ImageFetchOutcome {
        if *query != self.image_query() {
            tracing::debug!(%query, "image listing no longer matches draft");
            return ImageFetchOutcome::Stale;
        }
        self.catalog.finish_image_fetch(query, result)
    }

    /// Check submit gating and mark a submission in flight.
    pub fn begin_submit(&mut self) -> Result<CreateWorkspaceRequest, SubmitBlocked> {
        if self.submitting {
            return Err(SubmitBlocked::InFlight);
        }
        if !self.submit_visible() {
            return Err(SubmitBlocked::NotAvailable(self.step()));
        }
        let report = self.validation();
        if !report.is_valid() {
            return Err(SubmitBlocked::Invalid(report));
        }
        self.submitting = true;
        Ok(assemble(self.draft()))
    }

    /// Clear the in-flight flag. On success the draft is discarded and a
    /// fresh one for the same project and creator takes its place.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            let old = self.store.draft();
            let fresh = WorkspaceDraft::new(old.project_id.clone(), old.created_by.clone());
            self.store.commit(fresh);
        }
    }
}
