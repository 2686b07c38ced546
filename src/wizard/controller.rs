use crate::api::{CatalogService, ProvisioningService};
use crate::models::CreatedWorkspace;
use crate::services::{workspaces_path, NavigationSink, NoticeKind, NotificationSink};
use super::catalog::ImageFetchOutcome;
use super::events::{Effect, WizardEvent};
use super::session::WizardSession;

/// Drives a [`WizardSession`] against live collaborators.
///
/// Every collaborator failure ends here as a notification; the session keeps
/// its current step and draft.
pub struct WizardController<B, N, G> {
    backend: B,
    notifier: N,
    navigator: G,
    session: WizardSession,
}

impl<B, N, G> WizardController<B, N, G>
where
    B: CatalogService + ProvisioningService,
    N: NotificationSink,
    G: NavigationSink,
{
    pub fn new(
        backend: B,
        notifier: N,
        navigator: G,
        project_id: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            notifier,
            navigator,
            session: WizardSession::new(project_id, created_by),
        }
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Load templates and tshirt sizes. A failed list keeps whatever the
    /// catalog held before.
    pub async fn mount(&mut self) {
        let project_id = self.session.draft().project_id.clone();
        let (templates, sizes) = futures_util::join!(
            self.backend.list_templates(&project_id),
            self.backend.list_tshirt_sizes()
        );
        match templates {
            Ok(list) => self.session.receive_templates(&project_id, list),
            Err(e) => {
                tracing::warn!(error = %e, "template listing failed");
                self.notifier.notify(&e.user_message(), NoticeKind::Error);
            }
        }
        match sizes {
            Ok(list) => self.session.receive_tshirt_sizes(list),
            Err(e) => {
                tracing::warn!(error = %e, "tshirt size listing failed");
                self.notifier.notify(&e.user_message(), NoticeKind::Error);
            }
        }
    }

    /// Apply an event and run its effects to completion. Returns whether the
    /// event was accepted.
    pub async fn dispatch(&mut self, event: WizardEvent) -> bool {
        let effects = match self.session.apply(event) {
            Ok(effects) => effects,
            Err(rejected) => {
                tracing::warn!(reason = %rejected, step = %self.session.step(), "event rejected");
                self.notifier.notify(&rejected.to_string(), NoticeKind::Warning);
                return false;
            }
        };
        for effect in effects {
            self.run_effect(effect).await;
        }
        true
    }

    async fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RefreshImages(query) => {
                tracing::info!(%query, "fetching images");
                let result = self.backend.list_images(&query).await;
                match self.session.receive_images(&query, result) {
                    ImageFetchOutcome::Applied(count) => {
                        tracing::debug!(%query, count, "image listing applied");
                    }
                    ImageFetchOutcome::Stale => {}
                    ImageFetchOutcome::Failed(e) => {
                        tracing::warn!(%query, error = %e, "image listing failed");
                        self.notifier.notify(&e.user_message(), NoticeKind::Error);
                    }
                }
            }
        }
    }

    /// Submit the draft. On success the user is notified, navigation is
    /// handed the created workspace, and the draft is discarded. On failure
    /// the draft is kept for another attempt.
    pub async fn submit(&mut self) -> Option<CreatedWorkspace> {
        let request = match self.session.begin_submit() {
            Ok(request) => request,
            Err(blocked) => {
                tracing::warn!(reason = %blocked, "submit blocked");
                self.notifier.notify(&blocked.to_string(), NoticeKind::Warning);
                return None;
            }
        };
        tracing::info!(workspace_id = %request.id, "submitting workspace");
        let result = self.backend.create_workspace(&request).await;
        self.session.finish_submit(result.is_ok());
        match result {
            Ok(created) => {
                self.notifier.notify(&created.message, NoticeKind::Success);
                self.navigator
                    .go_to(&workspaces_path(&request.project_id), &created.workspace);
                Some(created)
            }
            Err(e) => {
                tracing::error!(workspace_id = %request.id, error = %e, "workspace creation failed");
                self.notifier.notify(&e.user_message(), NoticeKind::Error);
                None
            }
        }
    }
}
