//! Derivation rules: field updates implied by a user change.
//!
//! Rules run in a fixed order after the raw change is applied, each one
//! seeing the output of the previous:
//!
//! 1. name → id
//! 2. template → OS, display name, kind
//! 3. kind / build kind / OS / template change → clear image, refresh images
//! 4. tshirt size → cpu and memory
//! 5. image → image display name
//! 6. schedule enabled → default cron pair
//!
//! None of them perform I/O. Image refreshes come back as [`Effect`]s.

use crate::config::{DEFAULT_START_CRON, DEFAULT_STOP_CRON};
use crate::models::{ImageQuery, WorkspaceDraft};
use crate::utils::workspace_id;
use super::catalog::CatalogCache;
use super::events::Effect;

/// Which inputs the triggering event touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub name: bool,
    pub template: bool,
    pub build_kind: bool,
    pub tshirt_size: bool,
    pub image: bool,
    pub schedule: bool,
}

/// Apply every rule the changes trigger.
pub fn run(draft: &mut WorkspaceDraft, catalog: &CatalogCache, changes: Changes) -> Vec<Effect> {
    let mut effects = Vec::new();

    if changes.name {
        derive_id(draft);
    }

    let mut refresh = RefreshTriggers {
        build_kind: changes.build_kind,
        ..RefreshTriggers::default()
    };
    if changes.template {
        refresh = refresh.merge(derive_from_template(draft, catalog));
    }

    if refresh.any() {
        effects.extend(refresh_images(draft));
    }

    if changes.tshirt_size {
        derive_sizing(draft, catalog);
    }

    if changes.image {
        derive_image_name(draft, catalog);
    }

    if changes.schedule {
        seed_schedule(draft);
    }

    effects
}

/// Rule 1.
pub fn derive_id(draft: &mut WorkspaceDraft) {
    draft.id = workspace_id(&draft.name);
}

/// What rule 2 changed, for rule 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshTriggers {
    pub kind: bool,
    pub os: bool,
    pub build_kind: bool,
    pub template: bool,
}

impl RefreshTriggers {
    pub fn any(&self) -> bool {
        self.kind || self.os || self.build_kind || self.template
    }

    fn merge(self, other: RefreshTriggers) -> RefreshTriggers {
        RefreshTriggers {
            kind: self.kind || other.kind,
            os: self.os || other.os,
            build_kind: self.build_kind || other.build_kind,
            template: self.template || other.template,
        }
    }
}

/// Rule 2. A template that is not in the catalog derives nothing.
pub fn derive_from_template(draft: &mut WorkspaceDraft, catalog: &CatalogCache) -> RefreshTriggers {
    let Some(template) = catalog.template(&draft.template_id) else {
        return RefreshTriggers::default();
    };

    let os = template.operating_system();
    let kind = template.workspace_kind();
    let mut triggers = RefreshTriggers {
        template: true,
        ..RefreshTriggers::default()
    };

    if draft.tfconfig.os != os {
        draft.tfconfig.os = os;
        triggers.os = true;
    }
    draft.template_name = template.name.clone();

    if draft.workspace_type != kind {
        tracing::debug!(from = %draft.workspace_type, to = %kind, "workspace kind switched");
        draft.workspace_type = kind;
        triggers.kind = true;
        // Drive must come from the new kind's catalog.
        if !draft.compute_options().allows_drive(&draft.tfconfig.drive) {
            draft.tfconfig.drive.clear();
        }
    }
    triggers
}

/// Rule 3. Refreshes wait until a template has been chosen.
pub fn refresh_images(draft: &mut WorkspaceDraft) -> Option<Effect> {
    if draft.template_id.is_empty() {
        return None;
    }
    draft.tfconfig.image.clear();
    draft.tfconfig.image_name.clear();
    let query = ImageQuery::for_draft(draft);
    tracing::debug!(%query, "image catalog refresh scheduled");
    Some(Effect::RefreshImages(query))
}

/// Rule 4. Custom sizes start empty; named sizes copy the catalog entry.
pub fn derive_sizing(draft: &mut WorkspaceDraft, catalog: &CatalogCache) {
    if draft.is_custom_size() {
        draft.tfconfig.cpu.clear();
        draft.tfconfig.memory.clear();
        return;
    }
    match catalog.tshirt_size(&draft.tshirt_size) {
        Some(size) => {
            draft.tfconfig.cpu = size.cpu.clone();
            draft.tfconfig.memory = size.memory.clone();
        }
        None => {
            draft.tfconfig.cpu.clear();
            draft.tfconfig.memory.clear();
        }
    }
}

/// Rule 5.
pub fn derive_image_name(draft: &mut WorkspaceDraft, catalog: &CatalogCache) {
    let query = ImageQuery::for_draft(draft);
    draft.tfconfig.image_name = catalog
        .image(&query, &draft.tfconfig.image)
        .map(|img| img.name.clone())
        .unwrap_or_default();
}

/// Rule 6. Only fills values that are not set yet.
pub fn seed_schedule(draft: &mut WorkspaceDraft) {
    if !draft.schedule {
        return;
    }
    if draft.start_cron_expression.as_deref().map_or(true, str::is_empty) {
        draft.start_cron_expression = Some(DEFAULT_START_CRON.to_string());
    }
    if draft.stop_cron_expression.as_deref().map_or(true, str::is_empty) {
        draft.stop_cron_expression = Some(DEFAULT_STOP_CRON.to_string());
    }
}
