use crate::models::{ComputePayload, CreateWorkspaceRequest, WorkspaceDraft};
use crate::utils::parse_int;

/// Shape a validated draft into the create-workspace request.
///
/// Wizard-only fields (workspace kind, build kind, step, template and image
/// display names, the schedule toggle) are not part of the request type at all. Cron
/// expressions are included only while scheduling is enabled, and cpu/memory
/// only for the custom size.
pub fn assemble(draft: &WorkspaceDraft) -> CreateWorkspaceRequest {
    let is_custom = draft.is_custom_size();

    let (cpu, memory) = if is_custom {
        (
            Some(int_or_zero("tfconfig.cpu", &draft.tfconfig.cpu)),
            Some(int_or_zero("tfconfig.memory", &draft.tfconfig.memory)),
        )
    } else {
        (None, None)
    };

    let (start_cron_expression, stop_cron_expression) = if draft.schedule {
        (
            draft.start_cron_expression.clone(),
            draft.stop_cron_expression.clone(),
        )
    } else {
        (None, None)
    };

    CreateWorkspaceRequest {
        id: draft.id.clone(),
        name: draft.name.clone(),
        project_id: draft.project_id.clone(),
        template_id: draft.template_id.clone(),
        tshirt_size: draft.tshirt_size.clone(),
        tfconfig: ComputePayload {
            image: draft.tfconfig.image.clone(),
            cpu,
            memory,
            drive: int_or_zero("tfconfig.drive", &draft.tfconfig.drive),
            os: draft.tfconfig.os,
            vm: draft.tfconfig.vm.clone(),
        },
        start_cron_expression,
        stop_cron_expression,
        created_by: draft.created_by.clone(),
    }
}

// Validation already demands numbers here; reaching the fallback means the
// draft was assembled without validating.
fn int_or_zero(field: &'static str, raw: &str) -> i64 {
    parse_int(raw).unwrap_or_else(|| {
        tracing::warn!(field, raw, "non-numeric value at submit, sending 0");
        0
    })
}
