//! Linear step flow: template → image → compute → scheduler.

use crate::models::{Step, WorkspaceDraft};
use super::store::ValidationReport;

/// Following step; `Scheduler` is terminal.
pub fn next(step: Step) -> Step {
    match step {
        Step::Template => Step::Image,
        Step::Image => Step::Compute,
        Step::Compute | Step::Scheduler => Step::Scheduler,
    }
}

/// Preceding step; `Template` is terminal.
pub fn prev(step: Step) -> Step {
    match step {
        Step::Template | Step::Image => Step::Template,
        Step::Compute => Step::Image,
        Step::Scheduler => Step::Compute,
    }
}

/// Whether the draft satisfies `step` and every step before it.
pub fn step_gate(draft: &WorkspaceDraft, step: Step) -> bool {
    match step {
        Step::Template => !draft.name.is_empty() && !draft.template_id.is_empty(),
        Step::Image => step_gate(draft, Step::Template) && !draft.tfconfig.image.is_empty(),
        Step::Compute => {
            step_gate(draft, Step::Image)
                && !draft.tshirt_size.is_empty()
                && !draft.tfconfig.drive.is_empty()
        }
        Step::Scheduler => true,
    }
}

/// Whether "Save & Next" is offered at all on the draft's current step. It
/// never shows alongside submit: the scheduler step is only reachable with
/// scheduling enabled.
pub fn next_offered(draft: &WorkspaceDraft) -> bool {
    match draft.step {
        Step::Template | Step::Image => true,
        Step::Compute => draft.schedule,
        Step::Scheduler => false,
    }
}

/// Whether "Save & Next" is enabled on the draft's current step.
pub fn can_advance(draft: &WorkspaceDraft) -> bool {
    next_offered(draft) && step_gate(draft, draft.step)
}

/// Whether the submit control is shown: on compute with scheduling off, or on
/// the scheduler step.
pub fn submit_visible(draft: &WorkspaceDraft) -> bool {
    match draft.step {
        Step::Compute => !draft.schedule,
        Step::Scheduler => true,
        Step::Template | Step::Image => false,
    }
}

/// Submit gating: visible, valid, and no submission in flight.
pub fn can_submit(draft: &WorkspaceDraft, report: &ValidationReport, submitting: bool) -> bool {
    !submitting && submit_visible(draft) && report.is_valid()
}

/// Whether a direct jump to `target` may be honored. Backwards is always
/// fine; forwards requires every step before `target` to pass its gate, and
/// the scheduler step additionally needs scheduling enabled.
pub fn jump_allowed(draft: &WorkspaceDraft, target: Step) -> bool {
    if target <= draft.step {
        return true;
    }
    step_gate(draft, prev(target)) && (target != Step::Scheduler || draft.schedule)
}
