//! `(draft, event) -> draft'` transition function.

use crate::config::CUSTOM_TSHIRT_SIZE;
use crate::models::{ImageQuery, Step, WorkspaceDraft};
use crate::utils::is_cron_shaped;
use super::catalog::CatalogCache;
use super::derive::{self, Changes};
use super::events::{Effect, EventRejected, WizardEvent};
use super::steps;
use super::store::Field;

/// New draft plus the follow-up work it requires.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub draft: WorkspaceDraft,
    pub effects: Vec<Effect>,
}

/// Apply `event` to a copy of `draft`, then run the derivation rules it
/// triggers. The input draft is never modified.
pub fn reduce(
    draft: &WorkspaceDraft,
    catalog: &CatalogCache,
    event: &WizardEvent,
) -> Result<Reduction, EventRejected> {
    let mut next = draft.clone();
    let mut changes = Changes::default();

    match event {
        WizardEvent::RenameWorkspace(name) => {
            next.name = name.clone();
            changes.name = true;
        }
        WizardEvent::SelectTemplate(id) => {
            if catalog.template(id).is_none() {
                return Err(EventRejected::UnknownTemplate(id.clone()));
            }
            changes.template = next.template_id != *id;
            next.template_id = id.clone();
        }
        WizardEvent::SetBuildKind(kind) => {
            changes.build_kind = next.build_type != *kind;
            next.build_type = *kind;
        }
        WizardEvent::SelectImage(reference) => {
            let query = ImageQuery::for_draft(&next);
            if catalog.image(&query, reference).is_none() {
                return Err(EventRejected::UnknownImage(reference.clone()));
            }
            next.tfconfig.image = reference.clone();
            changes.image = true;
        }
        WizardEvent::SetTshirtSize(code) => {
            let custom = code.as_str() == CUSTOM_TSHIRT_SIZE;
            if !custom && catalog.tshirt_size(code).is_none() {
                return Err(EventRejected::UnknownTshirtSize(code.clone()));
            }
            next.tshirt_size = code.clone();
            changes.tshirt_size = true;
        }
        WizardEvent::SetCpu(value) => {
            if !next.is_custom_size() {
                return Err(EventRejected::ReadOnly(Field::Cpu));
            }
            next.tfconfig.cpu = value.trim().to_string();
        }
        WizardEvent::SetMemory(value) => {
            if !next.is_custom_size() {
                return Err(EventRejected::ReadOnly(Field::Memory));
            }
            next.tfconfig.memory = value.trim().to_string();
        }
        WizardEvent::SetDrive(value) => {
            if !next.compute_options().allows_drive(value) {
                return Err(EventRejected::DriveNotOffered {
                    value: value.trim().to_string(),
                    kind: next.workspace_type,
                });
            }
            next.tfconfig.drive = value.trim().to_string();
        }
        WizardEvent::ToggleSchedule(enabled) => {
            next.schedule = *enabled;
            changes.schedule = true;
        }
        WizardEvent::SetSchedule { start, stop } => {
            if !next.schedule {
                return Err(EventRejected::ScheduleDisabled);
            }
            for expr in [start, stop] {
                if !is_cron_shaped(expr) {
                    return Err(EventRejected::InvalidCron(expr.clone()));
                }
            }
            next.start_cron_expression = Some(start.trim().to_string());
            next.stop_cron_expression = Some(stop.trim().to_string());
        }
        WizardEvent::Next => {
            if steps::next_offered(&next) {
                if !steps::step_gate(&next, next.step) {
                    return Err(EventRejected::StepIncomplete(next.step));
                }
                next.step = steps::next(next.step);
            } else {
                tracing::debug!(step = %next.step, schedule = next.schedule, "next not offered here");
            }
        }
        WizardEvent::Previous => {
            next.step = steps::prev(next.step);
        }
        WizardEvent::JumpTo(target) => {
            if !steps::jump_allowed(&next, *target) {
                let blocking = Step::all()
                    .iter()
                    .copied()
                    .find(|s| !steps::step_gate(&next, *s));
                return Err(match blocking {
                    Some(step) => EventRejected::StepIncomplete(step),
                    None => EventRejected::ScheduleDisabled,
                });
            }
            next.step = *target;
        }
    }

    let effects = derive::run(&mut next, catalog, changes);
    if next.step != draft.step {
        tracing::debug!(from = %draft.step, to = %next.step, "step changed");
    }
    Ok(Reduction { draft: next, effects })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BuildKind, Template, TshirtSize, WorkspaceKind};

    fn catalog() -> CatalogCache {
        let mut c = CatalogCache::default();
        c.store_templates(
            "proj",
            vec![
                Template {
                    id: "tpl-1".into(),
                    name: "Python".into(),
                    template_type: "ide".into(),
                    created_at: String::new(),
                },
                Template {
                    id: "tpl-vm".into(),
                    name: "Ubuntu VM".into(),
                    template_type: "linux_cnv".into(),
                    created_at: String::new(),
                },
            ],
        );
        c.store_tshirt_sizes(vec![TshirtSize {
            size_code: "S".into(),
            cpu: "2".into(),
            memory: "4".into(),
        }]);
        c
    }

    fn apply(draft: &WorkspaceDraft, catalog: &CatalogCache, event: WizardEvent) -> Reduction {
        reduce(draft, catalog, &event).expect("event applies")
    }

    #[test]
    fn rejected_event_leaves_input_untouched() {
        let c = catalog();
        let d = WorkspaceDraft::new("proj", "me");
        let before = d.clone();
        let err = reduce(&d, &c, &WizardEvent::SelectTemplate("missing".into())).unwrap_err();
        assert_eq!(err, EventRejected::UnknownTemplate("missing".into()));
        assert_eq!(d, before);
    }

    #[test]
    fn template_selection_requests_images_for_derived_kind() {
        let c = catalog();
        let d = WorkspaceDraft::new("proj", "me");
        let r = apply(&d, &c, WizardEvent::SelectTemplate("tpl-vm".into()));
        assert_eq!(r.draft.workspace_type, WorkspaceKind::Cnv);
        assert_eq!(r.effects, vec![Effect::RefreshImages(ImageQuery::for_draft(&r.draft))]);
    }

    #[test]
    fn reselecting_same_template_does_not_refetch() {
        let c = catalog();
        let d = apply(&WorkspaceDraft::new("proj", "me"), &c, WizardEvent::SelectTemplate("tpl-1".into())).draft;
        let r = apply(&d, &c, WizardEvent::SelectTemplate("tpl-1".into()));
        assert!(r.effects.is_empty());
    }

    #[test]
    fn build_kind_change_refetches_after_template() {
        let c = catalog();
        let d = apply(&WorkspaceDraft::new("proj", "me"), &c, WizardEvent::SelectTemplate("tpl-1".into())).draft;
        let r = apply(&d, &c, WizardEvent::SetBuildKind(BuildKind::Custom));
        match &r.effects[..] {
            [Effect::RefreshImages(q)] => assert_eq!(q.build_kind, BuildKind::Custom),
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn cpu_is_read_only_for_named_sizes() {
        let c = catalog();
        let d = apply(&WorkspaceDraft::new("proj", "me"), &c, WizardEvent::SetTshirtSize("S".into())).draft;
        assert_eq!(d.tfconfig.cpu, "2");
        let err = reduce(&d, &c, &WizardEvent::SetCpu("3".into())).unwrap_err();
        assert_eq!(err, EventRejected::ReadOnly(Field::Cpu));
    }

    #[test]
    fn leaving_custom_size_replaces_custom_values() {
        let c = catalog();
        let mut d = apply(&WorkspaceDraft::new("proj", "me"), &c, WizardEvent::SetTshirtSize("TX".into())).draft;
        d = apply(&d, &c, WizardEvent::SetCpu("3".into())).draft;
        d = apply(&d, &c, WizardEvent::SetMemory("7".into())).draft;
        d = apply(&d, &c, WizardEvent::SetTshirtSize("S".into())).draft;
        assert_eq!((d.tfconfig.cpu.as_str(), d.tfconfig.memory.as_str()), ("2", "4"));
    }

    #[test]
    fn drive_must_come_from_kind_catalog() {
        let c = catalog();
        let d = WorkspaceDraft::new("proj", "me");
        assert!(matches!(
            reduce(&d, &c, &WizardEvent::SetDrive("60".into())),
            Err(EventRejected::DriveNotOffered { .. })
        ));
        assert_eq!(apply(&d, &c, WizardEvent::SetDrive("40".into())).draft.tfconfig.drive, "40");
    }

    #[test]
    fn next_is_gated_and_terminal_moves_are_no_ops() {
        let c = catalog();
        let d = WorkspaceDraft::new("proj", "me");
        assert_eq!(
            reduce(&d, &c, &WizardEvent::Next).unwrap_err(),
            EventRejected::StepIncomplete(Step::Template)
        );
        assert_eq!(apply(&d, &c, WizardEvent::Previous).draft.step, Step::Template);

        let mut at_end = d.clone();
        at_end.step = Step::Scheduler;
        assert_eq!(apply(&at_end, &c, WizardEvent::Next).draft.step, Step::Scheduler);
    }

    #[test]
    fn next_stays_on_compute_until_scheduling_is_enabled() {
        let c = catalog();
        let mut d = WorkspaceDraft::new("proj", "me");
        d.name = "demo".into();
        d.template_id = "tpl-1".into();
        d.tfconfig.image = "img".into();
        d = apply(&d, &c, WizardEvent::SetTshirtSize("S".into())).draft;
        d = apply(&d, &c, WizardEvent::SetDrive("20".into())).draft;
        d.step = Step::Compute;

        assert_eq!(apply(&d, &c, WizardEvent::Next).draft.step, Step::Compute);
        assert_eq!(
            reduce(&d, &c, &WizardEvent::JumpTo(Step::Scheduler)).unwrap_err(),
            EventRejected::ScheduleDisabled
        );

        let d = apply(&d, &c, WizardEvent::ToggleSchedule(true)).draft;
        assert_eq!(apply(&d, &c, WizardEvent::Next).draft.step, Step::Scheduler);
    }

    #[test]
    fn schedule_pair_requires_enabled_schedule_and_cron_shape() {
        let c = catalog();
        let d = WorkspaceDraft::new("proj", "me");
        let pair = WizardEvent::SetSchedule {
            start: "0 8 * * 1-5".into(),
            stop: "0 18 * * 1-5".into(),
        };
        assert_eq!(reduce(&d, &c, &pair).unwrap_err(), EventRejected::ScheduleDisabled);

        let d = apply(&d, &c, WizardEvent::ToggleSchedule(true)).draft;
        let bad = WizardEvent::SetSchedule {
            start: "daily".into(),
            stop: "0 18 * * 1-5".into(),
        };
        assert!(matches!(reduce(&d, &c, &bad), Err(EventRejected::InvalidCron(_))));
        let d = apply(&d, &c, pair).draft;
        assert_eq!(d.start_cron_expression.as_deref(), Some("0 8 * * 1-5"));
    }

    #[test]
    fn blocked_jump_names_first_incomplete_step() {
        let c = catalog();
        let d = WorkspaceDraft::new("proj", "me");
        assert_eq!(
            reduce(&d, &c, &WizardEvent::JumpTo(Step::Scheduler)).unwrap_err(),
            EventRejected::StepIncomplete(Step::Template)
        );
    }
}
