use thiserror::Error;

use crate::models::{BuildKind, ImageQuery, Step, WorkspaceKind};
use super::store::Field;

/// One logical user action against the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    RenameWorkspace(String),
    SelectTemplate(String),
    SetBuildKind(BuildKind),
    /// Canonical image reference, see [`crate::models::BuildImage::reference`].
    SelectImage(String),
    SetTshirtSize(String),
    SetCpu(String),
    SetMemory(String),
    SetDrive(String),
    ToggleSchedule(bool),
    /// Cron pair chosen in the external schedule editor.
    SetSchedule { start: String, stop: String },
    Next,
    Previous,
    /// Direct step change requested by a progress indicator.
    JumpTo(Step),
}

/// Work the reducer asks its caller to perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RefreshImages(ImageQuery),
}

/// Why an event was not applied. The draft is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventRejected {
    #[error("Template {0:?} is not in the template catalog")]
    UnknownTemplate(String),

    #[error("Image {0:?} is not offered for the current selection")]
    UnknownImage(String),

    #[error("Tshirt size {0:?} is not in the size catalog")]
    UnknownTshirtSize(String),

    #[error("{} is set by the tshirt size and cannot be edited", .0.label())]
    ReadOnly(Field),

    #[error("Storage of {value} GB is not offered for {kind} workspaces")]
    DriveNotOffered { value: String, kind: WorkspaceKind },

    #[error("Scheduling is disabled")]
    ScheduleDisabled,

    #[error("Invalid cron expression: {0:?}")]
    InvalidCron(String),

    #[error("Complete the {0} step before continuing")]
    StepIncomplete(Step),

    #[error("A submission is already in progress")]
    SubmitInFlight,
}
