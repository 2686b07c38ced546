use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::draft::ParseEnumError;

/// Wizard page the user is currently on. Never sent to the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Template,
    Image,
    Compute,
    Scheduler,
}

impl Step {
    /// All steps, in flow order.
    pub fn all() -> &'static [Step] {
        &[Step::Template, Step::Image, Step::Compute, Step::Scheduler]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Template => "template",
            Step::Image => "image",
            Step::Compute => "compute",
            Step::Scheduler => "scheduler",
        }
    }

    /// Heading shown above the step's form.
    pub fn heading(&self) -> &'static str {
        match self {
            Step::Template => "Select starter template for your workspace.",
            Step::Image => "Select build image for your workspace.",
            Step::Compute => "Select computes for your workspace.",
            Step::Scheduler => "Select schedules for your workspace",
        }
    }
}

impl FromStr for Step {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "template" => Ok(Step::Template),
            "image" => Ok(Step::Image),
            "compute" => Ok(Step::Compute),
            "scheduler" => Ok(Step::Scheduler),
            _ => Err(ParseEnumError::new("step", s)),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
