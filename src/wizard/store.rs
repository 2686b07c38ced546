//! Draft store: owns the live draft and validates it as a whole.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::config::MAX_WORKSPACE_NAME_LEN;
use crate::models::WorkspaceDraft;
use crate::utils::parse_int;

/// Letter first, then alphanumeric runs joined by at most one space or dash,
/// ending alphanumeric.
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z](([a-zA-Z0-9]+[ -]?)*[a-zA-Z0-9])?$").expect("static regex"));

/// Draft fields that carry validation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    TemplateId,
    ProjectId,
    CreatedBy,
    TshirtSize,
    Image,
    Cpu,
    Memory,
    Drive,
}

impl Field {
    /// Dotted path of the field in the draft's serialized form.
    pub fn path(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::TemplateId => "template_id",
            Field::ProjectId => "project_id",
            Field::CreatedBy => "created_by",
            Field::TshirtSize => "tshirt_size",
            Field::Image => "tfconfig.image",
            Field::Cpu => "tfconfig.cpu",
            Field::Memory => "tfconfig.memory",
            Field::Drive => "tfconfig.drive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::TemplateId => "Template",
            Field::ProjectId => "Project",
            Field::CreatedBy => "Created By",
            Field::TshirtSize => "Tshirt Size",
            Field::Image => "Image",
            Field::Cpu => "CPU",
            Field::Memory => "Memory",
            Field::Drive => "Storage",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of validating the full draft. At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    fn reject(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Holds the draft for one wizard session.
#[derive(Debug, Clone)]
pub struct DraftStore {
    draft: WorkspaceDraft,
}

impl DraftStore {
    pub fn new(draft: WorkspaceDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &WorkspaceDraft {
        &self.draft
    }

    /// Replace the draft with the result of a reducer transition.
    pub fn commit(&mut self, draft: WorkspaceDraft) {
        self.draft = draft;
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.draft)
    }
}

/// Validate every rule against the draft, regardless of the current step.
pub fn validate(draft: &WorkspaceDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.name.is_empty() {
        report.reject(Field::Name, "Name is required");
    } else if !NAME_PATTERN.is_match(&draft.name) {
        report.reject(
            Field::Name,
            "Name cannot contain special characters other than space and dash.",
        );
    } else if draft.name.chars().count() > MAX_WORKSPACE_NAME_LEN {
        report.reject(
            Field::Name,
            format!("Name exceeding max length of {} characters.", MAX_WORKSPACE_NAME_LEN),
        );
    }

    require_text(&mut report, Field::TemplateId, &draft.template_id, "Template ID is required");
    require_text(&mut report, Field::ProjectId, &draft.project_id, "Project Name is required");
    require_text(&mut report, Field::CreatedBy, &draft.created_by, "Created By is required");
    require_text(&mut report, Field::TshirtSize, &draft.tshirt_size, "Tshirt Size is required");
    require_text(&mut report, Field::Image, &draft.tfconfig.image, "Image name is required");

    require_number(&mut report, Field::Cpu, &draft.tfconfig.cpu, "CPU count is required", Some(1));
    require_number(&mut report, Field::Memory, &draft.tfconfig.memory, "Memory size is required", Some(1));
    require_number(&mut report, Field::Drive, &draft.tfconfig.drive, "Storage size is required", None);

    report
}

fn require_text(report: &mut ValidationReport, field: Field, value: &str, message: &str) {
    if value.trim().is_empty() {
        report.reject(field, message);
    }
}

fn require_number(report: &mut ValidationReport, field: Field, value: &str, required: &str, min: Option<i64>) {
    let t = value.trim();
    if t.is_empty() {
        report.reject(field, required);
        return;
    }
    match parse_int(t) {
        Some(n) => {
            if let Some(min) = min {
                if n < min {
                    report.reject(field, format!("{} must be at least {}", field.label(), min));
                }
            }
        }
        None if t.parse::<f64>().is_ok() => {
            report.reject(field, format!("{} must be a whole number", field.label()))
        }
        None => report.reject(field, format!("{} must be a number", field.label())),
    }
}
