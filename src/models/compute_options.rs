use super::draft::WorkspaceKind;

/// Allowed compute values for one workspace kind, in display order.
#[derive(Debug, PartialEq, Eq)]
pub struct ComputeOptions {
    pub cpu: &'static [&'static str],
    /// GB
    pub memory: &'static [&'static str],
    /// GB
    pub drive: &'static [&'static str],
}

pub static IDE_COMPUTES: ComputeOptions = ComputeOptions {
    cpu: &["1", "2", "3", "4"],
    memory: &["2", "4", "6", "8"],
    drive: &["10", "20", "30", "40"],
};

pub static CNV_COMPUTES: ComputeOptions = ComputeOptions {
    cpu: &["2", "4", "8", "16"],
    memory: &["4", "8", "16", "32"],
    drive: &["60", "80", "100", "120"],
};

impl ComputeOptions {
    pub fn for_kind(kind: WorkspaceKind) -> &'static ComputeOptions {
        match kind {
            WorkspaceKind::Ide => &IDE_COMPUTES,
            WorkspaceKind::Cnv => &CNV_COMPUTES,
        }
    }

    pub fn allows_drive(&self, drive: &str) -> bool {
        self.drive.iter().any(|d| *d == drive.trim())
    }
}
