use serde::Serialize;

use super::draft::{BuildKind, OperatingSystem, WorkspaceDraft, WorkspaceKind};

/// Parameters an image catalog listing is fetched for. Doubles as the cache
/// key: a response is only applied while its query still matches the draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageQuery {
    pub project_id: String,
    pub workspace_kind: WorkspaceKind,
    pub build_kind: BuildKind,
    /// Only set for `cnv`; IDE images are not OS specific.
    pub os_filter: Option<OperatingSystem>,
}

impl ImageQuery {
    pub fn for_draft(draft: &WorkspaceDraft) -> Self {
        let os_filter = match draft.workspace_type {
            WorkspaceKind::Cnv => Some(draft.tfconfig.os),
            WorkspaceKind::Ide => None,
        };
        Self {
            project_id: draft.project_id.clone(),
            workspace_kind: draft.workspace_type,
            build_kind: draft.build_type,
            os_filter,
        }
    }

    /// Whether an image with the given declared type belongs in this listing.
    pub fn admits(&self, image_type: &str) -> bool {
        match self.os_filter {
            Some(os) => image_type.to_lowercase().contains(os.cnv_image_marker()),
            None => true,
        }
    }
}

impl std::fmt::Display for ImageQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.project_id, self.workspace_kind, self.build_kind)?;
        if let Some(os) = self.os_filter {
            write!(f, "/{}", os)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ide_queries_carry_no_os_filter() {
        let mut draft = WorkspaceDraft::new("proj", "me");
        draft.tfconfig.os = OperatingSystem::Windows;
        let q = ImageQuery::for_draft(&draft);
        assert_eq!(q.os_filter, None);
        assert!(q.admits("anything"));
    }

    #[test]
    fn cnv_queries_filter_by_os_marker() {
        let mut draft = WorkspaceDraft::new("proj", "me");
        draft.workspace_type = WorkspaceKind::Cnv;
        draft.tfconfig.os = OperatingSystem::Windows;
        let q = ImageQuery::for_draft(&draft);
        assert_eq!(q.os_filter, Some(OperatingSystem::Windows));
        assert!(q.admits("Windows_CNV_2022"));
        assert!(!q.admits("linux_cnv"));
        assert_eq!(q.to_string(), "proj/cnv/default/windows");
    }
}
