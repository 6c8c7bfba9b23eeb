use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_newtype!(WorkspaceId);
uuid_newtype!(ProjectId);
uuid_newtype!(PatternId);
uuid_newtype!(OccurrenceId);
uuid_newtype!(PrincipleId);
uuid_newtype!(FindingId);
uuid_newtype!(NoncomplianceId);
uuid_newtype!(DocUpdateRequestId);
uuid_newtype!(TaggingMissId);
uuid_newtype!(InjectionLogId);
uuid_newtype!(AlertId);
uuid_newtype!(SalienceIssueId);
uuid_newtype!(OutcomeId);

/// The `(WorkspaceId, ProjectId)` pair every scoped entity and store
/// operation is keyed by. Workspace and project identifiers are immutable
/// after creation and required on every scoped entity; two scopes never
/// share state, and the reference in-memory store gives each its own lock
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
}

impl Scope {
    pub fn new(workspace_id: WorkspaceId, project_id: ProjectId) -> Self {
        Self {
            workspace_id,
            project_id,
        }
    }

    /// Whether `other` is a different project within the *same* workspace —
    /// the condition the injection selector's cross-project stage gates on.
    pub fn is_cross_project_sibling_of(&self, other: &Scope) -> bool {
        self.workspace_id == other.workspace_id && self.project_id != other.project_id
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.workspace_id, self.project_id)
    }
}

/// Lifecycle of a project scope, as tracked by the store. The injection
/// selector returns an empty bundle for any non-`Active` project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Active,
    Archived,
}
