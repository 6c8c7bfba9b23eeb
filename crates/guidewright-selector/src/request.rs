use guidewright_evidence::{Scope, Stage, TaskProfile};

const DEFAULT_MAX_WARNINGS: usize = 6;

/// Input to the injection selector: the scope and target document being
/// assembled, the caller's best guess at what the task touches, and the
/// knobs that gate stage 4 and the `maxWarnings` cap across stages 1-6
/// (§4.I).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRequest {
    pub scope: Scope,
    pub target: Stage,
    pub task_profile: TaskProfile,
    pub max_warnings: usize,
    pub cross_project_opt_in: bool,
}

impl SelectionRequest {
    pub fn new(scope: Scope, target: Stage, task_profile: TaskProfile) -> Self {
        Self {
            scope,
            target,
            task_profile,
            max_warnings: DEFAULT_MAX_WARNINGS,
            cross_project_opt_in: false,
        }
    }

    pub fn with_max_warnings(mut self, max_warnings: usize) -> Self {
        self.max_warnings = max_warnings;
        self
    }

    pub fn with_cross_project_opt_in(mut self, opt_in: bool) -> Self {
        self.cross_project_opt_in = opt_in;
        self
    }
}
