use serde::{Deserialize, Serialize};

/// Per-`(workspace, project)` throttle state on pattern creation, driven by
/// rolling attribution-health metrics (§4.J). Exactly one row is
/// maintained per scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillSwitchState {
    Active,
    InferredPaused,
    FullyPaused,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillSwitchStatus {
    pub state: KillSwitchState,
    pub reason: String,
    pub entered_at_ms: u64,
    pub auto_resume_at_ms: Option<u64>,
}

impl KillSwitchStatus {
    pub fn initial(now_ms: u64) -> Self {
        Self {
            state: KillSwitchState::Active,
            reason: "initial state".into(),
            entered_at_ms: now_ms,
            auto_resume_at_ms: None,
        }
    }

    pub fn transition(
        &mut self,
        new_state: KillSwitchState,
        reason: impl Into<String>,
        now_ms: u64,
        auto_resume_at_ms: Option<u64>,
    ) {
        self.state = new_state;
        self.reason = reason.into();
        self.entered_at_ms = now_ms;
        self.auto_resume_at_ms = auto_resume_at_ms;
    }

    pub fn is_fully_paused(&self) -> bool {
        matches!(self.state, KillSwitchState::FullyPaused)
    }

    pub fn is_inferred_paused(&self) -> bool {
        matches!(self.state, KillSwitchState::InferredPaused)
    }
}
