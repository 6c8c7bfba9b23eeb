use guidewright_evidence::{AlertId, PatternId, PrincipleId};

/// What produced a selected warning, carrying the originating entity's id
/// so a caller can trace a warning back to its Pattern/Principle/Alert row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSource {
    BaselinePrinciple(PrincipleId),
    DerivedPrinciple(PrincipleId),
    Pattern(PatternId),
    ProvisionalAlert(AlertId),
}

/// Fixed category precedence used by the conflict-resolution post-processor:
/// `security(5) > privacy(4) > backcompat(3) > correctness(2) > other(1)`
/// (§4.I).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCategory {
    Security,
    Privacy,
    Backcompat,
    Correctness,
    Other,
}

impl WarningCategory {
    pub fn precedence(&self) -> u8 {
        match self {
            WarningCategory::Security => 5,
            WarningCategory::Privacy => 4,
            WarningCategory::Backcompat => 3,
            WarningCategory::Correctness => 2,
            WarningCategory::Other => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedWarning {
    pub source: WarningSource,
    pub text: String,
    pub category: WarningCategory,
    pub priority: f64,
    /// An optional grouping key the caller can assign post-hoc (e.g. by
    /// file path or topic) for the conflict-resolution post-processor.
    /// The selector itself never sets this.
    pub conflict_key: Option<String>,
}

/// The selector's output: `warnings` respects `maxWarnings`; `alerts` are
/// additive and uncapped (§4.I stage 8).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InjectionBundle {
    pub warnings: Vec<SelectedWarning>,
    pub alerts: Vec<SelectedWarning>,
}
