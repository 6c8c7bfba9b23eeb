use serde::{Deserialize, Serialize};
use std::fmt;

/// Which carrier document a piece of guidance lives in, and which document
/// an injected warning is destined for. The injection selector's
/// `carrierStage == target` filter (§4.I stage 3) and `injectInto` field on
/// principles compare values of this same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    ContextPack,
    Spec,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::ContextPack => "context-pack",
            Stage::Spec => "spec",
        };
        write!(f, "{}", label)
    }
}

/// Where a `DerivedPrinciple` or Pattern may be injected: one specific
/// stage, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjectionTarget {
    Only(Stage),
    Both,
}

impl InjectionTarget {
    pub fn matches(&self, stage: Stage) -> bool {
        match self {
            InjectionTarget::Only(s) => *s == stage,
            InjectionTarget::Both => true,
        }
    }
}
