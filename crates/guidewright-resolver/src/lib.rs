//! Deterministic decision logic for attributing a finding's cause: the
//! seven-rule Failure-Mode Resolver (§4.E), the guidance-vs-execution
//! Noncompliance Checker (§4.F), and the fixed keyword/decision-class
//! tables used to tag and bucket findings (§4.G, §9 REDESIGN FLAG).

mod decision_class;
mod failure_mode_resolver;
mod keywords;
mod noncompliance_checker;

pub use decision_class::{classify_decision, classify_decision_finding, DecisionClass};
pub use failure_mode_resolver::{FailureModeResolver, Reasoning};
pub use keywords::extract_tags;
pub use noncompliance_checker::{ExecutionNoncomplianceDraft, NoncomplianceChecker, PossibleCause};
