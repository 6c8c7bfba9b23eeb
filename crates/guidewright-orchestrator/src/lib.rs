//! The Attribution Orchestrator: ties the Failure-Mode Resolver, the
//! Noncompliance Checker, the store, the kill-switch controller, and the
//! alert lifecycle job together into the fixed ten-step sequence a single
//! Finding goes through (§4.G).

mod error;
mod input;
mod orchestrator;
mod result;

pub use error::OrchestratorError;
pub use input::AttributionInput;
pub use orchestrator::run_attribution;
pub use result::AttributionResult;
