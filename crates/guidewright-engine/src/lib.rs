//! Facade tying the Attribution Orchestrator, the Injection Selector, the
//! Kill-Switch Controller, and the Evolution Processors behind one
//! `Engine` entry point, plus the optional `EngineEvent` emit surface
//! (§6) those subsystems' results are translated into.

mod engine;
mod error;
mod event;

pub use engine::{Engine, EvolutionReport};
pub use error::EngineError;
pub use event::{ChannelSink, EngineEvent, EventSink, NullSink};
