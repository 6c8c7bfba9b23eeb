use guidewright_evidence::{AlertId, OccurrenceId, PatternId, SalienceIssueId};
use guidewright_store::KillSwitchState;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// At-most-once notification an external observer (dashboard, webhook
/// relay) may subscribe to. Engine calls push one of these whenever the
/// underlying operation produced the corresponding row; a dropped
/// `EventSink` loses the notification, never the underlying write (§6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PatternCreated { pattern_id: PatternId },
    OccurrenceCreated { occurrence_id: OccurrenceId },
    AlertPromoted { alert_id: AlertId, pattern_id: PatternId },
    KillSwitchChanged { new_state: KillSwitchState },
    SalienceDetected { salience_issue_id: SalienceIssueId },
}

/// Sink for `EngineEvent`s. Implementations must not block or fail the
/// calling operation — `emit` has no error return because a broken
/// observer is never a reason to abort an attribution or evolution pass.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Default sink: discards every event. Correct for callers that don't
/// need the emit surface at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: EngineEvent) {}
}

/// Sink backed by an unbounded mpsc channel, for callers that want to
/// drain events on a separate task. Send failures (no receiver left) are
/// swallowed, matching the at-most-once, best-effort delivery contract.
#[derive(Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<EngineEvent>,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<EngineEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.sender.send(event);
    }
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: EngineEvent) {
        (**self).emit(event);
    }
}
