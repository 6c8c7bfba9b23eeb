use serde::{Deserialize, Serialize};
use std::fmt;

/// How directly a carrier excerpt was quoted from the underlying document.
/// Ordered so `primaryCarrierQuoteType` can only move toward higher quality
/// (`Verbatim > Paraphrase > Inferred`) — `Pattern::upgrade_quote_type`
/// relies on this ordering to refuse downgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CarrierQuoteType {
    Inferred,
    Paraphrase,
    Verbatim,
}

impl fmt::Display for CarrierQuoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CarrierQuoteType::Verbatim => "verbatim",
            CarrierQuoteType::Paraphrase => "paraphrase",
            CarrierQuoteType::Inferred => "inferred",
        };
        write!(f, "{}", label)
    }
}

/// The nature of the instruction a carrier excerpt actually gives, as
/// judged by the Attribution Agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarrierInstructionKind {
    ExplicitlyHarmful,
    BenignButMissingGuardrails,
    Descriptive,
    Unknown,
}
