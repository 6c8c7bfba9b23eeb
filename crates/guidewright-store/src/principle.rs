use guidewright_evidence::{ContentHash, InjectionTarget, PatternId, PrincipleId, Tags, WorkspaceId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipleOrigin {
    /// Seeded before the engine ever ran; never archived, never re-derived.
    Baseline,
    /// Promoted from one or more patterns by the evolution pipeline (§4.K).
    Derived,
}

/// A standing piece of guidance injected into every matching task, scoped
/// to a workspace (not a single project — §3). Baseline principles are
/// seeded directly; derived principles are promoted from patterns and
/// freeze a `promotion_key` over the sorted source pattern ids so the same
/// set of patterns can never be promoted twice (§9 Open Question b).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPrinciple {
    pub id: PrincipleId,
    pub workspace_id: WorkspaceId,
    pub statement: String,
    pub origin: PrincipleOrigin,
    pub inject_into: InjectionTarget,
    pub permanent: bool,
    pub source_pattern_ids: Vec<PatternId>,
    pub promotion_key: Option<ContentHash>,
    pub tags: Tags,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl DerivedPrinciple {
    pub fn new_baseline(
        id: PrincipleId,
        workspace_id: WorkspaceId,
        statement: impl Into<String>,
        inject_into: InjectionTarget,
        tags: Tags,
        now_ms: u64,
    ) -> Self {
        Self {
            id,
            workspace_id,
            statement: statement.into(),
            origin: PrincipleOrigin::Baseline,
            inject_into,
            permanent: true,
            source_pattern_ids: vec![],
            promotion_key: None,
            tags,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }

    /// `promotionKey = BLAKE3(sorted(sourcePatternIds))`, computed once at
    /// promotion time and never recomputed afterward — later edits to the
    /// statement or tags don't change which pattern-set this principle
    /// represents (§9 Open Question b).
    pub fn compute_promotion_key(source_pattern_ids: &[PatternId]) -> ContentHash {
        let mut sorted: Vec<String> = source_pattern_ids.iter().map(|id| id.to_string()).collect();
        sorted.sort();
        ContentHash::hash(sorted.join("\0").as_bytes())
    }

    pub fn promote(
        id: PrincipleId,
        workspace_id: WorkspaceId,
        statement: impl Into<String>,
        inject_into: InjectionTarget,
        mut source_pattern_ids: Vec<PatternId>,
        tags: Tags,
        now_ms: u64,
    ) -> Self {
        source_pattern_ids.sort();
        let promotion_key = Self::compute_promotion_key(&source_pattern_ids);
        Self {
            id,
            workspace_id,
            statement: statement.into(),
            origin: PrincipleOrigin::Derived,
            inject_into,
            permanent: false,
            source_pattern_ids,
            promotion_key: Some(promotion_key),
            tags,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }

    pub fn is_baseline(&self) -> bool {
        matches!(self.origin, PrincipleOrigin::Baseline)
    }
}
