use crate::error::StoreError;
use crate::kill_switch_status::KillSwitchStatus;
use crate::pattern::{Pattern, PatternKey};
use crate::principle::DerivedPrinciple;
use crate::secondary::{
    AlertStatus, AttributionOutcome, DocUpdateRequest, DocUpdateStatus, ExecutionNoncompliance,
    InjectionLog, ProvisionalAlert, SalienceIssue, SalienceStatus, TaggingMiss,
};
use crate::sha256_key::Sha256Key;
use async_trait::async_trait;
use guidewright_evidence::{
    AlertId, ContentHash, OccurrenceId, OutcomeId, PatternId, PrincipleId, ProjectId,
    SalienceIssueId, Scope, WorkspaceId,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::occurrence::PatternOccurrence;

/// Scoped, content-addressed storage for every entity the engine mutates.
/// Patterns, occurrences, and the secondary outcome records are scoped to
/// `(workspace, project)`; `DerivedPrinciple` and `KillSwitchStatus` use
/// workspace- and scope-level buckets respectively, matching §3's "global <
/// workspace < project" hierarchy. Operations on distinct scopes are
/// independent and may run concurrently.
#[async_trait]
pub trait Store: Send + Sync {
    async fn register_scope(&self, scope: Scope, now_ms: u64) -> Result<(), StoreError>;
    async fn archive_scope(&self, scope: Scope) -> Result<(), StoreError>;
    async fn is_scope_archived(&self, scope: &Scope) -> Result<bool, StoreError>;

    async fn put_pattern(&self, pattern: Pattern) -> Result<(), StoreError>;
    async fn get_pattern(&self, scope: &Scope, id: PatternId) -> Result<Pattern, StoreError>;
    async fn find_active_pattern_by_key(
        &self,
        scope: &Scope,
        key: PatternKey,
    ) -> Result<Option<Pattern>, StoreError>;
    async fn list_active_patterns(&self, scope: &Scope) -> Result<Vec<Pattern>, StoreError>;
    /// Every active pattern in `workspace_id` outside of `exclude_project` —
    /// the feed for the injection selector's cross-project stage (§4.I
    /// stage 4).
    async fn list_active_patterns_in_workspace_excluding(
        &self,
        workspace_id: WorkspaceId,
        exclude_project: ProjectId,
    ) -> Result<Vec<Pattern>, StoreError>;

    async fn put_occurrence(
        &self,
        scope: &Scope,
        occurrence: PatternOccurrence,
    ) -> Result<(), StoreError>;
    async fn get_occurrence(
        &self,
        scope: &Scope,
        id: OccurrenceId,
    ) -> Result<PatternOccurrence, StoreError>;
    async fn list_occurrences(
        &self,
        scope: &Scope,
        pattern_id: PatternId,
    ) -> Result<Vec<PatternOccurrence>, StoreError>;
    async fn list_occurrences_since(
        &self,
        scope: &Scope,
        since_ms: u64,
    ) -> Result<Vec<PatternOccurrence>, StoreError>;

    async fn put_principle(
        &self,
        workspace_id: WorkspaceId,
        principle: DerivedPrinciple,
    ) -> Result<(), StoreError>;
    async fn find_principle_by_promotion_key(
        &self,
        workspace_id: WorkspaceId,
        promotion_key: ContentHash,
    ) -> Result<Option<DerivedPrinciple>, StoreError>;
    async fn list_principles(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<DerivedPrinciple>, StoreError>;

    async fn put_noncompliance(
        &self,
        scope: &Scope,
        record: ExecutionNoncompliance,
    ) -> Result<(), StoreError>;
    async fn put_doc_update_request(
        &self,
        scope: &Scope,
        request: DocUpdateRequest,
    ) -> Result<(), StoreError>;
    async fn count_doc_update_requests_with_status(
        &self,
        scope: &Scope,
        status: DocUpdateStatus,
    ) -> Result<usize, StoreError>;
    /// Every `DocUpdateRequest` ever recorded in `scope`, regardless of
    /// status — the feed the orchestrator scans to count same-`DecisionClass`
    /// recurrence (§4.G step 6).
    async fn list_doc_update_requests(&self, scope: &Scope) -> Result<Vec<DocUpdateRequest>, StoreError>;
    async fn put_tagging_miss(&self, scope: &Scope, miss: TaggingMiss) -> Result<(), StoreError>;
    async fn put_injection_log(&self, scope: &Scope, log: InjectionLog) -> Result<(), StoreError>;

    async fn put_alert(&self, scope: &Scope, alert: ProvisionalAlert) -> Result<(), StoreError>;
    async fn get_alert(&self, scope: &Scope, id: AlertId) -> Result<ProvisionalAlert, StoreError>;
    async fn list_alerts_with_status(
        &self,
        scope: &Scope,
        status: AlertStatus,
    ) -> Result<Vec<ProvisionalAlert>, StoreError>;
    async fn update_alert(
        &self,
        scope: &Scope,
        id: AlertId,
        new: ProvisionalAlert,
    ) -> Result<(), StoreError>;

    async fn put_salience_issue(&self, scope: &Scope, issue: SalienceIssue) -> Result<(), StoreError>;
    async fn find_salience_issue_by_location_hash(
        &self,
        scope: &Scope,
        location_hash: Sha256Key,
    ) -> Result<Option<SalienceIssue>, StoreError>;
    async fn list_pending_salience_issues(
        &self,
        scope: &Scope,
    ) -> Result<Vec<SalienceIssue>, StoreError>;
    async fn update_salience_issue(
        &self,
        scope: &Scope,
        id: SalienceIssueId,
        new: SalienceIssue,
    ) -> Result<(), StoreError>;

    async fn put_outcome(&self, scope: &Scope, outcome: AttributionOutcome) -> Result<(), StoreError>;
    async fn update_outcome(
        &self,
        scope: &Scope,
        id: OutcomeId,
        new: AttributionOutcome,
    ) -> Result<(), StoreError>;
    async fn list_outcomes_since(
        &self,
        scope: &Scope,
        since_ms: u64,
    ) -> Result<Vec<AttributionOutcome>, StoreError>;

    async fn get_kill_switch_status(&self, scope: &Scope, now_ms: u64) -> Result<KillSwitchStatus, StoreError>;
    async fn put_kill_switch_status(
        &self,
        scope: &Scope,
        status: KillSwitchStatus,
    ) -> Result<(), StoreError>;
}

#[derive(Default)]
struct ScopeState {
    archived: bool,
    patterns: HashMap<PatternId, Pattern>,
    occurrences: HashMap<PatternId, Vec<PatternOccurrence>>,
    noncompliances: Vec<ExecutionNoncompliance>,
    doc_update_requests: Vec<DocUpdateRequest>,
    tagging_misses: Vec<TaggingMiss>,
    injection_logs: Vec<InjectionLog>,
    alerts: HashMap<AlertId, ProvisionalAlert>,
    salience_issues: HashMap<Sha256Key, SalienceIssue>,
    outcomes: Vec<AttributionOutcome>,
    kill_switch: Option<KillSwitchStatus>,
}

#[derive(Default)]
struct WorkspaceState {
    principles: HashMap<PrincipleId, DerivedPrinciple>,
}

/// Reference in-memory implementation. Each `(workspace, project)` scope
/// gets its own `RwLock` bucket so distinct projects never contend on the
/// same lock; a separate per-workspace bucket holds `DerivedPrinciple`
/// rows, since those are workspace-scoped rather than project-scoped (§3).
pub struct InMemoryStore {
    scopes: RwLock<HashMap<Scope, Arc<RwLock<ScopeState>>>>,
    workspaces: RwLock<HashMap<WorkspaceId, Arc<RwLock<WorkspaceState>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            scopes: RwLock::new(HashMap::new()),
            workspaces: RwLock::new(HashMap::new()),
        }
    }

    async fn bucket(&self, scope: &Scope) -> Result<Arc<RwLock<ScopeState>>, StoreError> {
        if let Some(bucket) = self.scopes.read().await.get(scope) {
            return Ok(bucket.clone());
        }
        Err(StoreError::ScopeNotFound(*scope))
    }

    async fn active_bucket(&self, scope: &Scope) -> Result<Arc<RwLock<ScopeState>>, StoreError> {
        let bucket = self.bucket(scope).await?;
        if bucket.read().await.archived {
            return Err(StoreError::ScopeArchived(*scope));
        }
        Ok(bucket)
    }

    async fn workspace_bucket(&self, workspace_id: WorkspaceId) -> Arc<RwLock<WorkspaceState>> {
        if let Some(bucket) = self.workspaces.read().await.get(&workspace_id) {
            return bucket.clone();
        }
        let mut workspaces = self.workspaces.write().await;
        workspaces
            .entry(workspace_id)
            .or_insert_with(|| Arc::new(RwLock::new(WorkspaceState::default())))
            .clone()
    }

    async fn scopes_in_workspace(&self, workspace_id: WorkspaceId) -> Vec<(Scope, Arc<RwLock<ScopeState>>)> {
        self.scopes
            .read()
            .await
            .iter()
            .filter(|(scope, _)| scope.workspace_id == workspace_id)
            .map(|(scope, bucket)| (*scope, bucket.clone()))
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn register_scope(&self, scope: Scope, now_ms: u64) -> Result<(), StoreError> {
        let mut scopes = self.scopes.write().await;
        let bucket = scopes
            .entry(scope)
            .or_insert_with(|| Arc::new(RwLock::new(ScopeState::default())))
            .clone();
        drop(scopes);
        let mut state = bucket.write().await;
        if state.kill_switch.is_none() {
            state.kill_switch = Some(KillSwitchStatus::initial(now_ms));
        }
        Ok(())
    }

    async fn archive_scope(&self, scope: Scope) -> Result<(), StoreError> {
        let bucket = self.bucket(&scope).await?;
        bucket.write().await.archived = true;
        Ok(())
    }

    async fn is_scope_archived(&self, scope: &Scope) -> Result<bool, StoreError> {
        let bucket = self.bucket(scope).await?;
        Ok(bucket.read().await.archived)
    }

    async fn put_pattern(&self, pattern: Pattern) -> Result<(), StoreError> {
        let scope = pattern.scope;
        let bucket = self.active_bucket(&scope).await?;
        let mut state = bucket.write().await;
        state.patterns.insert(pattern.id, pattern);
        Ok(())
    }

    async fn get_pattern(&self, scope: &Scope, id: PatternId) -> Result<Pattern, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        state.patterns.get(&id).cloned().ok_or(StoreError::PatternNotFound(id))
    }

    async fn find_active_pattern_by_key(
        &self,
        scope: &Scope,
        key: PatternKey,
    ) -> Result<Option<Pattern>, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state
            .patterns
            .values()
            .find(|p| p.is_active() && p.pattern_key == key)
            .cloned())
    }

    async fn list_active_patterns(&self, scope: &Scope) -> Result<Vec<Pattern>, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state.patterns.values().filter(|p| p.is_active()).cloned().collect())
    }

    async fn list_active_patterns_in_workspace_excluding(
        &self,
        workspace_id: WorkspaceId,
        exclude_project: ProjectId,
    ) -> Result<Vec<Pattern>, StoreError> {
        let mut out = Vec::new();
        for (scope, bucket) in self.scopes_in_workspace(workspace_id).await {
            if scope.project_id == exclude_project {
                continue;
            }
            let state = bucket.read().await;
            out.extend(state.patterns.values().filter(|p| p.is_active()).cloned());
        }
        Ok(out)
    }

    async fn put_occurrence(
        &self,
        scope: &Scope,
        occurrence: PatternOccurrence,
    ) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        let mut state = bucket.write().await;
        state.occurrences.entry(occurrence.pattern_id).or_default().push(occurrence);
        Ok(())
    }

    async fn get_occurrence(
        &self,
        scope: &Scope,
        id: OccurrenceId,
    ) -> Result<PatternOccurrence, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        state
            .occurrences
            .values()
            .flatten()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| StoreError::InvalidInput(format!("occurrence {} not found", id.as_uuid())))
    }

    async fn list_occurrences(
        &self,
        scope: &Scope,
        pattern_id: PatternId,
    ) -> Result<Vec<PatternOccurrence>, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state.occurrences.get(&pattern_id).cloned().unwrap_or_default())
    }

    async fn list_occurrences_since(
        &self,
        scope: &Scope,
        since_ms: u64,
    ) -> Result<Vec<PatternOccurrence>, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state
            .occurrences
            .values()
            .flatten()
            .filter(|o| o.created_at_ms >= since_ms)
            .cloned()
            .collect())
    }

    async fn put_principle(
        &self,
        workspace_id: WorkspaceId,
        principle: DerivedPrinciple,
    ) -> Result<(), StoreError> {
        let bucket = self.workspace_bucket(workspace_id).await;
        bucket.write().await.principles.insert(principle.id, principle);
        Ok(())
    }

    async fn find_principle_by_promotion_key(
        &self,
        workspace_id: WorkspaceId,
        promotion_key: ContentHash,
    ) -> Result<Option<DerivedPrinciple>, StoreError> {
        let bucket = self.workspace_bucket(workspace_id).await;
        let state = bucket.read().await;
        Ok(state
            .principles
            .values()
            .find(|p| p.promotion_key == Some(promotion_key))
            .cloned())
    }

    async fn list_principles(&self, workspace_id: WorkspaceId) -> Result<Vec<DerivedPrinciple>, StoreError> {
        let bucket = self.workspace_bucket(workspace_id).await;
        let state = bucket.read().await;
        Ok(state.principles.values().cloned().collect())
    }

    async fn put_noncompliance(
        &self,
        scope: &Scope,
        record: ExecutionNoncompliance,
    ) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        bucket.write().await.noncompliances.push(record);
        Ok(())
    }

    async fn put_doc_update_request(
        &self,
        scope: &Scope,
        request: DocUpdateRequest,
    ) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        bucket.write().await.doc_update_requests.push(request);
        Ok(())
    }

    async fn count_doc_update_requests_with_status(
        &self,
        scope: &Scope,
        status: DocUpdateStatus,
    ) -> Result<usize, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state
            .doc_update_requests
            .iter()
            .filter(|r| r.status == status)
            .count())
    }

    async fn list_doc_update_requests(&self, scope: &Scope) -> Result<Vec<DocUpdateRequest>, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state.doc_update_requests.clone())
    }

    async fn put_tagging_miss(&self, scope: &Scope, miss: TaggingMiss) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        bucket.write().await.tagging_misses.push(miss);
        Ok(())
    }

    async fn put_injection_log(&self, scope: &Scope, log: InjectionLog) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        bucket.write().await.injection_logs.push(log);
        Ok(())
    }

    async fn put_alert(&self, scope: &Scope, alert: ProvisionalAlert) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        bucket.write().await.alerts.insert(alert.id, alert);
        Ok(())
    }

    async fn get_alert(&self, scope: &Scope, id: AlertId) -> Result<ProvisionalAlert, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        state
            .alerts
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::InvalidInput(format!("alert {} not found", id)))
    }

    async fn list_alerts_with_status(
        &self,
        scope: &Scope,
        status: AlertStatus,
    ) -> Result<Vec<ProvisionalAlert>, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state.alerts.values().filter(|a| a.status == status).cloned().collect())
    }

    async fn update_alert(
        &self,
        scope: &Scope,
        id: AlertId,
        new: ProvisionalAlert,
    ) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        let mut state = bucket.write().await;
        if !state.alerts.contains_key(&id) {
            return Err(StoreError::InvalidInput(format!("alert {} not found", id)));
        }
        state.alerts.insert(id, new);
        Ok(())
    }

    async fn put_salience_issue(&self, scope: &Scope, issue: SalienceIssue) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        bucket.write().await.salience_issues.insert(issue.location_hash, issue);
        Ok(())
    }

    async fn find_salience_issue_by_location_hash(
        &self,
        scope: &Scope,
        location_hash: Sha256Key,
    ) -> Result<Option<SalienceIssue>, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state.salience_issues.get(&location_hash).cloned())
    }

    async fn list_pending_salience_issues(&self, scope: &Scope) -> Result<Vec<SalienceIssue>, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state
            .salience_issues
            .values()
            .filter(|i| i.status == SalienceStatus::Pending)
            .cloned()
            .collect())
    }

    async fn update_salience_issue(
        &self,
        scope: &Scope,
        id: SalienceIssueId,
        new: SalienceIssue,
    ) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        let mut state = bucket.write().await;
        let key = state
            .salience_issues
            .values()
            .find(|i| i.id == id)
            .map(|i| i.location_hash)
            .ok_or_else(|| StoreError::InvalidInput(format!("salience issue {} not found", id.as_uuid())))?;
        state.salience_issues.insert(key, new);
        Ok(())
    }

    async fn put_outcome(&self, scope: &Scope, outcome: AttributionOutcome) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        bucket.write().await.outcomes.push(outcome);
        Ok(())
    }

    async fn update_outcome(
        &self,
        scope: &Scope,
        id: OutcomeId,
        new: AttributionOutcome,
    ) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        let mut state = bucket.write().await;
        let slot = state
            .outcomes
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::InvalidInput(format!("outcome {} not found", id.as_uuid())))?;
        *slot = new;
        Ok(())
    }

    async fn list_outcomes_since(
        &self,
        scope: &Scope,
        since_ms: u64,
    ) -> Result<Vec<AttributionOutcome>, StoreError> {
        let bucket = self.bucket(scope).await?;
        let state = bucket.read().await;
        Ok(state
            .outcomes
            .iter()
            .filter(|o| o.created_at_ms >= since_ms)
            .cloned()
            .collect())
    }

    async fn get_kill_switch_status(&self, scope: &Scope, now_ms: u64) -> Result<KillSwitchStatus, StoreError> {
        let bucket = self.bucket(scope).await?;
        let mut state = bucket.write().await;
        if state.kill_switch.is_none() {
            state.kill_switch = Some(KillSwitchStatus::initial(now_ms));
        }
        Ok(state.kill_switch.clone().expect("just initialised"))
    }

    async fn put_kill_switch_status(
        &self,
        scope: &Scope,
        status: KillSwitchStatus,
    ) -> Result<(), StoreError> {
        let bucket = self.active_bucket(scope).await?;
        bucket.write().await.kill_switch = Some(status);
        Ok(())
    }
}
