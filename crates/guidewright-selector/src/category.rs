use crate::types::WarningCategory;
use guidewright_evidence::ScoutType;
use guidewright_store::Pattern;

/// A Pattern doesn't carry an explicit warning category, so the category
/// used by the conflict-resolution precedence is inferred from its tags
/// and finding category: an explicit `privacy`/`backcompat` tag wins over
/// the scout-type-derived default, since those tags are the more specific
/// signal when present.
pub fn infer_category(pattern: &Pattern) -> WarningCategory {
    if pattern.tags.touches.contains("privacy") || pattern.tags.technologies.contains("privacy") {
        return WarningCategory::Privacy;
    }
    if pattern.tags.touches.contains("backcompat")
        || pattern.tags.task_types.contains("breaking-change")
    {
        return WarningCategory::Backcompat;
    }
    match pattern.finding_category {
        ScoutType::Security | ScoutType::Adversarial => WarningCategory::Security,
        ScoutType::Bugs => WarningCategory::Correctness,
        ScoutType::Docs | ScoutType::Spec | ScoutType::Tests | ScoutType::Decisions => {
            WarningCategory::Other
        }
    }
}
