use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The keyword-derived descriptors attached to a Pattern or DerivedPrinciple
/// at creation time: what code areas it touches, which technologies are
/// involved, and what kind of task it applies to. Extracted once via the
/// fixed keyword tables in `guidewright-resolver` (§9 REDESIGN FLAG —
/// explicit, versioned data, not runtime configuration).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    pub touches: BTreeSet<String>,
    pub technologies: BTreeSet<String>,
    pub task_types: BTreeSet<String>,
}

impl Tags {
    pub fn new(
        touches: impl IntoIterator<Item = String>,
        technologies: impl IntoIterator<Item = String>,
        task_types: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            touches: touches.into_iter().collect(),
            technologies: technologies.into_iter().collect(),
            task_types: task_types.into_iter().collect(),
        }
    }

    pub fn touch_overlap_count(&self, other: &Tags) -> usize {
        self.touches.intersection(&other.touches).count()
    }

    pub fn technology_overlap_count(&self, other: &Tags) -> usize {
        self.technologies
            .intersection(&other.technologies)
            .count()
    }

    pub fn task_type_overlap_count(&self, other: &Tags) -> usize {
        self.task_types.intersection(&other.task_types).count()
    }

    pub fn has_any_overlap(&self, other: &Tags) -> bool {
        self.touch_overlap_count(other) > 0
            || self.technology_overlap_count(other) > 0
            || self.task_type_overlap_count(other) > 0
    }
}

/// The extracted descriptor of the work a warning bundle is being selected
/// for: `(touches, technologies, taskTypes, confidence)`. `confidence` is
/// the caller's own estimate of how well it understood the task, separate
/// from any pattern's `attributionConfidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProfile {
    pub tags: Tags,
    pub confidence: f64,
}

impl TaskProfile {
    pub fn new(tags: Tags, confidence: f64) -> Self {
        Self {
            tags,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// `TaskProfile.confidence < 0.5`, the threshold used in selector
    /// stages 1 and 7.
    pub fn is_low_confidence(&self) -> bool {
        self.confidence < 0.5
    }
}
