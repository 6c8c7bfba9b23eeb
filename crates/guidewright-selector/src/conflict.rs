use crate::types::SelectedWarning;
use std::collections::HashMap;

/// Optional post-processor (§4.I "Conflict resolution"): group warnings
/// sharing a conflict key and keep only the one with the highest category
/// precedence, tie-broken by the warning's own priority. Warnings with no
/// conflict key (`None`) are never grouped and always pass through.
pub fn resolve_conflicts(warnings: Vec<SelectedWarning>) -> Vec<SelectedWarning> {
    let mut groups: HashMap<String, Vec<SelectedWarning>> = HashMap::new();
    let mut passthrough = Vec::new();

    for warning in warnings {
        match warning.conflict_key.clone() {
            Some(key) => groups.entry(key).or_default().push(warning),
            None => passthrough.push(warning),
        }
    }

    let mut resolved: Vec<SelectedWarning> = groups
        .into_values()
        .map(|mut group| {
            group.sort_by(|a, b| {
                b.category
                    .precedence()
                    .cmp(&a.category.precedence())
                    .then(b.priority.partial_cmp(&a.priority).unwrap())
            });
            group.into_iter().next().expect("group is never empty")
        })
        .collect();

    resolved.append(&mut passthrough);
    resolved
}
