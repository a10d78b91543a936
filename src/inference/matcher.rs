use std::collections::HashSet;

use crate::catalog::HealthCatalog;
use crate::models::Condition;

/// Minimum fraction of a condition's required symptoms that must be
/// present before the condition is considered a candidate.
pub const MATCH_THRESHOLD: f64 = 0.30;

/// A condition scored against the detected-symptom set. Derived per turn,
/// never persisted.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub condition: &'a Condition,
    pub match_count: usize,
    pub match_ratio: f64,
}

/// Score every condition against the detected symptom ids and rank the
/// candidates that clear the threshold, best ratio first.
///
/// Equal ratios keep catalog declaration order (stable sort). Conditions
/// with an empty requirement set never match. An empty symptom set
/// short-circuits without scanning the catalog.
pub fn rank_conditions<'a>(
    catalog: &'a HealthCatalog,
    symptom_ids: &[&str],
) -> Vec<MatchResult<'a>> {
    if symptom_ids.is_empty() {
        return Vec::new();
    }

    let detected: HashSet<&str> = symptom_ids.iter().copied().collect();

    let mut results: Vec<MatchResult<'a>> = catalog
        .conditions()
        .iter()
        .filter_map(|condition| {
            if condition.required_symptoms.is_empty() {
                return None;
            }
            let match_count = condition
                .required_symptoms
                .iter()
                .filter(|id| detected.contains(id.as_str()))
                .count();
            let match_ratio = match_count as f64 / condition.required_symptoms.len() as f64;
            (match_ratio > MATCH_THRESHOLD).then_some(MatchResult {
                condition,
                match_count,
                match_ratio,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.match_ratio
            .partial_cmp(&a.match_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}
