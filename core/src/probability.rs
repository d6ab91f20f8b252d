use std::collections::BTreeMap;

use crate::error::PathError;
use crate::graph::Path;
use crate::traversal::PathCosts;

/// Probability of each enumerated path being the one taken.
pub type PathProbabilities = BTreeMap<Path, f64>;

/// Turn path costs into a distribution that favors cheaper paths.
///
/// Each path weighs `1 - cost / total`, where `total` sums every path's cost,
/// and the weights are normalized to sum to 1. A single path gets exactly
/// 1.0; no paths give an empty map. If every cost is zero the distribution
/// is uniform.
pub fn path_probabilities(paths: &PathCosts) -> Result<PathProbabilities, PathError> {
    if let Some(&bad) = paths.values().find(|c| !c.is_finite() || **c < 0.0) {
        return Err(PathError::InvalidCost(bad));
    }

    match paths.len() {
        0 => return Ok(PathProbabilities::new()),
        1 => return Ok(paths.keys().map(|p| (p.clone(), 1.0)).collect()),
        _ => {}
    }

    let net_total: f64 = paths.values().sum();
    if net_total == 0.0 {
        let uniform = 1.0 / paths.len() as f64;
        return Ok(paths.keys().map(|p| (p.clone(), uniform)).collect());
    }

    let raw: Vec<(&Path, f64)> = paths
        .iter()
        .map(|(p, &cost)| (p, 1.0 - cost / net_total))
        .collect();
    let normalization: f64 = raw.iter().map(|(_, w)| w).sum();

    Ok(raw
        .into_iter()
        .map(|(p, w)| (p.clone(), w / normalization))
        .collect())
}

/// Paths ordered by descending probability; equal probabilities keep path order.
pub fn ranked(probabilities: &PathProbabilities) -> Vec<(&Path, f64)> {
    let mut ranked: Vec<(&Path, f64)> = probabilities.iter().map(|(p, &pr)| (p, pr)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}
