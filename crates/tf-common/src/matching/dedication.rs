use std::collections::BTreeMap;

use super::weights::COMPONENT_WEIGHTS;
use crate::Modality;

/// Dedication sub-score (0〜10).
///
/// Total allocation at or above what the modality requires earns full credit;
/// anything less earns proportional credit. Excess capacity is not rewarded.
pub fn score_dedication(dedication: &BTreeMap<String, i64>, modality: Modality) -> f64 {
    let total: i64 = dedication.values().sum();
    let required = modality.required_dedication();

    if total >= required {
        return COMPONENT_WEIGHTS.dedication;
    }

    let ratio = (total as f64 / required as f64).max(0.0);
    ratio * COMPONENT_WEIGHTS.dedication
}
