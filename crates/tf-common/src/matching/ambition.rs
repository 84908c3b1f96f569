use super::weights::COMPONENT_WEIGHTS;

/// Ambition sub-score: 15 on a case-insensitive exact match between the
/// person's aspiration level and the role level, 0 otherwise.
/// A missing aspiration is compared as an empty string.
pub fn score_ambition(aspiration_level: Option<&str>, role_level: &str) -> f64 {
    let aspiration = aspiration_level.unwrap_or_default().to_lowercase();
    if aspiration == role_level.to_lowercase() {
        COMPONENT_WEIGHTS.ambitions
    } else {
        0.0
    }
}
