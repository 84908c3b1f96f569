use super::weights::COMPONENT_WEIGHTS;
use crate::text::{pair_similarity, TextSimilarityError};

/// Joins a responsibility list into one pseudo-document.
pub fn to_document(responsibilities: &[String]) -> String {
    responsibilities.join(" ")
}

/// Responsibility sub-score (0〜25).
///
/// - no required responsibilities: full credit
/// - no current responsibilities: 0
/// - otherwise: TF-IDF cosine similarity of the two joined documents × 25,
///   in a vector space built from just these two documents
pub fn score_responsibilities(
    current: &[String],
    required: &[String],
) -> Result<f64, TextSimilarityError> {
    if required.is_empty() {
        return Ok(COMPONENT_WEIGHTS.responsibilities);
    }
    if current.is_empty() {
        return Ok(0.0);
    }

    let similarity = pair_similarity(&to_document(current), &to_document(required))?;
    Ok(similarity * COMPONENT_WEIGHTS.responsibilities)
}
