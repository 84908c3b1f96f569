use std::collections::BTreeMap;

use super::weights::COMPONENT_WEIGHTS;

pub const MAX_SKILL_LEVEL: u8 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillCoverage {
    /// Average normalised level over the required skills (0.0〜1.0).
    pub coverage: f64,
    /// Required skills at full level.
    pub mastered: Vec<String>,
    /// Required skills the person does not have at all (level 0 or absent).
    pub missing: Vec<String>,
    pub no_requirements: bool,
}

/// Required skill coverage: each required skill contributes `level / 10`,
/// absent skills contribute 0, and the contributions are averaged.
pub fn check_required_skills(
    possessed: &BTreeMap<String, u8>,
    required: &[String],
) -> SkillCoverage {
    if required.is_empty() {
        return SkillCoverage {
            coverage: 1.0,
            mastered: vec![],
            missing: vec![],
            no_requirements: true,
        };
    }

    let mut total = 0.0;
    let mut mastered = Vec::new();
    let mut missing = Vec::new();

    for skill in required {
        let level = possessed
            .get(skill)
            .copied()
            .unwrap_or(0)
            .min(MAX_SKILL_LEVEL);
        total += f64::from(level) / f64::from(MAX_SKILL_LEVEL);

        if level == 0 {
            missing.push(skill.clone());
        } else if level == MAX_SKILL_LEVEL {
            mastered.push(skill.clone());
        }
    }

    SkillCoverage {
        coverage: total / required.len() as f64,
        mastered,
        missing,
        no_requirements: false,
    }
}

/// Skill sub-score (0〜50). A role without required skills gets full credit.
pub fn score_skills(possessed: &BTreeMap<String, u8>, required: &[String]) -> f64 {
    check_required_skills(possessed, required).coverage * COMPONENT_WEIGHTS.skills
}
