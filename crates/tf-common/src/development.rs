use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::UNKNOWN_LEVEL;
use crate::matching::CompatibilityScore;
use crate::{FutureRole, Person, RoleDefinition};

pub const NO_SIGNIFICANT_GAP: &str = "No significant skill gap identified";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill_id: String,
    /// catalog display name, or the id when the catalog has none
    pub skill_name: String,
    pub current_level: u8,
}

impl SkillGap {
    pub fn describe(&self) -> String {
        format!("{} (current level: {}/10)", self.skill_name, self.current_level)
    }
}

/// Required skills the person holds below `gap_level`, in requirement order.
pub fn skill_gaps(
    person: &Person,
    role_def: &RoleDefinition,
    skill_names: &HashMap<String, String>,
    gap_level: u8,
) -> Vec<SkillGap> {
    role_def
        .required_skills
        .iter()
        .filter_map(|skill_id| {
            let current_level = person.skills.get(skill_id).copied().unwrap_or(0);
            (current_level < gap_level).then(|| SkillGap {
                skill_id: skill_id.clone(),
                skill_name: skill_names
                    .get(skill_id)
                    .cloned()
                    .unwrap_or_else(|| skill_id.clone()),
                current_level,
            })
        })
        .collect()
}

/// Everything a narrative/plan generator needs about one person and one target role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentBrief {
    pub person_id: u64,
    pub person_name: String,
    pub current_role: String,
    pub future_role_title: String,
    /// total compatibility rounded to two decimals
    pub score: f64,
    pub aspiration_level: String,
    pub role_level: String,
    pub skill_gaps: Vec<SkillGap>,
}

impl DevelopmentBrief {
    pub fn build(
        person: &Person,
        future_role: &FutureRole,
        role_def: &RoleDefinition,
        score: &CompatibilityScore,
        skill_names: &HashMap<String, String>,
        gap_level: u8,
    ) -> Self {
        Self {
            person_id: person.id,
            person_name: person.name.clone(),
            current_role: person.current_role.clone(),
            future_role_title: future_role.title.clone(),
            score: (score.total * 100.0).round() / 100.0,
            aspiration_level: person
                .aspiration_level()
                .unwrap_or(UNKNOWN_LEVEL)
                .to_string(),
            role_level: role_def.level_or_unknown().to_string(),
            skill_gaps: skill_gaps(person, role_def, skill_names, gap_level),
        }
    }

    pub fn gap_summary(&self) -> String {
        if self.skill_gaps.is_empty() {
            return NO_SIGNIFICANT_GAP.to_string();
        }
        self.skill_gaps
            .iter()
            .map(SkillGap::describe)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
