use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use tracing::debug;

use super::{
    ambition::score_ambition,
    dedication::score_dedication,
    readiness::ReadinessLabel,
    responsibilities::score_responsibilities,
    skills::check_required_skills,
    weights::COMPONENT_WEIGHTS,
};
use crate::config::ScoringConfig;
use crate::text::TextSimilarityError;
use crate::{FutureRole, Person, RoleDefinition, RoleLookup};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("responsibilities for role {role_id} have no comparable terms")]
    EmptyVocabulary { role_id: String },
}

impl ScoringError {
    fn from_text(role_id: &str, err: TextSimilarityError) -> Self {
        match err {
            TextSimilarityError::EmptyVocabulary => ScoringError::EmptyVocabulary {
                role_id: role_id.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    PerfectMatch,
    Match,
    PartialMatch,
    Miss,
}

impl MatchStatus {
    fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.9 {
            MatchStatus::PerfectMatch
        } else if ratio >= 0.7 {
            MatchStatus::Match
        } else if ratio >= 0.4 {
            MatchStatus::PartialMatch
        } else {
            MatchStatus::Miss
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub score: f64,
    pub max_score: f64,
    pub status: MatchStatus,
    pub details: String,
}

impl ComponentScore {
    fn new(score: f64, max_score: f64, details: impl Into<String>) -> Self {
        let ratio = if max_score > 0.0 { score / max_score } else { 0.0 };
        Self {
            score,
            max_score,
            status: MatchStatus::from_ratio(ratio),
            details: details.into(),
        }
    }

    fn undefined(max_score: f64) -> Self {
        Self {
            score: 0.0,
            max_score,
            status: MatchStatus::Miss,
            details: "role has no definition".into(),
        }
    }
}

/// Compatibility of one person with one future role, with its four components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub role_id: String,
    /// false when the future role had no catalog entry (total is then 0)
    pub role_defined: bool,
    /// 0〜100
    pub total: f64,
    pub skills: ComponentScore,
    pub responsibilities: ComponentScore,
    pub ambitions: ComponentScore,
    pub dedication: ComponentScore,
}

impl CompatibilityScore {
    fn undefined_role(role_id: &str) -> Self {
        Self {
            role_id: role_id.to_string(),
            role_defined: false,
            total: 0.0,
            skills: ComponentScore::undefined(COMPONENT_WEIGHTS.skills),
            responsibilities: ComponentScore::undefined(COMPONENT_WEIGHTS.responsibilities),
            ambitions: ComponentScore::undefined(COMPONENT_WEIGHTS.ambitions),
            dedication: ComponentScore::undefined(COMPONENT_WEIGHTS.dedication),
        }
    }

    /// Integer percent used for display and bucketing: rounded to two
    /// decimals, then truncated.
    pub fn display_percent(&self) -> u32 {
        let rounded = (self.total.clamp(0.0, 100.0) * 100.0).round() / 100.0;
        rounded.trunc() as u32
    }

    pub fn components(&self) -> [(&'static str, &ComponentScore); 4] {
        [
            ("skills", &self.skills),
            ("responsibilities", &self.responsibilities),
            ("ambitions", &self.ambitions),
            ("dedication", &self.dedication),
        ]
    }
}

/// Scores with the default engine.
pub fn calculate_total_compatibility(
    person: &Person,
    future_role: &FutureRole,
    roles: &RoleLookup,
) -> Result<CompatibilityScore, ScoringError> {
    CompatibilityEngine::default().calculate_total_compatibility(person, future_role, roles)
}

/// Stateless scorer; the config only drives labelling and aggregate reports.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityEngine {
    config: ScoringConfig,
}

impl CompatibilityEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn readiness(&self, score: &CompatibilityScore) -> ReadinessLabel {
        self.config.readiness.classify(score.display_percent())
    }

    /// Total compatibility (0〜100). A future role without a definition scores 0.
    pub fn calculate_total_compatibility(
        &self,
        person: &Person,
        future_role: &FutureRole,
        roles: &RoleLookup,
    ) -> Result<CompatibilityScore, ScoringError> {
        let Some(role_def) = roles.get(&future_role.id) else {
            debug!(
                person_id = person.id,
                role_id = %future_role.id,
                "future role has no definition; scoring as zero"
            );
            return Ok(CompatibilityScore::undefined_role(&future_role.id));
        };

        self.score_against_definition(person, future_role, role_def)
    }

    pub fn score_against_definition(
        &self,
        person: &Person,
        future_role: &FutureRole,
        role_def: &RoleDefinition,
    ) -> Result<CompatibilityScore, ScoringError> {
        let skills = self.score_skills(person, role_def);
        let responsibilities = self.score_responsibilities(person, role_def)?;
        let ambitions = self.score_ambitions(person, role_def);
        let dedication = self.score_dedication(person, future_role);

        let total = skills.score + responsibilities.score + ambitions.score + dedication.score;

        Ok(CompatibilityScore {
            role_id: future_role.id.clone(),
            role_defined: true,
            total,
            skills,
            responsibilities,
            ambitions,
            dedication,
        })
    }

    fn score_skills(&self, person: &Person, role_def: &RoleDefinition) -> ComponentScore {
        let coverage = check_required_skills(&person.skills, &role_def.required_skills);
        let score = coverage.coverage * COMPONENT_WEIGHTS.skills;

        let details = if coverage.no_requirements {
            "role requires no specific skills".to_string()
        } else {
            format!(
                "coverage {:.0}% of {} required (missing: {})",
                coverage.coverage * 100.0,
                role_def.required_skills.len(),
                if coverage.missing.is_empty() {
                    "none".to_string()
                } else {
                    coverage.missing.join(", ")
                }
            )
        };

        ComponentScore::new(score, COMPONENT_WEIGHTS.skills, details)
    }

    fn score_responsibilities(
        &self,
        person: &Person,
        role_def: &RoleDefinition,
    ) -> Result<ComponentScore, ScoringError> {
        let score = score_responsibilities(
            &person.responsibilities,
            &role_def.required_responsibilities,
        )
        .map_err(|err| ScoringError::from_text(&role_def.id, err))?;

        let details = if role_def.required_responsibilities.is_empty() {
            "role lists no responsibilities".to_string()
        } else if person.responsibilities.is_empty() {
            "no current responsibilities recorded".to_string()
        } else {
            format!(
                "text similarity {:.2}",
                score / COMPONENT_WEIGHTS.responsibilities
            )
        };

        Ok(ComponentScore::new(
            score,
            COMPONENT_WEIGHTS.responsibilities,
            details,
        ))
    }

    fn score_ambitions(&self, person: &Person, role_def: &RoleDefinition) -> ComponentScore {
        let aspiration = person.aspiration_level();
        let level = role_def.level_or_unknown();
        let score = score_ambition(aspiration, level);

        let details = format!(
            "aspiration {} vs role level {}",
            aspiration.unwrap_or("(none)"),
            level
        );
        ComponentScore::new(score, COMPONENT_WEIGHTS.ambitions, details)
    }

    fn score_dedication(&self, person: &Person, future_role: &FutureRole) -> ComponentScore {
        let score = score_dedication(&person.dedication, future_role.modality);

        let details = format!(
            "allocated {}% vs {} requirement {}%",
            person.total_dedication(),
            future_role.modality.as_ref(),
            future_role.modality.required_dedication()
        );
        ComponentScore::new(score, COMPONENT_WEIGHTS.dedication, details)
    }
}
