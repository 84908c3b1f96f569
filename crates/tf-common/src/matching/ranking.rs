use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    readiness::ReadinessLabel,
    scoring::{CompatibilityEngine, CompatibilityScore, ScoringError},
};
use crate::{FutureRole, Person, RoleLookup, TalentType, VisionPlan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub person_id: u64,
    pub name: String,
    pub current_role: String,
    pub talent_type: TalentType,
    pub percent: u32,
    pub readiness: ReadinessLabel,
    pub score: CompatibilityScore,
}

/// A score that could not be computed. Reported alongside the ranking instead
/// of aborting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringFailure {
    /// person id or role id, depending on which side was iterated
    pub subject: String,
    pub error: String,
}

/// All people scored against one future role, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub role_id: String,
    pub role_title: String,
    pub ranked: Vec<RankedCandidate>,
    pub failures: Vec<ScoringFailure>,
}

impl RankingReport {
    pub fn internal(&self) -> impl Iterator<Item = &RankedCandidate> {
        self.ranked
            .iter()
            .filter(|c| c.talent_type == TalentType::Internal)
    }

    pub fn external(&self) -> impl Iterator<Item = &RankedCandidate> {
        self.ranked
            .iter()
            .filter(|c| c.talent_type == TalentType::External)
    }

    pub fn best(&self) -> Option<&RankedCandidate> {
        self.ranked.first()
    }
}

/// Best internal candidate for one future role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCoverage {
    pub role_id: String,
    pub role_title: String,
    /// integer percent, 0 when no internal person scores above 0
    pub best_score: u32,
    pub best_person_id: Option<u64>,
    pub is_critical_gap: bool,
    /// internal people whose score for this role could not be computed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ScoringFailure>,
}

impl RoleCoverage {
    /// True when at least one internal person is missing from `best_score`.
    pub fn is_incomplete(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRole {
    pub role_id: String,
    pub role_title: String,
    pub percent: u32,
    pub readiness: ReadinessLabel,
    pub score: CompatibilityScore,
}

/// All future roles scored for one person, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRanking {
    pub person_id: u64,
    pub ranked: Vec<RankedRole>,
    pub failures: Vec<ScoringFailure>,
}

fn by_total_desc(a: &CompatibilityScore, b: &CompatibilityScore) -> Ordering {
    b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal)
}

impl CompatibilityEngine {
    /// Scores every person against `future_role` in parallel and sorts by total
    /// descending. Ties keep roster order.
    pub fn rank_candidates(
        &self,
        people: &[Person],
        future_role: &FutureRole,
        roles: &RoleLookup,
    ) -> RankingReport {
        let people: Vec<&Person> = people.iter().collect();
        self.rank_people(&people, future_role, roles)
    }

    fn rank_people(
        &self,
        people: &[&Person],
        future_role: &FutureRole,
        roles: &RoleLookup,
    ) -> RankingReport {
        let results: Vec<(&Person, Result<CompatibilityScore, ScoringError>)> = people
            .par_iter()
            .map(|&person| {
                (
                    person,
                    self.calculate_total_compatibility(person, future_role, roles),
                )
            })
            .collect();

        let mut ranked = Vec::with_capacity(results.len());
        let mut failures = Vec::new();

        for (person, result) in results {
            match result {
                Ok(score) => ranked.push(RankedCandidate {
                    person_id: person.id,
                    name: person.name.clone(),
                    current_role: person.current_role.clone(),
                    talent_type: person.metadata.talent_type,
                    percent: score.display_percent(),
                    readiness: self.readiness(&score),
                    score,
                }),
                Err(err) => {
                    warn!(
                        person_id = person.id,
                        role_id = %future_role.id,
                        error = %err,
                        "skipping candidate that could not be scored"
                    );
                    failures.push(ScoringFailure {
                        subject: person.id.to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        ranked.sort_by(|a, b| by_total_desc(&a.score, &b.score));

        debug!(
            role_id = %future_role.id,
            ranked = ranked.len(),
            failed = failures.len(),
            "ranked candidates"
        );

        RankingReport {
            role_id: future_role.id.clone(),
            role_title: future_role.title.clone(),
            ranked,
            failures,
        }
    }

    /// Best internal score per future role, weakest coverage first.
    pub fn role_coverage(
        &self,
        people: &[Person],
        vision: &VisionPlan,
        roles: &RoleLookup,
    ) -> Vec<RoleCoverage> {
        let internal: Vec<&Person> = people.iter().filter(|p| p.is_internal()).collect();
        let threshold = self.config().critical_gap_threshold;

        let mut coverage: Vec<RoleCoverage> = vision
            .required_roles
            .iter()
            .map(|future_role| {
                let report = self.rank_people(&internal, future_role, roles);
                let best = report.best().filter(|c| c.score.total > 0.0);
                let best_score = best.map(|c| c.score.total.trunc() as u32).unwrap_or(0);
                let best_person_id = best.map(|c| c.person_id);

                RoleCoverage {
                    role_id: future_role.id.clone(),
                    role_title: future_role.title.clone(),
                    best_score,
                    best_person_id,
                    is_critical_gap: best_score < threshold,
                    failures: report.failures,
                }
            })
            .collect();

        coverage.sort_by_key(|c| c.best_score);
        coverage
    }

    /// Every future role in the plan scored for one person, best first.
    pub fn rank_roles_for_person(
        &self,
        person: &Person,
        vision: &VisionPlan,
        roles: &RoleLookup,
    ) -> RoleRanking {
        let results: Vec<(&FutureRole, Result<CompatibilityScore, ScoringError>)> = vision
            .required_roles
            .par_iter()
            .map(|future_role| {
                (
                    future_role,
                    self.calculate_total_compatibility(person, future_role, roles),
                )
            })
            .collect();

        let mut ranked = Vec::with_capacity(results.len());
        let mut failures = Vec::new();

        for (future_role, result) in results {
            match result {
                Ok(score) => ranked.push(RankedRole {
                    role_id: future_role.id.clone(),
                    role_title: future_role.title.clone(),
                    percent: score.display_percent(),
                    readiness: self.readiness(&score),
                    score,
                }),
                Err(err) => {
                    warn!(
                        person_id = person.id,
                        role_id = %future_role.id,
                        error = %err,
                        "skipping role that could not be scored"
                    );
                    failures.push(ScoringFailure {
                        subject: future_role.id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        ranked.sort_by(|a, b| by_total_desc(&a.score, &b.score));

        RoleRanking {
            person_id: person.id,
            ranked,
            failures,
        }
    }
}
