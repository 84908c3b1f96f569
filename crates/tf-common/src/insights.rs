//! Workforce KPIs over the internal roster: retention watchlist, over-allocation,
//! project load, future-role coverage and the per-chapter talent view.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::{CompatibilityEngine, RoleCoverage};
use crate::{Person, RetentionRisk, RoleLookup, VisionPlan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub person_id: u64,
    pub name: String,
    pub current_role: String,
    pub retention_risk: RetentionRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub person_id: u64,
    pub name: String,
    pub current_role: String,
    pub total_dedication: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLoad {
    pub project: String,
    pub total_load: i64,
}

/// Internal people whose retention risk is one of `levels`.
pub fn retention_watchlist(people: &[Person], levels: &[RetentionRisk]) -> Vec<WatchlistEntry> {
    people
        .iter()
        .filter(|p| p.is_internal())
        .filter_map(|p| {
            let risk = p.metadata.retention_risk?;
            levels.contains(&risk).then(|| WatchlistEntry {
                person_id: p.id,
                name: p.name.clone(),
                current_role: p.current_role.clone(),
                retention_risk: risk,
            })
        })
        .collect()
}

/// Internal people whose total dedication is strictly above `threshold`.
pub fn over_allocated(people: &[Person], threshold: i64) -> Vec<AllocationEntry> {
    people
        .iter()
        .filter(|p| p.is_internal())
        .filter(|p| p.total_dedication() > threshold)
        .map(|p| AllocationEntry {
            person_id: p.id,
            name: p.name.clone(),
            current_role: p.current_role.clone(),
            total_dedication: p.total_dedication(),
        })
        .collect()
}

/// Allocation summed per project over internal people, heaviest first.
pub fn project_load(people: &[Person]) -> Vec<ProjectLoad> {
    let mut load: BTreeMap<&str, i64> = BTreeMap::new();
    for person in people.iter().filter(|p| p.is_internal()) {
        for (project, percent) in &person.dedication {
            *load.entry(project.as_str()).or_insert(0) += percent;
        }
    }

    let mut projects: Vec<ProjectLoad> = load
        .into_iter()
        .map(|(project, total_load)| ProjectLoad {
            project: project.to_string(),
            total_load,
        })
        .collect();
    // BTreeMap order breaks ties by name
    projects.sort_by(|a, b| b.total_load.cmp(&a.total_load));
    projects
}

/// Internal people, optionally restricted to one chapter (exact name match).
pub fn chapter_roster<'a>(people: &'a [Person], chapter: Option<&str>) -> Vec<&'a Person> {
    people
        .iter()
        .filter(|p| p.is_internal())
        .filter(|p| chapter.map_or(true, |name| p.chapter == name))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAverage {
    /// catalog display name, or the skill id when the catalog has none
    pub skill_name: String,
    pub average_level: f64,
    pub people: usize,
}

/// Mean possessed level per skill over `people`, lowest first.
///
/// Skills are grouped by display name, so two ids sharing a catalog name are
/// averaged together.
pub fn skill_averages(
    people: &[&Person],
    skill_names: &HashMap<String, String>,
) -> Vec<SkillAverage> {
    let mut levels: BTreeMap<&str, (u32, usize)> = BTreeMap::new();
    for person in people {
        for (skill_id, level) in &person.skills {
            let name = skill_names.get(skill_id).map_or(skill_id.as_str(), String::as_str);
            let entry = levels.entry(name).or_insert((0, 0));
            entry.0 += u32::from(*level);
            entry.1 += 1;
        }
    }

    let mut averages: Vec<SkillAverage> = levels
        .into_iter()
        .map(|(name, (sum, count))| SkillAverage {
            skill_name: name.to_string(),
            average_level: f64::from(sum) / count as f64,
            people: count,
        })
        .collect();
    averages.sort_by(|a, b| a.average_level.total_cmp(&b.average_level));
    averages
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub person_id: u64,
    pub name: String,
    pub chapter: String,
    pub current_role: String,
    pub manager: String,
}

/// HR view of the current internal talent, for all chapters or one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentView {
    pub chapter: Option<String>,
    pub roster: Vec<RosterEntry>,
    pub skill_averages: Vec<SkillAverage>,
}

impl TalentView {
    pub fn build(
        people: &[Person],
        chapter: Option<&str>,
        skill_names: &HashMap<String, String>,
    ) -> Self {
        let members = chapter_roster(people, chapter);
        let roster = members
            .iter()
            .map(|p| RosterEntry {
                person_id: p.id,
                name: p.name.clone(),
                chapter: p.chapter.clone(),
                current_role: p.current_role.clone(),
                manager: p.manager.clone(),
            })
            .collect();

        Self {
            chapter: chapter.map(str::to_string),
            roster,
            skill_averages: skill_averages(&members, skill_names),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicOverview {
    pub generated_at: DateTime<Utc>,
    pub retention_watchlist: Vec<WatchlistEntry>,
    pub over_allocated: Vec<AllocationEntry>,
    pub project_load: Vec<ProjectLoad>,
    pub coverage: Vec<RoleCoverage>,
    /// titles of future roles whose best internal score is below the critical-gap threshold
    pub critical_gaps: Vec<String>,
    /// titles of future roles where some internal person could not be scored
    pub incomplete_coverage: Vec<String>,
}

impl StrategicOverview {
    pub fn build(
        engine: &CompatibilityEngine,
        people: &[Person],
        vision: &VisionPlan,
        roles: &RoleLookup,
    ) -> Self {
        let config = engine.config();
        let coverage = engine.role_coverage(people, vision, roles);
        let critical_gaps = coverage
            .iter()
            .filter(|c| c.is_critical_gap)
            .map(|c| c.role_title.clone())
            .collect();
        let incomplete_coverage = coverage
            .iter()
            .filter(|c| c.is_incomplete())
            .map(|c| c.role_title.clone())
            .collect();

        Self {
            generated_at: Utc::now(),
            retention_watchlist: retention_watchlist(people, &config.retention_watch),
            over_allocated: over_allocated(people, config.over_allocation_threshold),
            project_load: project_load(people),
            coverage,
            critical_gaps,
            incomplete_coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FutureRole, PersonMetadata, RoleDefinition, TalentType};

    fn person(
        id: u64,
        talent_type: TalentType,
        risk: Option<RetentionRisk>,
        dedication: &[(&str, i64)],
    ) -> Person {
        Person {
            id,
            name: format!("p{id}"),
            dedication: dedication
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            metadata: PersonMetadata {
                talent_type,
                retention_risk: risk,
            },
            ..Person::default()
        }
    }

    fn roster() -> Vec<Person> {
        vec![
            person(
                1,
                TalentType::Internal,
                Some(RetentionRisk::Medium),
                &[("Atlas", 60), ("Nova", 40)],
            ),
            person(2, TalentType::Internal, Some(RetentionRisk::High), &[("Atlas", 50)]),
            person(3, TalentType::External, Some(RetentionRisk::Medium), &[("Nova", 100)]),
            person(4, TalentType::Internal, None, &[("Nova", 50), ("Zen", 50)]),
        ]
    }

    #[test]
    fn watchlist_filters_internal_by_level() {
        let medium = retention_watchlist(&roster(), &[RetentionRisk::Medium]);
        assert_eq!(medium.len(), 1);
        assert_eq!(medium[0].person_id, 1);

        let both = retention_watchlist(&roster(), &[RetentionRisk::Medium, RetentionRisk::High]);
        let ids: Vec<u64> = both.iter().map(|e| e.person_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn over_allocation_is_strictly_above_threshold() {
        let entries = over_allocated(&roster(), 95);
        let ids: Vec<u64> = entries.iter().map(|e| e.person_id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(entries[0].total_dedication, 100);

        assert!(over_allocated(&roster(), 100).is_empty());
    }

    fn load(project: &str, total_load: i64) -> ProjectLoad {
        ProjectLoad {
            project: project.into(),
            total_load,
        }
    }

    fn average(skill_name: &str, average_level: f64, people: usize) -> SkillAverage {
        SkillAverage {
            skill_name: skill_name.into(),
            average_level,
            people,
        }
    }

    #[test]
    fn project_load_sums_internal_people() {
        let actual = project_load(&roster());
        assert_eq!(
            actual,
            vec![load("Atlas", 110), load("Nova", 90), load("Zen", 50)]
        );
    }

    #[test]
    fn overview_collects_critical_gaps() {
        let def = RoleDefinition {
            id: "R-ARCH".into(),
            required_skills: vec!["S-CLOUD".into()],
            required_responsibilities: vec!["design platform architecture".into()],
            level: Some("Principal".into()),
            ..RoleDefinition::default()
        };
        let roles = RoleLookup::from([(def.id.clone(), def)]);
        let vision = VisionPlan {
            required_roles: vec![FutureRole {
                id: "R-ARCH".into(),
                title: "Platform Architect".into(),
                ..FutureRole::default()
            }],
        };

        let overview =
            StrategicOverview::build(&CompatibilityEngine::default(), &roster(), &vision, &roles);

        assert_eq!(overview.critical_gaps, vec!["Platform Architect".to_string()]);
        assert_eq!(overview.coverage.len(), 1);
        assert_eq!(overview.retention_watchlist.len(), 1);
        assert_eq!(overview.over_allocated.len(), 2);
        assert!(overview.incomplete_coverage.is_empty());
    }

    #[test]
    fn overview_lists_roles_with_unscored_people() {
        let def = RoleDefinition {
            id: "R-ODD".into(),
            required_responsibilities: vec!["?".into()],
            ..RoleDefinition::default()
        };
        let roles = RoleLookup::from([(def.id.clone(), def)]);
        let vision = VisionPlan {
            required_roles: vec![FutureRole {
                id: "R-ODD".into(),
                title: "Odd Role".into(),
                ..FutureRole::default()
            }],
        };
        let mut people = roster();
        people[0].responsibilities = vec!["!".into()];

        let overview =
            StrategicOverview::build(&CompatibilityEngine::default(), &people, &vision, &roles);

        assert_eq!(overview.incomplete_coverage, vec!["Odd Role".to_string()]);
        assert_eq!(overview.coverage[0].failures.len(), 1);
        assert_eq!(overview.coverage[0].failures[0].subject, "1");
    }

    fn with_skills(mut p: Person, chapter: &str, skills: &[(&str, u8)]) -> Person {
        p.chapter = chapter.into();
        p.skills = skills.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        p
    }

    fn chapter_roster_fixture() -> Vec<Person> {
        vec![
            with_skills(
                person(1, TalentType::Internal, None, &[]),
                "Data",
                &[("S-SQL", 8), ("S-PY", 4)],
            ),
            with_skills(person(2, TalentType::Internal, None, &[]), "Data", &[("S-SQL", 6)]),
            with_skills(person(3, TalentType::Internal, None, &[]), "Product", &[("S-PY", 10)]),
            with_skills(person(4, TalentType::External, None, &[]), "Data", &[("S-SQL", 1)]),
        ]
    }

    #[test]
    fn chapter_roster_filters_internal_people() {
        let people = chapter_roster_fixture();

        let all: Vec<u64> = chapter_roster(&people, None).iter().map(|p| p.id).collect();
        let data: Vec<u64> = chapter_roster(&people, Some("Data")).iter().map(|p| p.id).collect();

        assert_eq!(all, vec![1, 2, 3]);
        assert_eq!(data, vec![1, 2]);
        assert!(chapter_roster(&people, Some("data")).is_empty());
    }

    #[test]
    fn skill_averages_sorted_lowest_first() {
        let people = chapter_roster_fixture();
        let names = HashMap::from([("S-SQL".to_string(), "SQL".to_string())]);

        let data = skill_averages(&chapter_roster(&people, Some("Data")), &names);

        assert_eq!(
            data,
            vec![average("S-PY", 4.0, 1), average("SQL", 7.0, 2)]
        );
        assert!(skill_averages(&[], &names).is_empty());
    }

    #[test]
    fn talent_view_bundles_roster_and_averages() {
        let view = TalentView::build(&chapter_roster_fixture(), None, &HashMap::new());

        assert_eq!(view.chapter, None);
        assert_eq!(view.roster.len(), 3);
        assert_eq!(view.roster[0].manager, "N/A");
        // S-PY: (4 + 10) / 2 = 7, S-SQL: (8 + 6) / 2 = 7, ties by name
        assert_eq!(view.skill_averages[0].skill_name, "S-PY");
        assert_eq!(view.skill_averages[1].average_level, 7.0);
    }
}
