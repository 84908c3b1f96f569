pub mod catalog;
pub mod config;
pub mod dataset;
pub mod development;
pub mod insights;
pub mod logging;
pub mod matching;
pub mod text;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, EnumString};

pub use catalog::{Chapter, OrgCatalog, RoleDefinition, RoleLookup, SkillDefinition, VisionPlan};

/// Id handed out to the first person of an empty roster.
pub const FIRST_PERSON_ID: u64 = 1001;

// Commonly used data models for scoring functions.

/// Employee or external candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chapter: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_role: String,
    #[serde(default = "default_manager", deserialize_with = "null_as_manager")]
    pub manager: String,
    /// skill id → level (0〜10)
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: BTreeMap<String, u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responsibilities: Vec<String>,
    /// project name → allocated percentage
    #[serde(default, deserialize_with = "null_as_default")]
    pub dedication: BTreeMap<String, i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ambitions: Ambitions,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: PersonMetadata,
}

impl Default for Person {
    fn default() -> Self {
        Self {
            id: FIRST_PERSON_ID,
            name: String::new(),
            email: String::new(),
            chapter: String::new(),
            current_role: String::new(),
            manager: default_manager(),
            skills: BTreeMap::new(),
            responsibilities: Vec::new(),
            dedication: BTreeMap::new(),
            ambitions: Ambitions::default(),
            metadata: PersonMetadata::default(),
        }
    }
}

impl Person {
    /// Sum of every project allocation (0 when none).
    pub fn total_dedication(&self) -> i64 {
        self.dedication.values().sum()
    }

    pub fn is_internal(&self) -> bool {
        self.metadata.talent_type == TalentType::Internal
    }

    pub fn aspiration_level(&self) -> Option<&str> {
        self.ambitions.aspiration_level.as_deref()
    }
}

fn default_manager() -> String {
    "N/A".to_string()
}

fn null_as_manager<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_manager))
}

/// Reads an explicit `null` the same way as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ambitions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspiration_level: Option<String>,
    /// Ambition keys the scorer does not read are kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Ambitions {
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            aspiration_level: Some(level.into()),
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonMetadata {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub talent_type: TalentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_risk: Option<RetentionRisk>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
pub enum TalentType {
    #[default]
    Internal,
    External,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
pub enum RetentionRisk {
    Low,
    Medium,
    High,
}

/// Capacity commitment a future role requires.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Modality {
    #[default]
    #[strum(serialize = "FT")]
    FullTime,
    #[strum(serialize = "PT")]
    PartTime,
    #[strum(serialize = "Fractional")]
    Fractional,
}

impl Modality {
    /// Exact match on "FT" / "PT" / "Fractional"; anything else is full time.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    /// Total allocation percentage the modality asks for.
    pub fn required_dedication(self) -> i64 {
        match self {
            Modality::FullTime => 100,
            Modality::PartTime => 50,
            Modality::Fractional => 25,
        }
    }
}

impl From<String> for Modality {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl From<Modality> for String {
    fn from(value: Modality) -> Self {
        value.as_ref().to_string()
    }
}

/// Entry of the forward-looking workforce plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FutureRole {
    /// References a `RoleDefinition` id.
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modality: Modality,
}

/// Next id for a new roster entry: max existing id + 1, or 1001 if the roster is empty.
pub fn next_person_id(people: &[Person]) -> u64 {
    people
        .iter()
        .map(|p| p.id)
        .max()
        .map(|max| max + 1)
        .unwrap_or(FIRST_PERSON_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_starts_at_1001() {
        assert_eq!(next_person_id(&[]), 1001);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        let people = vec![
            Person {
                id: 1004,
                ..Person::default()
            },
            Person {
                id: 1002,
                ..Person::default()
            },
        ];
        assert_eq!(next_person_id(&people), 1005);
    }

    #[test]
    fn modality_falls_back_to_full_time() {
        assert_eq!(Modality::parse_or_default("PT"), Modality::PartTime);
        assert_eq!(Modality::parse_or_default("Fractional"), Modality::Fractional);
        assert_eq!(Modality::parse_or_default("pt"), Modality::FullTime);
        assert_eq!(Modality::parse_or_default(""), Modality::FullTime);
    }

    #[test]
    fn person_deserializes_with_missing_fields() {
        let person: Person = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Ana",
                "ambitions": {"aspirationLevel": "Senior", "track": "ic"}
            }"#,
        )
        .unwrap();

        assert_eq!(person.manager, "N/A");
        assert!(person.skills.is_empty());
        assert_eq!(person.aspiration_level(), Some("Senior"));
        assert_eq!(person.ambitions.extra.get("track"), Some(&serde_json::json!("ic")));
        assert!(person.is_internal());
        assert_eq!(person.total_dedication(), 0);
    }

    #[test]
    fn null_fields_read_as_defaults() {
        let person: Person = serde_json::from_str(
            r#"{
                "id": 9,
                "name": null,
                "manager": null,
                "skills": null,
                "responsibilities": null,
                "dedication": null,
                "ambitions": null,
                "metadata": {"type": null, "retentionRisk": null}
            }"#,
        )
        .unwrap();

        assert_eq!(person.name, "");
        assert_eq!(person.manager, "N/A");
        assert!(person.skills.is_empty());
        assert!(person.responsibilities.is_empty());
        assert_eq!(person.total_dedication(), 0);
        assert_eq!(person.aspiration_level(), None);
        assert!(person.is_internal());
        assert_eq!(person.metadata.retention_risk, None);
    }

    #[test]
    fn null_modality_is_full_time() {
        let role: FutureRole =
            serde_json::from_str(r#"{"id": "R1", "title": null, "modality": null}"#).unwrap();

        assert_eq!(role.modality, Modality::FullTime);
        assert_eq!(role.modality.required_dedication(), 100);
        assert_eq!(role.title, "");
    }

    #[test]
    fn person_metadata_reads_type_and_risk() {
        let person: Person = serde_json::from_str(
            r#"{"id": 1, "metadata": {"type": "External", "retentionRisk": "High"}}"#,
        )
        .unwrap();

        assert_eq!(person.metadata.talent_type, TalentType::External);
        assert_eq!(person.metadata.retention_risk, Some(RetentionRisk::High));
    }

    #[test]
    fn future_role_modality_defaults() {
        let absent: FutureRole = serde_json::from_str(r#"{"id": "R1", "title": "Lead"}"#).unwrap();
        let unknown: FutureRole =
            serde_json::from_str(r#"{"id": "R1", "title": "Lead", "modality": "Contractor"}"#)
                .unwrap();
        let pt: FutureRole =
            serde_json::from_str(r#"{"id": "R1", "title": "Lead", "modality": "PT"}"#).unwrap();

        assert_eq!(absent.modality, Modality::FullTime);
        assert_eq!(unknown.modality, Modality::FullTime);
        assert_eq!(pt.modality, Modality::PartTime);
        assert_eq!(serde_json::to_value(pt).unwrap()["modality"], "PT");
    }
}
