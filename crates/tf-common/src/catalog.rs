use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::FutureRole;

/// Role definition lookup keyed by role id.
pub type RoleLookup = HashMap<String, RoleDefinition>;

/// Level used for a role definition without one.
pub const UNKNOWN_LEVEL: &str = "N/A";

/// Static catalog entry describing what a role requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub required_responsibilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl RoleDefinition {
    pub fn level_or_unknown(&self) -> &str {
        self.level.as_deref().unwrap_or(UNKNOWN_LEVEL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub name: String,
}

/// Organisation configuration: role catalog, skill names and chapters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgCatalog {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub roles: Vec<RoleDefinition>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub skills: Vec<SkillDefinition>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub chapters: Vec<Chapter>,
}

impl OrgCatalog {
    /// Later duplicates of a role id replace earlier ones.
    pub fn role_lookup(&self) -> RoleLookup {
        self.roles
            .iter()
            .map(|role| (role.id.clone(), role.clone()))
            .collect()
    }

    /// skill id → display name
    pub fn skill_names(&self) -> HashMap<String, String> {
        self.skills
            .iter()
            .map(|skill| (skill.id.clone(), skill.name.clone()))
            .collect()
    }

    pub fn chapter_names(&self) -> Vec<&str> {
        self.chapters.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Forward-looking workforce plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionPlan {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub required_roles: Vec<FutureRole>,
}

impl VisionPlan {
    pub fn find_by_title(&self, title: &str) -> Option<&FutureRole> {
        self.required_roles.iter().find(|role| role.title == title)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&FutureRole> {
        self.required_roles.iter().find(|role| role.id == id)
    }
}
