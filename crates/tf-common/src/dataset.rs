use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{next_person_id, OrgCatalog, Person, RoleLookup, VisionPlan};

pub const ORG_CONFIG_FILE: &str = "org_config.json";
pub const VISION_FILE: &str = "vision.json";
pub const INTERNAL_TALENT_FILE: &str = "internal_talent.json";
pub const EXTERNAL_TALENT_FILE: &str = "external_talent.json";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything one scoring session needs, loaded once.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub catalog: OrgCatalog,
    pub vision: VisionPlan,
    /// internal roster followed by external candidates
    pub people: Vec<Person>,
}

impl Dataset {
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();

        let catalog: OrgCatalog = load_json_file(&dir.join(ORG_CONFIG_FILE))?;
        let vision: VisionPlan = load_json_file(&dir.join(VISION_FILE))?;

        let mut people = load_talent_file(&dir.join(INTERNAL_TALENT_FILE))?;
        people.extend(load_talent_file(&dir.join(EXTERNAL_TALENT_FILE))?);

        info!(
            data_dir = %dir.display(),
            roles = catalog.roles.len(),
            future_roles = vision.required_roles.len(),
            people = people.len(),
            "loaded dataset"
        );

        Ok(Self {
            catalog,
            vision,
            people,
        })
    }

    pub fn role_lookup(&self) -> RoleLookup {
        self.catalog.role_lookup()
    }

    pub fn find_person(&self, id: u64) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn next_person_id(&self) -> u64 {
        next_person_id(&self.people)
    }
}

pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let raw = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// A talent file that does not exist is an empty roster.
pub fn load_talent_file(path: &Path) -> Result<Vec<Person>, DatasetError> {
    if !path.exists() {
        warn!(path = %path.display(), "talent file not found; using an empty roster");
        return Ok(Vec::new());
    }
    load_json_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn seed(dir: &Path) {
        write(
            dir,
            ORG_CONFIG_FILE,
            r#"{"roles": [{"id": "R1", "level": "Senior"}], "skills": [], "chapters": []}"#,
        );
        write(
            dir,
            VISION_FILE,
            r#"{"requiredRoles": [{"id": "R1", "title": "Lead", "modality": "FT"}]}"#,
        );
    }

    #[test]
    fn loads_and_concatenates_rosters() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        write(dir.path(), INTERNAL_TALENT_FILE, r#"[{"id": 1001, "name": "Ana"}]"#);
        write(
            dir.path(),
            EXTERNAL_TALENT_FILE,
            r#"[{"id": 1002, "name": "Bo", "metadata": {"type": "External"}}]"#,
        );

        let dataset = Dataset::load_dir(dir.path()).unwrap();

        assert_eq!(dataset.people.len(), 2);
        assert_eq!(dataset.people[0].name, "Ana");
        assert!(!dataset.people[1].is_internal());
        assert!(dataset.role_lookup().contains_key("R1"));
        assert_eq!(dataset.next_person_id(), 1003);
        assert_eq!(dataset.find_person(1002).map(|p| p.name.as_str()), Some("Bo"));
    }

    #[test]
    fn missing_talent_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());

        let dataset = Dataset::load_dir(dir.path()).unwrap();

        assert!(dataset.people.is_empty());
        assert_eq!(dataset.next_person_id(), 1001);
    }

    #[test]
    fn null_values_do_not_abort_loading() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        write(
            dir.path(),
            VISION_FILE,
            r#"{"requiredRoles": [{"id": "R1", "title": "Lead", "modality": null}]}"#,
        );
        write(
            dir.path(),
            INTERNAL_TALENT_FILE,
            r#"[{"id": 1001, "name": "Ana", "skills": null, "dedication": null}]"#,
        );

        let dataset = Dataset::load_dir(dir.path()).unwrap();

        assert_eq!(dataset.vision.required_roles[0].modality, crate::Modality::FullTime);
        assert!(dataset.people[0].skills.is_empty());
        assert_eq!(dataset.people[0].total_dedication(), 0);
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains(ORG_CONFIG_FILE));
    }

    #[test]
    fn malformed_talent_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        write(dir.path(), INTERNAL_TALENT_FILE, r#"{"id": "not-a-list"}"#);

        let err = Dataset::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Json { .. }));
    }
}
