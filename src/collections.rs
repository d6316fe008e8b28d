//! Saved collections persisted to a single JSON file.
//!
//! The file holds one array of `{ name, repos, data }` records. Names are not
//! unique: saving under an existing name appends another record, `load` returns
//! the first match and `delete` removes every match.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{InputError, SaveError, StoreError};
use crate::types::{Repo, RepoCommitSeries, SavedCollection};

#[derive(Debug, Clone)]
pub struct CollectionStore {
    path: PathBuf,
    records: Vec<SavedCollection>,
}

impl CollectionStore {
    /// Restore every record from `path`.
    ///
    /// A missing, unreadable or malformed file yields an empty store.
    pub fn load_all(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<SavedCollection>>(&contents) {
                Ok(records) => {
                    info!("loaded {} saved collections from {}", records.len(), path.display());
                    records
                }
                Err(e) => {
                    warn!("ignoring malformed collections file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!("could not read collections file {}: {}", path.display(), e);
                Vec::new()
            }
        };
        Self { path, records }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[SavedCollection] {
        &self.records
    }

    /// Append a snapshot and persist the whole list.
    pub fn save(
        &mut self,
        name: &str,
        repos: &[Repo],
        series: &[RepoCommitSeries],
    ) -> Result<(), SaveError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SaveError::Input(InputError::EmptySaveName));
        }
        self.records.push(SavedCollection {
            name: name.to_string(),
            repos: repos.to_vec(),
            series: series.to_vec(),
        });
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(SaveError::Store(e));
        }
        Ok(())
    }

    /// The first record saved under `name`.
    pub fn load(&self, name: &str) -> Option<&SavedCollection> {
        self.records.iter().find(|record| record.name == name)
    }

    /// Remove every record saved under `name` and persist. Returns how many
    /// records were removed.
    pub fn delete(&mut self, name: &str) -> Result<usize, StoreError> {
        let before = self.records.len();
        self.records.retain(|record| record.name != name);
        let removed = before - self.records.len();
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, json)?;
        info!("saved {} collections to {}", self.records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeeklyPoint;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn snapshot() -> (Vec<Repo>, Vec<RepoCommitSeries>) {
        let repos = vec![Repo::new("foo", "bar"), Repo::new("baz", "qux")];
        let series = vec![RepoCommitSeries::new(
            Repo::new("foo", "bar"),
            vec![WeeklyPoint {
                week_start: 1000,
                total_commits: 5,
                days: vec![0, 1, 1, 1, 1, 1, 0],
            }],
        )];
        (repos, series)
    }

    fn store_in(dir: &TempDir) -> CollectionStore {
        CollectionStore::load_all(dir.path().join("nested").join("collections.json"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).records().is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("collections.json");
        fs::write(&path, "{not json").unwrap();
        assert!(CollectionStore::load_all(&path).records().is_empty());

        fs::write(&path, r#"{"name":"not an array"}"#).unwrap();
        assert!(CollectionStore::load_all(&path).records().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let (repos, series) = snapshot();

        let mut store = store_in(&dir);
        store.save("Project Alpha", &repos, &series).unwrap();

        let reloaded = CollectionStore::load_all(store.path());
        let record = reloaded.load("Project Alpha").unwrap();
        assert_eq!(record.repos, repos);
        assert_eq!(record.series, series);
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let (repos, series) = snapshot();
        let mut store = store_in(&dir);
        store.save("alpha", &repos, &series).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw[0]["name"], "alpha");
        assert_eq!(raw[0]["repos"][0]["repo"], "bar");
        assert_eq!(raw[0]["data"][0]["weeks"][0]["week"], 1000);
    }

    #[test]
    fn test_duplicate_names_first_match_and_delete_all() {
        let dir = TempDir::new().unwrap();
        let (repos, series) = snapshot();
        let mut store = store_in(&dir);

        store.save("alpha", &repos, &series).unwrap();
        store.save("alpha", &repos[..1], &[]).unwrap();
        store.save("beta", &[], &[]).unwrap();

        assert_eq!(store.records().len(), 3);
        assert_eq!(store.load("alpha").unwrap().repos.len(), 2);

        assert_eq!(store.delete("alpha").unwrap(), 2);
        assert!(store.load("alpha").is_none());

        let reloaded = CollectionStore::load_all(store.path());
        let names: Vec<&str> = reloaded.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["beta"]);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let err = store.save("   ", &[], &[]).unwrap_err();
        assert!(matches!(err, SaveError::Input(InputError::EmptySaveName)));
        assert!(!store.path().exists());
    }
}
