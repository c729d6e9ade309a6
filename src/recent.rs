//! Recently opened files list
//!
//! Persisted as the `"recent_files"` record: a plain ordered list of paths,
//! most recent first.

use serde::{Deserialize, Serialize};

use crate::constants::records::RECENT_FILES;
use crate::error::StoreError;
use crate::store::Store;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentFiles {
    paths: Vec<String>,
}

impl RecentFiles {
    /// Load the list, treating a missing record as empty
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        match store.load(RECENT_FILES) {
            Ok(payload) => Ok(serde_json::from_value(payload)?),
            Err(StoreError::RecordNotFound(_)) => Ok(Self::default()),
            Err(other) => Err(other),
        }
    }

    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        store.save(RECENT_FILES, &serde_json::to_value(self)?)
    }

    /// Move `path` to the front, deduplicating and truncating to `max`
    pub fn add(&mut self, path: &str, max: usize) {
        self.paths.retain(|p| p != path);
        self.paths.insert(0, path.to_string());
        self.paths.truncate(max);
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> Store {
        Store::open(dir.path().join("data"), &dir.path().join("vault.key")).unwrap()
    }

    #[test]
    fn test_add_moves_to_front_and_dedupes() {
        let mut recent = RecentFiles::default();
        recent.add("a.png", 10);
        recent.add("b.png", 10);
        recent.add("a.png", 10);
        assert_eq!(recent.paths(), ["a.png", "b.png"]);
    }

    #[test]
    fn test_add_truncates_to_max() {
        let mut recent = RecentFiles::default();
        for i in 0..15 {
            recent.add(&format!("{i}.png"), 10);
        }
        assert_eq!(recent.paths().len(), 10);
        assert_eq!(recent.paths()[0], "14.png");
        assert_eq!(recent.paths()[9], "5.png");
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);
        assert_eq!(RecentFiles::load(&store).unwrap(), RecentFiles::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let mut recent = RecentFiles::default();
        recent.add("b.png", 10);
        recent.add("a.png", 10);
        recent.save(&store).unwrap();

        let loaded = RecentFiles::load(&store).unwrap();
        assert_eq!(loaded.paths(), ["a.png", "b.png"]);
    }

    #[test]
    fn test_order_preserved_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let mut recent = RecentFiles::default();
        for name in ["z.png", "m.png", "a.png"] {
            recent.add(name, 10);
        }
        recent.save(&store).unwrap();
        assert_eq!(
            RecentFiles::load(&store).unwrap().paths(),
            ["a.png", "m.png", "z.png"]
        );
    }
}
