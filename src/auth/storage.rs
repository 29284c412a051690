//! On-disk persistence for the current session.
//!
//! The browser build of Melodica kept the session under a single
//! localStorage key; here it is a single JSON file in the cache
//! directory, written on login and removed on logout.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::AccessData;

/// Session file name in the cache directory
const ACCESS_DATA_FILE: &str = "accessData.json";

pub struct SessionStorage {
    cache_dir: PathBuf,
}

impl SessionStorage {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Write the access data to disk, overwriting any prior value.
    pub fn save(&self, data: &AccessData) -> Result<()> {
        let path = self.storage_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create session storage directory")?;
        }
        let contents = serde_json::to_string_pretty(data)?;
        std::fs::write(&path, contents).context("Failed to write session file")?;
        Ok(())
    }

    /// Read the stored access data, if any. A missing file is `None`;
    /// a corrupt file is an error.
    pub fn load(&self) -> Result<Option<AccessData>> {
        let path = self.storage_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents =
            std::fs::read_to_string(&path).context("Failed to read session file")?;
        let data: AccessData =
            serde_json::from_str(&contents).context("Failed to parse session file")?;
        Ok(Some(data))
    }

    /// Remove the stored access data. Idempotent.
    pub fn clear(&self) -> Result<()> {
        let path = self.storage_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    /// True iff a session file exists on disk.
    pub fn exists(&self) -> bool {
        self.storage_path().exists()
    }

    fn storage_path(&self) -> PathBuf {
        self.cache_dir.join(ACCESS_DATA_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn sample_access_data() -> AccessData {
        AccessData {
            access_token: "a.b.c".to_string(),
            user: User {
                id: 3,
                name: "Grace".to_string(),
                surname: Some("Hopper".to_string()),
                email: "grace@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path().to_path_buf());
        assert!(storage.load().unwrap().is_none());
        assert!(!storage.exists());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path().to_path_buf());
        let data = sample_access_data();

        storage.save(&data).unwrap();
        assert!(storage.exists());
        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path().to_path_buf());
        let mut data = sample_access_data();
        storage.save(&data).unwrap();

        data.user.name = "Grace Brewster".to_string();
        storage.save(&data).unwrap();
        assert_eq!(storage.load().unwrap().unwrap().user.name, "Grace Brewster");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path().to_path_buf());
        storage.save(&sample_access_data()).unwrap();

        storage.clear().unwrap();
        assert!(!storage.exists());
        // Clearing again must not error
        storage.clear().unwrap();
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join(ACCESS_DATA_FILE), "not json").unwrap();
        assert!(storage.load().is_err());
    }
}
