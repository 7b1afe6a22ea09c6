use std::{fs, path::PathBuf};

use chrono::{DateTime, Utc};
use quizkit::Storage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create statistics directory: {0}")]
    CreateDirectory(std::io::Error),
}

/// Key-value statistics backend persisted as a flat TOML table.
///
/// Reads degrade silently: a missing or corrupted file behaves like an empty
/// table, and individual values of the wrong type read as absent. Dates are
/// stored as unix seconds.
#[derive(Debug)]
pub struct TomlStorage {
    path: PathBuf,
    values: toml::Table,
}

impl TomlStorage {
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(StorageError::CreateDirectory)?;
        }

        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|content| content.parse::<toml::Table>().ok())
            .unwrap_or_default();

        Ok(Self { path, values })
    }

    fn persist(&self) {
        // Best-effort: a failed write loses history, never a round
        if let Ok(content) = toml::to_string(&self.values) {
            let _ = fs::write(&self.path, content);
        }
    }
}

impl Storage for TomlStorage {
    fn get_integer(&self, key: &str) -> i64 {
        self.values
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(0)
    }

    fn set_integer(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), toml::Value::Integer(value));
        self.persist();
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(toml::Value::as_str)
            .map(str::to_string)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), toml::Value::String(value.to_string()));
        self.persist();
    }

    fn get_date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.values
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
    }

    fn set_date(&mut self, key: &str, value: DateTime<Utc>) {
        self.values
            .insert(key.to_string(), toml::Value::Integer(value.timestamp()));
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join("reelquiz-tests")
            .join(format!("{name}-{}", std::process::id()))
            .join("statistics.toml");
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = scratch_file("reopen");
        let date = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        {
            let mut storage = TomlStorage::open(path.clone()).unwrap();
            storage.set_integer("gamesCount", 3);
            storage.set_string("totalAccuracy", "66.67");
            storage.set_date("date", date);
        }

        let storage = TomlStorage::open(path).unwrap();
        assert_eq!(storage.get_integer("gamesCount"), 3);
        assert_eq!(storage.get_string("totalAccuracy").as_deref(), Some("66.67"));
        assert_eq!(storage.get_date("date"), Some(date));
    }

    #[test]
    fn test_missing_values_read_as_defaults() {
        let path = scratch_file("missing");
        let storage = TomlStorage::open(path).unwrap();

        assert_eq!(storage.get_integer("gamesCount"), 0);
        assert!(storage.get_string("totalAccuracy").is_none());
        assert!(storage.get_date("date").is_none());
    }

    #[test]
    fn test_corrupted_file_degrades_to_empty() {
        let path = scratch_file("corrupted");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not [valid toml").unwrap();

        let storage = TomlStorage::open(path).unwrap();
        assert_eq!(storage.get_integer("gamesCount"), 0);
    }

    #[test]
    fn test_wrong_type_reads_as_absent() {
        let path = scratch_file("wrong-type");
        let mut storage = TomlStorage::open(path).unwrap();
        storage.set_string("gamesCount", "three");

        assert_eq!(storage.get_integer("gamesCount"), 0);
        assert!(storage.get_date("gamesCount").is_none());
    }
}
