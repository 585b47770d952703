use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Custom error type for persistence operations
#[derive(Debug)]
pub enum StorageError {
    InvalidData(String),
    IoError(io::Error),
}

// Implement conversion from io::Error to StorageError
impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        StorageError::InvalidData(error.to_string())
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

/// Key-value persistence store: string keys mapped to JSON-serialized string
/// values. This is the only durable surface in the system; every record is
/// written back whole on each mutation.
pub trait KeyValueStore {
    /// Return the raw serialized value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Store the raw serialized value under a key, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Deserialize the value under a key. Absent keys yield `Ok(None)`; present
/// but malformed values are an error the caller must decide about.
pub fn get_json<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key) {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize a value and store it under a key.
pub fn set_json<S: KeyValueStore + ?Sized, T: Serialize>(
    store: &mut S,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}

/// File-backed store: the whole key space is kept in memory and flushed to a
/// single pretty-printed JSON file on every mutation.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open a store at the given path. A missing file yields an empty store;
    /// an unreadable or malformed file is logged and replaced with an empty
    /// store on the next write.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match File::open(&path) {
            Ok(mut file) => {
                let mut data = String::new();
                file.read_to_string(&mut data)?;
                match serde_json::from_str(&data) {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!("Store file {} is malformed ({}), starting empty", path.display(), e);
                        HashMap::new()
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };
        Ok(FileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Write the full key space back to disk
    fn flush(&self) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(&self.entries)?;
        File::create(&self.path)?.write_all(data.as_bytes())?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// In-memory store with no durability, used in tests and anywhere a
/// throwaway session is wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("missing").is_none());

        store.set("greeting", "\"hello\"".to_string()).unwrap();
        assert_eq!(store.get("greeting").unwrap(), "\"hello\"");
        assert!(store.contains("greeting"));

        store.remove("greeting").unwrap();
        assert!(!store.contains("greeting"));

        // Removing an absent key is fine
        assert!(store.remove("greeting").is_ok());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("user_test@example.com", "{\"name\":\"Test\"}".to_string()).unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("user_test@example.com").unwrap(), "{\"name\":\"Test\"}");
    }

    #[test]
    fn test_file_store_malformed_file_starts_empty() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not json at all").unwrap();

        let store = FileStore::open(temp_file.path()).unwrap();
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn test_json_helpers() {
        let mut store = MemoryStore::new();
        set_json(&mut store, "numbers", &vec![1, 2, 3]).unwrap();

        let numbers: Vec<i32> = get_json(&store, "numbers").unwrap().unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);

        let absent: Option<Vec<i32>> = get_json(&store, "missing").unwrap();
        assert!(absent.is_none());

        // Malformed stored data surfaces as an error, not a silent default
        store.set("numbers", "{broken".to_string()).unwrap();
        let result: Result<Option<Vec<i32>>, _> = get_json(&store, "numbers");
        assert!(result.is_err());
    }
}
