//! Key/value preference backends
//!
//! The settings blob lives under a single key in a `PreferenceStore`.
//! `FileStore` keeps one JSON file per key and writes atomically;
//! `MemoryStore` is a shared in-process map used by tests and ephemeral
//! sessions.

use crate::error::{SettingsError, SettingsResult};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Client-side key/value store for user preferences
pub trait PreferenceStore {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> SettingsResult<Option<String>>;

    /// Overwrite a value
    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()>;

    /// Delete a value. Deleting an absent key succeeds.
    fn remove(&mut self, key: &str) -> SettingsResult<()>;
}

/// Directory-backed store, one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the value files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SettingsError::storage(&e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| SettingsError::storage(&e))?;
        write_atomic(&self.path_for(key), value).map_err(|e| SettingsError::storage(&e))
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SettingsError::storage(&e)),
        }
    }
}

/// Write to a temp file in the same directory, then rename over the target
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "value".to_string());

    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let temp_path = parent.join(format!(".{}.{}.tmp", filename, timestamp));

    let write_result = (|| {
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        file.sync_all()?;
        Ok::<(), std::io::Error>(())
    })();

    if let Err(e) = write_result {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

/// In-memory store. Clones share the same map, so a test can keep a
/// handle while the application owns another.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    available: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Simulate the storage medium becoming (in)accessible
    #[cfg(test)]
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far
    #[cfg(test)]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw stored value, bypassing availability
    #[cfg(test)]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().ok().and_then(|v| v.get(key).cloned())
    }

    /// Seed a raw value without counting it as a write
    #[cfg(test)]
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn check_available(&self) -> SettingsResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SettingsError::StorageUnavailable {
                reason: "memory store disabled".to_string(),
            })
        }
    }

    fn lock(&self) -> SettingsResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| SettingsError::StorageUnavailable {
                reason: "memory store poisoned".to_string(),
            })
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        self.check_available()?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        self.check_available()?;
        self.lock()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        self.check_available()?;
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("prefs"));

        assert_eq!(store.get("scpSettings").unwrap(), None);
        store.set("scpSettings", "{\"a\":1}").unwrap();
        assert_eq!(store.get("scpSettings").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(store.dir().join("scpSettings.json").exists());

        store.remove("scpSettings").unwrap();
        assert_eq!(store.get("scpSettings").unwrap(), None);
        store.remove("scpSettings").unwrap();
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["k.json".to_string()]);
    }

    #[test]
    fn test_file_store_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let mut store = FileStore::new(&blocker);

        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, SettingsError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_memory_store_shares_state() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        handle.set("k", "v").unwrap();
        assert_eq!(store.raw("k").as_deref(), Some("v"));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_memory_store_unavailable() {
        let mut store = MemoryStore::new();
        store.set_available(false);
        assert!(store.get("k").is_err());
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());
        assert_eq!(store.write_count(), 0);
    }
}
