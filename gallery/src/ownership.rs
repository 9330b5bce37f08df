use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::PathBuf,
};

use shared::MedalId;
use tracing::{debug, instrument, warn};

/// Named slots of persisted text, in the spirit of browser local storage.
pub trait Storage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// One file per slot under `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Replace the slot atomically.
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Medals the local visitor marked as obtained.
pub struct OwnershipStore {
    storage: Box<dyn Storage + Send>,
    slot: String,
    obtained: BTreeSet<MedalId>,
}

impl std::fmt::Debug for OwnershipStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnershipStore")
            .field("slot", &self.slot)
            .field("obtained", &self.obtained)
            .finish()
    }
}

impl OwnershipStore {
    /// Reads the slot. Missing or unreadable data starts an empty set.
    #[instrument(skip(storage))]
    pub fn load(storage: impl Storage + Send + 'static, slot: &str) -> Self {
        let obtained = match storage.get(slot) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<MedalId>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    warn!("Stored medals in {slot} are malformed, starting empty: {e}");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                warn!("Failed to read {slot}, starting empty: {e}");
                BTreeSet::new()
            }
        };
        debug!("Loaded {} obtained medals", obtained.len());

        Self {
            storage: Box::new(storage),
            slot: slot.to_string(),
            obtained,
        }
    }

    pub fn is_obtained(&self, id: &str) -> bool {
        self.obtained.contains(id)
    }

    /// Flips membership of `id` and persists the whole set. Returns whether
    /// the medal is now obtained. The set is left untouched if the write fails.
    pub fn toggle(&mut self, id: &str) -> anyhow::Result<bool> {
        let mut next = self.obtained.clone();
        let now_obtained = if next.remove(id) {
            false
        } else {
            next.insert(id.to_string());
            true
        };
        self.commit(next)?;
        Ok(now_obtained)
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.commit(BTreeSet::new())
    }

    pub fn obtained(&self) -> impl Iterator<Item = &str> {
        self.obtained.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.obtained.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obtained.is_empty()
    }

    fn commit(&mut self, next: BTreeSet<MedalId>) -> anyhow::Result<()> {
        let value = serde_json::to_string(&next)?;
        self.storage.set(&self.slot, &value)?;
        self.obtained = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOT: &str = "misMedallas";

    fn storage_with(value: &str) -> MemoryStorage {
        let mut storage = MemoryStorage::default();
        storage.set(SLOT, value).unwrap();
        storage
    }

    struct ReadOnlyStorage(MemoryStorage);

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("storage is read-only")
        }
    }

    #[test]
    fn failed_write_keeps_previous_state() {
        let mut store = OwnershipStore::load(ReadOnlyStorage(storage_with(r#"["B"]"#)), SLOT);

        assert!(store.toggle("A").is_err());
        assert!(!store.is_obtained("A"));

        assert!(store.toggle("B").is_err());
        assert!(store.is_obtained("B"));

        assert!(store.clear().is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = OwnershipStore::load(FileStorage::new(dir.path()), SLOT);

        assert!(store.toggle("7").unwrap());
        assert!(store.is_obtained("7"));
        let reloaded = OwnershipStore::load(FileStorage::new(dir.path()), SLOT);
        assert!(reloaded.is_obtained("7"));

        assert!(!store.toggle("7").unwrap());
        assert!(!store.is_obtained("7"));
        let reloaded = OwnershipStore::load(FileStorage::new(dir.path()), SLOT);
        assert!(!reloaded.is_obtained("7"));
        assert!(reloaded.is_empty());
    }

    #[test]
    fn persists_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = OwnershipStore::load(FileStorage::new(dir.path()), SLOT);
        store.toggle("b").unwrap();
        store.toggle("a").unwrap();

        let raw = FileStorage::new(dir.path()).get(SLOT).unwrap().unwrap();
        let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"a".to_string()) && ids.contains(&"b".to_string()));
    }

    #[test]
    fn loads_existing_ids() {
        let store = OwnershipStore::load(storage_with(r#"["1","2"]"#), SLOT);
        assert!(store.is_obtained("1"));
        assert!(store.is_obtained("2"));
        assert!(!store.is_obtained("3"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn malformed_state_starts_empty() {
        for raw in ["not json", r#"{"a":1}"#, "[1,2]", "null", ""] {
            let store = OwnershipStore::load(storage_with(raw), SLOT);
            assert!(store.is_empty(), "{raw} should load as empty");
        }
    }

    #[test]
    fn missing_slot_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = OwnershipStore::load(FileStorage::new(dir.path().join("nested")), SLOT);
        assert!(store.is_empty());
    }

    #[test]
    fn clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = OwnershipStore::load(FileStorage::new(dir.path()), SLOT);
        store.toggle("1").unwrap();
        store.clear().unwrap();

        let reloaded = OwnershipStore::load(FileStorage::new(dir.path()), SLOT);
        assert!(reloaded.is_empty());
        assert_eq!(reloaded.obtained().count(), 0);
    }
}
