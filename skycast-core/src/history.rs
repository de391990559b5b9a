use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::{fs, path::PathBuf};

/// Fixed key the search list is persisted under.
const STORAGE_KEY: &str = "recent_searches";

/// The list never grows past this many entries.
const MAX_ENTRIES: usize = 3;

/// Minimal persistent key/value capability. Injected so front ends and
/// tests can choose where (or whether) the list actually lands.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keeps values in memory only. Used by tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Writes each key as a JSON file under the platform data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self {
            dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Store rooted at an explicit directory.
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;

        let path = self.path(key);
        fs::write(&path, value)
            .with_context(|| format!("Failed to write store file: {}", path.display()))
    }
}

/// Ordered most-recent-first list of past city searches, capped at three,
/// de-duplicated by exact name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    /// Read the persisted list. Missing or unreadable content yields the
    /// empty list.
    pub fn load(store: &dyn KvStore) -> Self {
        let entries = store
            .get(STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default();

        Self { entries }
    }

    /// Move-to-front insert, persisted immediately. Re-recording an
    /// existing name moves it rather than duplicating it.
    pub fn record(&mut self, name: &str, store: &mut dyn KvStore) -> Result<()> {
        self.entries.retain(|entry| entry != name);
        self.entries.insert(0, name.to_string());
        self.entries.truncate(MAX_ENTRIES);

        let raw = serde_json::to_string(&self.entries)
            .context("Failed to serialize recent searches")?;
        store.set(STORAGE_KEY, &raw)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
