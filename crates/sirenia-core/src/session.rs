//! Last-edited source per editor mode, persisted through an injected key-value store.
//!
//! Persistence is best-effort in both directions: failed or missing reads fall back to built-in
//! defaults, failed writes are logged and dropped.

use crate::mode::EditorMode;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key holding the last active mode id.
pub const MODE_KEY: &str = "editor-mode";

pub fn source_key(mode: EditorMode) -> String {
    format!("{}-session-code", mode.id())
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A flat JSON object on disk. Every write rewrites the whole file (last write wins).
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        let text = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct Session<S> {
    store: S,
    mode: EditorMode,
    source: String,
}

impl<S: KeyValueStore> Session<S> {
    /// Restores the last active mode and its source, falling back to defaults.
    pub fn restore(store: S) -> Self {
        let mode = match read(&store, MODE_KEY) {
            Some(raw) => raw.parse::<EditorMode>().unwrap_or_else(|err| {
                tracing::warn!(%err, "ignoring persisted editor mode");
                EditorMode::default()
            }),
            None => EditorMode::default(),
        };
        let source = saved_or_default(&store, mode);
        Self {
            store,
            mode,
            source,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.persist_source();
    }

    /// Activates `mode` and loads its saved source (or the built-in default).
    pub fn switch_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        write(&mut self.store, MODE_KEY, mode.id());
        self.source = saved_or_default(&self.store, mode);
        self.persist_source();
    }

    pub fn reset_to_default(&mut self) {
        self.set_source(self.mode.default_document());
    }

    pub fn clear(&mut self) {
        self.set_source(String::new());
    }

    fn persist_source(&mut self) {
        write(&mut self.store, &source_key(self.mode), &self.source);
    }
}

fn read<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(key, %err, "session read failed");
            None
        }
    }
}

fn write<S: KeyValueStore>(store: &mut S, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        tracing::warn!(key, %err, "session write failed");
    }
}

// An empty saved source counts as "nothing saved".
fn saved_or_default<S: KeyValueStore>(store: &S, mode: EditorMode) -> String {
    read(store, &source_key(mode))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| mode.default_document().to_string())
}
