use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{KeyValueStore, StorageError};

/// Durable store backed by a single JSON object file mapping keys to string
/// values. The whole document is rewritten on every change through a sibling
/// temp file and a rename, so a crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the document at `path`, creating nothing until the first write.
    ///
    /// Entries are read one by one: a value that is not a JSON string is kept
    /// as its JSON text, so a hand-edited `900` still reads as `"900"` and
    /// never costs the other keys. A document that is not a JSON object at
    /// all is moved aside to `<path>.corrupt` and the store starts out empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No store document at {}", path.display());
                return Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let entries = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Self::entries_from(map),
            Ok(other) => {
                warn!(
                    "Store document {} is not an object (found {})",
                    path.display(),
                    kind(&other)
                );
                Self::set_aside(&path)?;
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Store document {} is unreadable: {}", path.display(), e);
                Self::set_aside(&path)?;
                BTreeMap::new()
            }
        };

        debug!("Opened store {} with {} keys", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    fn entries_from(map: Map<String, Value>) -> BTreeMap<String, String> {
        map.into_iter()
            .map(|(key, value)| match value {
                Value::String(text) => (key, text),
                other => {
                    warn!(key = %key, "Store value is not a string, keeping it as JSON text");
                    (key, other.to_string())
                }
            })
            .collect()
    }

    /// Rename an unreadable document so the next write cannot destroy it.
    fn set_aside(path: &Path) -> Result<(), StorageError> {
        let aside = Self::corrupt_path(path);
        fs::rename(path, &aside)?;
        warn!("Moved unreadable store document to {}", aside.display());
        Ok(())
    }

    /// Where an unreadable document at `path` is kept.
    pub fn corrupt_path(path: &Path) -> PathBuf {
        let mut aside = path.as_os_str().to_owned();
        aside.push(".corrupt");
        PathBuf::from(aside)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = serde_json::to_string_pretty(&self.entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, document)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush() {
            self.entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
