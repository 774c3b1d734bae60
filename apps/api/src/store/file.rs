use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::warn;

use super::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// Key-value store backed by a single JSON object file (`{ "key": "value" }`).
///
/// Writes go to a temp file in the same directory, then rename over the target.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };
        let entries = parse_entries(&content)
            .with_context(|| format!("{} is not a key-value file", self.path.display()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let path = self.path.clone();
        let key = key.to_string();
        // Blocking file I/O stays off the async workers.
        tokio::task::spawn_blocking(move || write_entry(&path, key, value))
            .await
            .context("Store write task failed")?
    }
}

fn parse_entries(content: &str) -> Result<Entries> {
    if content.trim().is_empty() {
        return Ok(Entries::new());
    }
    Ok(serde_json::from_str(content)?)
}

fn write_entry(path: &Path, key: String, value: String) -> Result<()> {
    let mut entries = match std::fs::read_to_string(path) {
        Ok(content) => parse_entries(&content).unwrap_or_else(|e| {
            warn!("Replacing unreadable store file {}: {e}", path.display());
            Entries::new()
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Entries::new(),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };
    entries.insert(key, value);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut tmp, &entries)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
