use std::fs;
use std::path::{Path, PathBuf};

use super::memory::MemoryStore;
use super::model::Snippet;
use super::store::SnippetStore;
use crate::core::{Error, Result};

/// A [`MemoryStore`] persisted to a single JSON document.
///
/// The whole document is rewritten after every mutation, through a
/// temporary sibling file and a rename so readers never see half a write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let inner = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No store at {}, starting empty", path.display());
                MemoryStore::default()
            }
            Err(e) => return Err(Error::file_system("Failed to read store", &path, e)),
        };
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::file_system("Failed to create store directory", parent, e))?;
        }

        let json = serde_json::to_string_pretty(&self.inner)?;
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, json)
            .map_err(|e| Error::file_system("Failed to write store", &temp, e))?;
        fs::rename(&temp, &self.path)
            .map_err(|e| Error::file_system("Failed to replace store", &self.path, e))?;
        log::debug!("Saved {} snippets to {}", self.inner.len(), self.path.display());
        Ok(())
    }
}

impl SnippetStore for JsonFileStore {
    fn snippets(&self) -> Vec<&Snippet> {
        self.inner.snippets()
    }

    fn get(&self, id: &str) -> Option<&Snippet> {
        self.inner.get(id)
    }

    fn allocate_id(&mut self) -> String {
        self.inner.allocate_id()
    }

    fn put(&mut self, snippet: Snippet) -> Result<()> {
        self.inner.put(snippet)?;
        self.save()
    }

    fn put_all(&mut self, snippets: Vec<Snippet>) -> Result<()> {
        if snippets.is_empty() {
            return Ok(());
        }
        self.inner.put_all(snippets)?;
        self.save()
    }

    fn remove(&mut self, id: &str) -> Result<Option<Snippet>> {
        let removed = self.inner.remove(id)?;
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }
}
