//! Persistence of generated documents.

use crate::config::Encoding;
use crate::error::{GenerateError, Result};
use crate::model::{DocRef, GeneratedDocument};
use crate::render::render_menu_xml;
use std::fs;
use std::path::{Path, PathBuf};

/// Receives each document exactly once, children before their parent.
pub trait DocumentStore {
    fn store(&mut self, reference: &DocRef, document: &GeneratedDocument) -> Result<()>;
}

/// Writes `<reference>.xml` files into a directory.
#[derive(Debug)]
pub struct DirStore {
    dir: PathBuf,
    menu_http_root: String,
    encoding: Encoding,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>, menu_http_root: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            dir: dir.into(),
            menu_http_root: menu_http_root.into(),
            encoding,
        }
    }

    /// Start from an empty directory: remove any previous output, then create it.
    pub fn provision(&self) -> std::io::Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
            tracing::warn!("existing directory {} removed recursively", self.dir.display());
        }
        fs::create_dir_all(&self.dir)?;
        tracing::warn!("directory {} created", self.dir.display());
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentStore for DirStore {
    fn store(&mut self, reference: &DocRef, document: &GeneratedDocument) -> Result<()> {
        let path = self.dir.join(reference.file_name());
        let bytes = render_menu_xml(document, &self.menu_http_root, self.encoding);
        fs::write(&path, bytes).map_err(|source| GenerateError::Storage {
            reference: reference.to_string(),
            source,
        })?;
        tracing::debug!("wrote {}", path.display());
        Ok(())
    }
}

/// Keeps documents in memory, in store order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub documents: Vec<(DocRef, GeneratedDocument)>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn get(&self, reference: &DocRef) -> Option<&GeneratedDocument> {
        self.documents
            .iter()
            .find(|(r, _)| r == reference)
            .map(|(_, d)| d)
    }
}

impl DocumentStore for MemoryStore {
    fn store(&mut self, reference: &DocRef, document: &GeneratedDocument) -> Result<()> {
        self.documents.push((reference.clone(), document.clone()));
        Ok(())
    }
}
