use serde_json::{Map, Value};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;

use super::StorageBackend;
use crate::error::StoreResult;

/// Backend that keeps every key in a single JSON document on disk
///
/// Writes go to a uniquely named temp file in the same directory which is then
/// persisted over the document, so a crash mid-write leaves the previous state intact.
pub struct FileBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_document(&self) -> StoreResult<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let document = self.load_document()?;
        match document.get(key) {
            Some(value) => Ok(Some(serde_json::to_string(value)?)),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, json: String) -> StoreResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // A corrupt document is replaced rather than blocking every future write
        let mut document = self.load_document().unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "Discarding unreadable state file"
            );
            Map::new()
        });
        document.insert(key.to_string(), serde_json::from_str(&json)?);

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writer.flush()?;
        }
        temp_file.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(key = %key, path = %self.path.display(), "State file updated");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
