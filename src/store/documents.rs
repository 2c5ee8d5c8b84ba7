//! On-disk shapes of the two sidecar documents
//!
//! Field names follow the files the tagger script reads:
//!
//! ```json
//! { "NoTagImages": [ { "ImageName": "cat.png" } ] }
//! { "ManualTagImages": [ { "ImageName": "cat.png", "Tags": ["cat", "pet"] } ] }
//! ```

use super::error::StoreError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRecord {
    #[serde(rename = "ImageName")]
    pub image_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualTagRecord {
    #[serde(rename = "ImageName")]
    pub image_name: String,
    #[serde(rename = "Tags", default)]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionDocument {
    #[serde(rename = "NoTagImages", default)]
    pub images: Vec<ExclusionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualTagDocument {
    #[serde(rename = "ManualTagImages", default)]
    pub images: Vec<ManualTagRecord>,
}

impl ManualTagDocument {
    /// Replace any record for `record.image_name` and append `record`
    pub fn upsert(&mut self, record: ManualTagRecord) {
        self.images.retain(|r| r.image_name != record.image_name);
        self.images.push(record);
    }
}

/// Read a document, falling back to an empty one
pub(crate) fn load<T: DeserializeOwned + Default>(path: &Path) -> T {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "sidecar not readable, starting empty");
            return T::default();
        }
    };
    serde_json::from_str(&text).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "malformed sidecar, starting empty");
        T::default()
    })
}

/// Pretty-print `document` to a temp file beside `path`, then rename it over
/// `path`
pub(crate) fn save<T: Serialize>(path: &Path, document: &T) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    serde_json::to_writer_pretty(&mut tmp, document).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    tmp.flush().map_err(|e| StoreError::io(path, e))?;
    tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}
