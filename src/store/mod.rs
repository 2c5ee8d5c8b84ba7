//! JSON sidecar stores read by the tagger
//!
//! Two whole-document stores keyed by image file name:
//!
//! - the **exclusion store** lists images the tagger should skip; appending
//!   never dedupes, so an image may appear more than once
//! - the **manual-tag store** holds user-assigned tags, at most one record
//!   per image name
//!
//! Every mutation loads the full document, changes it in memory and rewrites
//! it. A [`TagStore`] serializes its own read-modify-write cycles; separate
//! processes writing the same files are not coordinated.

mod documents;
mod error;
mod vocabulary;

pub use documents::{ExclusionDocument, ExclusionRecord, ManualTagDocument, ManualTagRecord};
pub use error::StoreError;
pub use vocabulary::{SUGGESTION_LIMIT, TagVocabulary};

use crate::tagger::ProjectLayout;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Handle on the exclusion and manual-tag documents
#[derive(Debug)]
pub struct TagStore {
    exclusion_path: PathBuf,
    manual_tag_path: PathBuf,
    lock: Mutex<()>,
}

impl TagStore {
    #[must_use]
    pub fn new(exclusion_path: impl Into<PathBuf>, manual_tag_path: impl Into<PathBuf>) -> Self {
        Self {
            exclusion_path: exclusion_path.into(),
            manual_tag_path: manual_tag_path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn from_layout(layout: &ProjectLayout) -> Self {
        Self::new(layout.exclusion_store(), layout.manual_tag_store())
    }

    #[must_use]
    pub fn exclusion_path(&self) -> &Path {
        &self.exclusion_path
    }

    #[must_use]
    pub fn manual_tag_path(&self) -> &Path {
        &self.manual_tag_path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded state lives on disk, so a poisoned lock is still usable.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `image_name` to the exclusion store
    ///
    /// # Errors
    /// Returns `StoreError` if the document cannot be written back.
    pub fn add_exclusion(&self, image_name: &str) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut doc: ExclusionDocument = documents::load(&self.exclusion_path);
        doc.images.push(ExclusionRecord {
            image_name: image_name.to_owned(),
        });
        documents::save(&self.exclusion_path, &doc)?;
        tracing::debug!(image = image_name, total = doc.images.len(), "exclusion added");
        Ok(())
    }

    /// Replace the manual tags recorded for `image_name`
    ///
    /// # Errors
    /// Returns `StoreError` if the document cannot be written back.
    pub fn upsert_manual_tag<I, S>(&self, image_name: &str, tags: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let _guard = self.guard();
        let mut doc: ManualTagDocument = documents::load(&self.manual_tag_path);
        doc.upsert(ManualTagRecord {
            image_name: image_name.to_owned(),
            tags: tags.into_iter().map(Into::into).collect(),
        });
        documents::save(&self.manual_tag_path, &doc)?;
        tracing::debug!(image = image_name, "manual tags saved");
        Ok(())
    }

    #[must_use]
    pub fn exclusions(&self) -> Vec<ExclusionRecord> {
        let _guard = self.guard();
        documents::load::<ExclusionDocument>(&self.exclusion_path).images
    }

    #[must_use]
    pub fn manual_tags(&self) -> Vec<ManualTagRecord> {
        let _guard = self.guard();
        documents::load::<ManualTagDocument>(&self.manual_tag_path).images
    }

    /// Tags recorded for `image_name`, if it has a record
    #[must_use]
    pub fn tags_for(&self, image_name: &str) -> Option<BTreeSet<String>> {
        self.manual_tags()
            .into_iter()
            .find(|r| r.image_name == image_name)
            .map(|r| r.tags)
    }

    #[must_use]
    pub fn is_excluded(&self, image_name: &str) -> bool {
        self.exclusions().iter().any(|r| r.image_name == image_name)
    }
}

/// Store key for an image path: its file name
#[must_use]
pub fn image_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDir, create_test_file_with_content};
    use std::sync::Arc;

    fn store_in(dir: &TestDir) -> TagStore {
        TagStore::new(dir.join("NoTag.json"), dir.join("ManualTag.json"))
    }

    #[test]
    fn test_exclusions_are_not_deduped() {
        let dir = TestDir::new();
        let store = store_in(&dir);

        store.add_exclusion("cat.png").unwrap();
        store.add_exclusion("cat.png").unwrap();

        assert_eq!(store.exclusions().len(), 2);
        assert!(store.is_excluded("cat.png"));
        assert!(!store.is_excluded("dog.png"));
    }

    #[test]
    fn test_upsert_keeps_one_record_with_latest_tags() {
        let dir = TestDir::new();
        let store = store_in(&dir);

        store.upsert_manual_tag("cat.png", ["a", "b"]).unwrap();
        store.upsert_manual_tag("dog.png", ["dog"]).unwrap();
        store.upsert_manual_tag("cat.png", ["c"]).unwrap();

        let records = store.manual_tags();
        assert_eq!(records.len(), 2);
        assert_eq!(records.iter().filter(|r| r.image_name == "cat.png").count(), 1);
        assert_eq!(store.tags_for("cat.png"), Some(BTreeSet::from(["c".to_string()])));
        assert_eq!(records.last().unwrap().image_name, "cat.png");
    }

    #[test]
    fn test_malformed_document_is_replaced() {
        let dir = TestDir::new();
        create_test_file_with_content(dir.join("NoTag.json"), b"[1, 2").unwrap();
        let store = store_in(&dir);

        assert!(store.exclusions().is_empty());
        store.add_exclusion("x.jpg").unwrap();

        let text = std::fs::read_to_string(dir.join("NoTag.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["NoTagImages"][0]["ImageName"], "x.jpg");
    }

    #[test]
    fn test_existing_records_survive_rewrite() {
        let dir = TestDir::new();
        create_test_file_with_content(
            dir.join("ManualTag.json"),
            br#"{"ManualTagImages":[{"ImageName":"old.png","Tags":["kept"]}]}"#,
        )
        .unwrap();
        let store = store_in(&dir);

        store.upsert_manual_tag("new.png", Vec::<String>::new()).unwrap();

        assert_eq!(store.tags_for("old.png"), Some(BTreeSet::from(["kept".to_string()])));
        assert_eq!(store.tags_for("new.png"), Some(BTreeSet::new()));
        assert_eq!(store.tags_for("absent.png"), None);
    }

    #[test]
    fn test_concurrent_appends_are_serialized() {
        let dir = TestDir::new();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.add_exclusion(&format!("img{i}.png")).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.exclusions().len(), 8);
    }

    #[test]
    fn test_image_name_of() {
        assert_eq!(image_name_of(Path::new("/photos/cat.png")), Some("cat.png".to_string()));
        assert_eq!(image_name_of(Path::new("/")), None);
    }

    #[test]
    fn test_from_layout_paths() {
        let layout = ProjectLayout::new("/proj", "tagger");
        let store = TagStore::from_layout(&layout);
        assert_eq!(store.exclusion_path(), Path::new("/proj/tagger/NoTag.json"));
        assert_eq!(store.manual_tag_path(), Path::new("/proj/tagger/ManualTag.json"));
    }
}
