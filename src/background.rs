//! Async entry points for front ends that must not block
//!
//! Each call runs one unit of work on tokio's blocking pool and resolves when
//! it completes. Work inside a unit is sequential and nothing is cancellable
//! once started. Outcomes are returned to the awaiting caller, which decides
//! whether to re-list.

use crate::ShelfError;
use crate::clipboard::{self, ClipboardSelection, PasteOutcome};
use crate::fs::{self, BatchOutcome, OpenOutcome, Refresh};
use crate::listing::{self, Entry};
use crate::store::TagStore;
use crate::tagger::{ProjectLayout, TaggerInvoker};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

/// Pause before an image entry is classified
pub const IMAGE_RESOLVE_DELAY: Duration = Duration::from_millis(20);

type Result<T> = std::result::Result<T, ShelfError>;

async fn blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    Ok(task::spawn_blocking(work).await?)
}

/// List `path` off the async runtime
///
/// A failed worker degrades to the load-error placeholder, like any other
/// listing failure.
pub async fn list_directory(path: Option<PathBuf>) -> Vec<Entry> {
    match task::spawn_blocking(move || listing::list_directory(path.as_deref())).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "listing task failed");
            vec![Entry::load_error()]
        }
    }
}

/// Classify `entry`, waiting briefly first if it is an image
///
/// Resolves at most once; later calls return the cached answer at once.
pub async fn resolve_image(entry: &Entry) -> bool {
    if entry.is_image_resolved() {
        return entry.is_image();
    }
    if entry.looks_like_image() {
        tokio::time::sleep(IMAGE_RESOLVE_DELAY).await;
    }
    entry.resolve_image()
}

/// Classify every entry of a snapshot in order, returning how many are images
///
/// Each unresolved image entry waits [`IMAGE_RESOLVE_DELAY`] on its own.
pub async fn resolve_images(entries: &[Entry]) -> usize {
    let mut images = 0;
    for entry in entries {
        if resolve_image(entry).await {
            images += 1;
        }
    }
    images
}

/// # Errors
/// Returns `ShelfError::Fs` for a failed rename.
pub async fn rename(entry: Entry, new_name: String, current_dir: PathBuf) -> Result<Refresh> {
    Ok(blocking(move || fs::rename(&entry, &new_name, &current_dir)).await??)
}

/// # Errors
/// Returns `ShelfError::Fs` for a failed delete.
pub async fn delete(entry: Entry, current_dir: PathBuf) -> Result<Refresh> {
    Ok(blocking(move || fs::delete(&entry, &current_dir)).await??)
}

/// # Errors
/// Returns `ShelfError::Fs` if the folder cannot be created.
pub async fn create_folder(current_dir: PathBuf, name: String) -> Result<Refresh> {
    Ok(blocking(move || fs::create_folder(&current_dir, &name)).await??)
}

/// # Errors
/// Returns `ShelfError::Fs` if the file cannot be created.
pub async fn create_file(current_dir: PathBuf, name: String) -> Result<Refresh> {
    Ok(blocking(move || fs::create_file(&current_dir, &name)).await??)
}

/// # Errors
/// Returns `ShelfError::Background` only; per-item failures are in the outcome.
pub async fn move_batch(items: Vec<Entry>, destination: PathBuf) -> Result<BatchOutcome> {
    blocking(move || fs::move_batch(&items, &destination)).await
}

/// # Errors
/// Returns `ShelfError::Background` only; per-item failures are in the outcome.
pub async fn copy_batch(items: Vec<Entry>, destination: PathBuf) -> Result<BatchOutcome> {
    blocking(move || fs::copy_batch(&items, &destination)).await
}

/// # Errors
/// Returns `ShelfError::Fs` if the entry cannot be opened.
pub async fn open(entry: Entry) -> Result<OpenOutcome> {
    Ok(blocking(move || fs::open(&entry)).await??)
}

/// Paste the pending set of `selection` into `destination`
///
/// The pending set is taken before the batch starts, so it is cleared even
/// if the worker fails.
///
/// # Errors
/// Returns `ShelfError::Clipboard` if nothing is pending.
pub async fn paste(selection: &mut ClipboardSelection, destination: PathBuf) -> Result<PasteOutcome> {
    let (mode, items) = selection.take_pending()?;
    blocking(move || clipboard::execute(mode, &items, &destination)).await
}

/// Run the tagger, folding all failures but a missing script into the text
///
/// # Errors
/// Returns `ShelfError::Tagger` if the script is missing.
pub async fn run_tagger(
    invoker: TaggerInvoker,
    layout: ProjectLayout,
    image_dir: PathBuf,
    output_dir: PathBuf,
) -> Result<String> {
    Ok(blocking(move || invoker.run_report(&layout, &image_dir, &output_dir)).await??)
}

/// # Errors
/// Returns `ShelfError::Store` if the exclusion document cannot be written.
pub async fn add_exclusion(store: Arc<TagStore>, image_name: String) -> Result<()> {
    Ok(blocking(move || store.add_exclusion(&image_name)).await??)
}

/// # Errors
/// Returns `ShelfError::Store` if the manual-tag document cannot be written.
pub async fn upsert_manual_tag(store: Arc<TagStore>, image_name: String, tags: Vec<String>) -> Result<()> {
    Ok(blocking(move || store.upsert_manual_tag(&image_name, tags)).await??)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardError;
    use crate::testing::{TestDir, create_test_file, selected_entries};
    use std::time::Instant;

    #[tokio::test]
    async fn test_list_directory() {
        let dir = TestDir::new();
        create_test_file(dir.join("testfile.txt")).unwrap();
        std::fs::create_dir(dir.join("subdir")).unwrap();

        let entries = list_directory(Some(dir.path().to_path_buf())).await;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "subdir");
        assert!(entries[0].is_directory);
        assert_eq!(entries[1].name, "testfile.txt");
        assert!(!entries[1].is_directory);
    }

    #[tokio::test]
    async fn test_list_unsupported_location() {
        let entries = list_directory(None).await;
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_placeholder());
    }

    #[tokio::test]
    async fn test_resolve_image_waits_once() {
        let dir = TestDir::new();
        create_test_file(dir.join("photo.PNG")).unwrap();
        let entry = Entry::from_path(&dir.join("photo.PNG"));

        let start = Instant::now();
        assert!(resolve_image(&entry).await);
        assert!(start.elapsed() >= IMAGE_RESOLVE_DELAY);
        assert!(entry.is_image_resolved());
        assert!(resolve_image(&entry).await);
    }

    #[tokio::test]
    async fn test_resolve_images_counts() {
        let dir = TestDir::new();
        create_test_file(dir.join("a.jpg")).unwrap();
        create_test_file(dir.join("b.txt")).unwrap();
        create_test_file(dir.join("d.gif")).unwrap();
        std::fs::create_dir(dir.join("c.png")).unwrap();

        let entries = list_directory(Some(dir.path().to_path_buf())).await;
        let start = Instant::now();
        assert_eq!(resolve_images(&entries).await, 2);
        assert!(start.elapsed() >= IMAGE_RESOLVE_DELAY * 2);
        assert!(entries.iter().all(Entry::is_image_resolved));
    }

    #[tokio::test]
    async fn test_mutations_report_refresh() {
        let dir = TestDir::new();

        let refresh = create_folder(dir.path().to_path_buf(), "New Folder".into()).await.unwrap();
        assert_eq!(refresh.dir(), dir.path());
        assert!(dir.join("New Folder").is_dir());

        let _ = create_file(dir.path().to_path_buf(), "notes.txt".into()).await.unwrap();
        let entry = Entry::from_path(&dir.join("notes.txt"));
        let _ = rename(entry, "renamed.txt".into(), dir.path().to_path_buf()).await.unwrap();
        assert!(dir.join("renamed.txt").exists());

        let entry = Entry::from_path(&dir.join("renamed.txt"));
        let _ = delete(entry, dir.path().to_path_buf()).await.unwrap();
        assert!(!dir.join("renamed.txt").exists());
    }

    #[tokio::test]
    async fn test_failed_mutation_surfaces_fs_error() {
        let dir = TestDir::new();
        let ghost = Entry::file("ghost.txt", dir.join("ghost.txt"));

        let err = delete(ghost, dir.path().to_path_buf()).await.unwrap_err();
        assert!(matches!(err, ShelfError::Fs(_)));
    }

    #[tokio::test]
    async fn test_paste_moves_cut_set() {
        let dir = TestDir::new();
        let dest = dir.join("dest");
        std::fs::create_dir(&dest).unwrap();
        create_test_file(dir.join("a.txt")).unwrap();

        let mut clipboard = ClipboardSelection::new();
        clipboard.begin_cut(&mut selected_entries(&[dir.join("a.txt")])).unwrap();
        let outcome = paste(&mut clipboard, dest.clone()).await.unwrap();

        assert_eq!(outcome.batch.succeeded, 1);
        assert!(dest.join("a.txt").exists());
        assert!(matches!(
            paste(&mut clipboard, dest).await,
            Err(ShelfError::Clipboard(ClipboardError::NothingToPaste))
        ));
    }

    #[tokio::test]
    async fn test_store_writes() {
        let dir = TestDir::new();
        let store = Arc::new(TagStore::new(dir.join("NoTag.json"), dir.join("ManualTag.json")));

        add_exclusion(Arc::clone(&store), "cat.png".into()).await.unwrap();
        upsert_manual_tag(Arc::clone(&store), "dog.png".into(), vec!["dog".into()]).await.unwrap();

        assert!(store.is_excluded("cat.png"));
        assert!(store.tags_for("dog.png").is_some());
    }

    #[tokio::test]
    async fn test_run_tagger_missing_script() {
        let dir = TestDir::new();
        let layout = ProjectLayout::new(dir.path(), "tagger");

        let err = run_tagger(TaggerInvoker::default(), layout, dir.join("in"), dir.join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfError::Tagger(e) if e.is_not_found()));
    }
}
