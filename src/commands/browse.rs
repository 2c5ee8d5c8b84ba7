//! Browsing commands: ls, bookmarks, up, open

use super::{Context, Result, dir_or_cwd};
use crate::ShelfError;
use crate::background;
use crate::fs::OpenOutcome;
use crate::listing::{self, BookmarkTarget, Entry, Navigation};
use crate::tagger::ProjectLayout;
use crate::ui::{format_bookmark, format_entry};
use std::path::Path;

/// Options for [`ls`]
#[derive(Debug, Default, Clone)]
pub struct ListOptions<'a> {
    pub filter: Option<&'a str>,
    pub images: bool,
    pub json: bool,
}

/// List a directory
///
/// # Errors
/// Returns an error if the working directory is unavailable or JSON output
/// cannot be encoded. Unreadable directories print the error row instead.
pub async fn ls(ctx: &Context<'_>, path: Option<&Path>, options: &ListOptions<'_>) -> Result<()> {
    let dir = dir_or_cwd(path)?;
    let entries = background::list_directory(Some(dir)).await;
    print_entries(ctx, entries, options).await
}

async fn print_entries(ctx: &Context<'_>, entries: Vec<Entry>, options: &ListOptions<'_>) -> Result<()> {
    let entries = match options.filter {
        Some(query) => listing::filter_entries(&entries, query),
        None => entries,
    };

    if options.images || options.json {
        let count = background::resolve_images(&entries).await;
        tracing::debug!(images = count, "classified entries");
    }

    if options.json {
        ctx.output.write(&serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        ctx.note("No entries.");
    }
    for entry in &entries {
        ctx.output.write(&format_entry(entry));
    }
    Ok(())
}

fn bookmark_set(ctx: &Context<'_>) -> Vec<BookmarkTarget> {
    let tagged = ProjectLayout::from_config(ctx.config)
        .map(|layout| layout.output_dir())
        .map_err(|e| tracing::debug!(error = %e, "no tagged images bookmark"))
        .ok();
    listing::default_bookmarks(tagged)
}

fn lookup<'b>(bookmarks: &'b [BookmarkTarget], name: &str) -> Result<&'b BookmarkTarget> {
    listing::find_bookmark(bookmarks, name)
        .ok_or_else(|| ShelfError::InvalidInput(format!("Unknown bookmark: '{name}'")))
}

/// Show all bookmarks, or list the directory behind one
///
/// # Errors
/// Returns `ShelfError::InvalidInput` for an unknown bookmark name.
pub async fn bookmarks(ctx: &Context<'_>, name: Option<&str>) -> Result<()> {
    let bookmarks = bookmark_set(ctx);

    let Some(name) = name else {
        for bookmark in &bookmarks {
            ctx.output.write(&format_bookmark(bookmark));
        }
        return Ok(());
    };

    let bookmark = lookup(&bookmarks, name)?;
    let entries = background::list_directory(bookmark.path.clone()).await;
    print_entries(ctx, entries, &ListOptions::default()).await
}

/// Print the directory "up" leads to from `path`
///
/// Leaving the directory of the named bookmark asks first; declining prints
/// the current directory.
///
/// # Errors
/// Returns an error for an unknown bookmark or a failed prompt.
pub fn up(ctx: &Context<'_>, path: Option<&Path>, bookmark: Option<&str>) -> Result<()> {
    let current = dir_or_cwd(path)?;
    let bookmarks = bookmark_set(ctx);
    let active = bookmark.map(|name| lookup(&bookmarks, name)).transpose()?;

    match listing::navigate_up(&current, active) {
        Navigation::Parent(parent) => ctx.output.write(&parent.display().to_string()),
        Navigation::ConfirmLeave { parent, bookmark } => {
            if ctx.confirm(&format!("Leave the {bookmark} bookmark?"))? {
                ctx.output.write(&parent.display().to_string());
            } else {
                ctx.note("Staying put.");
                ctx.output.write(&current.display().to_string());
            }
        }
        Navigation::AtRoot => {
            ctx.note("Already at the top.");
            ctx.output.write(&current.display().to_string());
        }
    }
    Ok(())
}

/// Open a file with its default application, or list a directory
///
/// # Errors
/// Returns `ShelfError::Fs` if no handler can be launched.
pub async fn open(ctx: &Context<'_>, path: &Path) -> Result<()> {
    match background::open(Entry::from_path(path)).await? {
        OpenOutcome::Navigate(dir) => {
            let entries = background::list_directory(Some(dir)).await;
            print_entries(ctx, entries, &ListOptions::default()).await
        }
        OpenOutcome::Launched(file) => {
            ctx.done(&format!("Opened {}", file.display()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Harness;
    use crate::testing::{TestDir, create_test_file};
    use crate::ui::{Answer, MessageLevel, ScriptedInput};

    fn harness(dir: &TestDir) -> Harness {
        Harness::new(dir.join("clipboard.json"))
    }

    #[tokio::test]
    async fn test_ls_prints_directories_first() {
        let dir = TestDir::new();
        create_test_file(dir.join("a.txt")).unwrap();
        std::fs::create_dir(dir.join("zdir")).unwrap();
        let harness = harness(&dir);

        ls(&harness.ctx(), Some(dir.path()), &ListOptions::default()).await.unwrap();

        let rows = harness.output.at_level(MessageLevel::Normal);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("zdir/"));
        assert!(rows[1].contains("a.txt"));
    }

    #[tokio::test]
    async fn test_ls_filter_and_json() {
        let dir = TestDir::new();
        create_test_file(dir.join("cat.png")).unwrap();
        create_test_file(dir.join("dog.txt")).unwrap();
        let harness = harness(&dir);
        let options = ListOptions {
            filter: Some("CAT"),
            json: true,
            ..ListOptions::default()
        };

        ls(&harness.ctx(), Some(dir.path()), &options).await.unwrap();

        let json = &harness.output.at_level(MessageLevel::Normal)[0];
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["name"], "cat.png");
        assert_eq!(value[0]["is_image"], true);
    }

    #[tokio::test]
    async fn test_ls_missing_directory_shows_error_row() {
        let dir = TestDir::new();
        let harness = harness(&dir);

        ls(&harness.ctx(), Some(&dir.join("missing")), &ListOptions::default()).await.unwrap();

        assert!(harness.output.contains(listing::LOAD_ERROR_NAME));
    }

    #[tokio::test]
    async fn test_recycle_bin_bookmark_is_unsupported() {
        let dir = TestDir::new();
        let harness = harness(&dir);

        bookmarks(&harness.ctx(), Some("recycle bin")).await.unwrap();

        assert!(harness.output.contains(listing::UNSUPPORTED_LOCATION_NAME));
    }

    #[tokio::test]
    async fn test_unknown_bookmark() {
        let dir = TestDir::new();
        let harness = harness(&dir);
        assert!(matches!(
            bookmarks(&harness.ctx(), Some("Nowhere")).await,
            Err(ShelfError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_up_prints_parent() {
        let dir = TestDir::new();
        let harness = harness(&dir);

        up(&harness.ctx(), Some(&dir.join("sub")), None).unwrap();

        assert_eq!(
            harness.output.at_level(MessageLevel::Normal),
            vec![dir.path().display().to_string()]
        );
    }

    #[test]
    fn test_up_from_root() {
        let dir = TestDir::new();
        let harness = harness(&dir);

        up(&harness.ctx(), Some(Path::new("/")), None).unwrap();

        assert!(harness.output.contains("Already at the top."));
    }

    #[test]
    fn test_up_from_relative_path_prints_cwd() {
        let dir = TestDir::new();
        let harness = harness(&dir);

        up(&harness.ctx(), Some(Path::new("sub")), None).unwrap();

        assert_eq!(
            harness.output.at_level(MessageLevel::Normal),
            vec![std::env::current_dir().unwrap().display().to_string()]
        );
        assert!(!harness.output.contains("Already at the top."));
    }

    #[test]
    fn test_up_out_of_bookmark_can_be_declined() {
        let dir = TestDir::new();
        let mut harness = harness(&dir);
        harness.config.project_root = Some(dir.path().to_path_buf());
        harness.assume_yes = false;
        harness.input = ScriptedInput::new([Answer::Confirm(false)]);
        let tagged = dir.join("tagger/processed_images");

        up(&harness.ctx(), Some(&tagged), Some("tagged images")).unwrap();

        assert_eq!(harness.input.prompts(), vec!["Leave the Tagged Images bookmark?"]);
        assert_eq!(
            harness.output.at_level(MessageLevel::Normal),
            vec![tagged.display().to_string()]
        );
    }

    #[tokio::test]
    async fn test_open_directory_lists_it() {
        let dir = TestDir::new();
        std::fs::create_dir(dir.join("sub")).unwrap();
        create_test_file(dir.join("sub/inner.txt")).unwrap();
        let harness = harness(&dir);

        open(&harness.ctx(), &dir.join("sub")).await.unwrap();

        assert!(harness.output.contains("inner.txt"));
    }
}
