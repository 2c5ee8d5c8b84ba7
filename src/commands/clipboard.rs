//! Clipboard commands: cut, copy, paste, clipboard
//!
//! A command-line session ends after every command, so the pending sets are
//! kept in a JSON file in the user's data directory between invocations.

use super::{Context, Result, dir_or_cwd};
use crate::ShelfError;
use crate::background;
use crate::clipboard::{ClipboardSelection, ClipboardState, PasteMode};
use crate::listing::Entry;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the session file
///
/// # Errors
/// Returns `ShelfError::InvalidInput` if the data directory is unknown.
pub fn session_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| ShelfError::InvalidInput("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("pixshelf").join("clipboard.json"))
}

/// Read the session; a missing or unreadable file is an empty session
#[must_use]
pub fn load_session(path: &Path) -> ClipboardSelection {
    let Ok(text) = fs::read_to_string(path) else {
        return ClipboardSelection::new();
    };
    serde_json::from_str(&text).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "discarding unreadable clipboard session");
        ClipboardSelection::new()
    })
}

/// Write the session
///
/// # Errors
/// Returns an error if the file or its directory cannot be written.
pub fn save_session(path: &Path, session: &ClipboardSelection) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(session)?)?;
    Ok(())
}

/// Selected entries for `paths`, made absolute so a later paste from
/// another directory still finds them
fn selected_entries(paths: &[PathBuf]) -> Result<Vec<Entry>> {
    paths
        .iter()
        .map(|path| {
            let mut entry = Entry::from_path(&std::path::absolute(path)?);
            entry.is_selected = true;
            Ok(entry)
        })
        .collect()
}

/// Mark `paths` to be moved by the next paste
///
/// # Errors
/// Returns an error if the session cannot be saved.
pub fn cut(ctx: &Context<'_>, paths: &[PathBuf]) -> Result<()> {
    begin(ctx, paths, PasteMode::Move)
}

/// Mark `paths` to be copied by the next paste
///
/// # Errors
/// Returns an error if the session cannot be saved.
pub fn copy(ctx: &Context<'_>, paths: &[PathBuf]) -> Result<()> {
    begin(ctx, paths, PasteMode::Copy)
}

fn begin(ctx: &Context<'_>, paths: &[PathBuf], mode: PasteMode) -> Result<()> {
    let mut session = load_session(&ctx.clipboard_file);
    let mut entries = selected_entries(paths)?;
    let taken = match mode {
        PasteMode::Move => session.begin_cut(&mut entries)?,
        PasteMode::Copy => session.begin_copy(&mut entries)?,
    };
    save_session(&ctx.clipboard_file, &session)?;
    ctx.done(&format!("{taken} item(s) ready to {mode}"));
    Ok(())
}

/// Paste the pending set into `dest`
///
/// The pasted set is dropped from the session whatever the per-item results.
///
/// # Errors
/// Returns `ShelfError::Clipboard` if nothing is pending, or
/// `ShelfError::Incomplete` if some items failed.
pub async fn paste(ctx: &Context<'_>, dest: Option<&Path>) -> Result<()> {
    let dest = dir_or_cwd(dest)?;
    let mut session = load_session(&ctx.clipboard_file);
    let result = background::paste(&mut session, dest.clone()).await;
    save_session(&ctx.clipboard_file, &session)?;
    let outcome = result?;

    let verb = match outcome.mode {
        PasteMode::Move => "Moved",
        PasteMode::Copy => "Copied",
    };
    let total = outcome.batch.succeeded + outcome.batch.failed();
    let (succeeded, failures) = outcome
        .batch
        .notify(|dir| tracing::debug!(dir = %dir.display(), "refresh requested"));
    ctx.done(&format!("{verb} {succeeded} item(s) into {}", dest.display()));
    ctx.report_failures(&failures, total)
}

/// Show the pending sets, or clear them
///
/// # Errors
/// Returns an error if a cleared session cannot be saved.
pub fn show(ctx: &Context<'_>, clear: bool) -> Result<()> {
    let mut session = load_session(&ctx.clipboard_file);
    if clear {
        session.clear();
        save_session(&ctx.clipboard_file, &session)?;
        ctx.done("Clipboard cleared");
        return Ok(());
    }

    let state = match session.state() {
        ClipboardState::Idle => "nothing pending",
        ClipboardState::CutPending => "next paste moves the cut set",
        ClipboardState::CopyPending => "next paste copies the copy set",
    };
    ctx.note(&format!("Clipboard: {state}"));
    for entry in session.cut_set() {
        ctx.output.write(&format!("cut  {}", entry.path.display()));
    }
    for entry in session.copy_set() {
        ctx.output.write(&format!("copy {}", entry.path.display()));
    }
    Ok(())
}
