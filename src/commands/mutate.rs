//! Mutation commands: rename, rm, mkdir, touch

use super::{Context, Result, containing_dir, dir_or_cwd};
use crate::ShelfError;
use crate::background;
use crate::fs::ItemFailure;
use crate::listing::Entry;
use std::path::{Path, PathBuf};

/// Rename `path` to `new_name` within its directory, after confirmation
///
/// # Errors
/// Returns `ShelfError::Fs` if the rename fails.
pub async fn rename(ctx: &Context<'_>, path: &Path, new_name: &str) -> Result<()> {
    let entry = Entry::from_path(path);
    if !ctx.confirm(&format!("Rename '{}' to '{new_name}'?", entry.name))? {
        ctx.note("Rename cancelled.");
        return Ok(());
    }

    let refresh = background::rename(entry, new_name.to_string(), containing_dir(path)).await?;
    ctx.refreshed(refresh);
    ctx.done(&format!("Renamed {} to {new_name}", path.display()));
    Ok(())
}

/// Delete every path after one confirmation
///
/// Each path is deleted on its own; failures are reported and the rest carry
/// on.
///
/// # Errors
/// Returns `ShelfError::Incomplete` if any path could not be deleted.
pub async fn rm(ctx: &Context<'_>, paths: &[PathBuf]) -> Result<()> {
    let prompt = match paths {
        [single] => format!("Delete '{}'?", single.display()),
        _ => format!("Delete {} items?", paths.len()),
    };
    if !ctx.confirm(&prompt)? {
        ctx.note("Delete cancelled.");
        return Ok(());
    }

    let mut failures = Vec::new();
    for path in paths {
        match background::delete(Entry::from_path(path), containing_dir(path)).await {
            Ok(refresh) => {
                ctx.refreshed(refresh);
                ctx.done(&format!("Deleted {}", path.display()));
            }
            Err(ShelfError::Fs(error)) => failures.push(ItemFailure {
                path: path.clone(),
                error,
            }),
            Err(other) => return Err(other),
        }
    }
    ctx.report_failures(&failures, paths.len())
}

/// Create a folder named `name` in `dir`
///
/// # Errors
/// Returns `ShelfError::Fs` if the name is invalid or creation fails.
pub async fn mkdir(ctx: &Context<'_>, name: &str, dir: Option<&Path>) -> Result<()> {
    let dir = dir_or_cwd(dir)?;
    let refresh = background::create_folder(dir.clone(), name.to_string()).await?;
    ctx.refreshed(refresh);
    ctx.done(&format!("Created folder {}", dir.join(name.trim()).display()));
    Ok(())
}

/// Create an empty file named `name` in `dir`
///
/// # Errors
/// Returns `ShelfError::Fs` if the name is invalid or creation fails.
pub async fn touch(ctx: &Context<'_>, name: &str, dir: Option<&Path>) -> Result<()> {
    let dir = dir_or_cwd(dir)?;
    let refresh = background::create_file(dir.clone(), name.to_string()).await?;
    ctx.refreshed(refresh);
    ctx.done(&format!("Created file {}", dir.join(name.trim()).display()));
    Ok(())
}
