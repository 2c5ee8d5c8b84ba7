//! Tagger commands: run, exclude, manual, show, vocab

use super::{Context, Result};
use crate::ShelfError;
use crate::background;
use crate::store::{self, TagStore, TagVocabulary};
use crate::tagger::{ProjectLayout, TaggerInvoker};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn layout(ctx: &Context<'_>) -> Result<ProjectLayout> {
    Ok(ProjectLayout::from_config(ctx.config)?)
}

fn image_name(image: &Path) -> Result<String> {
    store::image_name_of(image)
        .ok_or_else(|| ShelfError::InvalidInput(format!("Not an image name: '{}'", image.display())))
}

/// Run the tagger script and print what it reported
///
/// A failed run is printed as an error line, not returned.
///
/// # Errors
/// Returns `ShelfError::Tagger` if the project or the script cannot be found.
pub async fn run(ctx: &Context<'_>, images: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let layout = layout(ctx)?;
    let image_dir = images.unwrap_or_else(|| layout.image_dir());
    let output_dir = output.unwrap_or_else(|| layout.output_dir());
    let invoker = TaggerInvoker::new(ctx.config.interpreter.clone());

    ctx.note(&format!("Tagging {} ...", image_dir.display()));
    let report = background::run_tagger(invoker, layout, image_dir, output_dir).await?;

    if report.starts_with("Error:") {
        ctx.output.error(report.trim_end());
    } else if !report.trim().is_empty() {
        ctx.output.write(report.trim_end());
    }
    Ok(())
}

/// Add images to the exclusion store
///
/// # Errors
/// Returns `ShelfError::Store` if the store cannot be written.
pub async fn exclude(ctx: &Context<'_>, images: &[PathBuf]) -> Result<()> {
    let store = Arc::new(TagStore::from_layout(&layout(ctx)?));
    for image in images {
        let name = image_name(image)?;
        background::add_exclusion(Arc::clone(&store), name.clone()).await?;
        ctx.done(&format!("Excluded {name} from tagging"));
    }
    Ok(())
}

/// Replace the manual tags of an image
///
/// # Errors
/// Returns `ShelfError::Store` if the store cannot be written.
pub async fn manual(ctx: &Context<'_>, image: &Path, tags: &[String]) -> Result<()> {
    let tags: Vec<String> = tags
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        return Err(ShelfError::InvalidInput("No tags provided".into()));
    }

    let name = image_name(image)?;
    let store = Arc::new(TagStore::from_layout(&layout(ctx)?));
    background::upsert_manual_tag(store, name.clone(), tags.clone()).await?;
    ctx.done(&format!("Tagged {name} with: {}", tags.join(", ")));
    Ok(())
}

/// Print the stores, or what they hold for one image
///
/// # Errors
/// Returns an error if the project cannot be located.
pub fn show(ctx: &Context<'_>, image: Option<&Path>) -> Result<()> {
    let store = TagStore::from_layout(&layout(ctx)?);

    if let Some(image) = image {
        let name = image_name(image)?;
        let excluded = if store.is_excluded(&name) { "yes" } else { "no" };
        ctx.output.write(&format!("{name}: excluded {excluded}"));
        match store.tags_for(&name) {
            Some(tags) => ctx.output.write(&format!(
                "{name}: tags {}",
                tags.into_iter().collect::<Vec<_>>().join(", ")
            )),
            None => ctx.note(&format!("{name}: no manual tags")),
        }
        return Ok(());
    }

    let exclusions = store.exclusions();
    ctx.note(&format!("Excluded images ({}):", exclusions.len()));
    for record in &exclusions {
        ctx.output.write(&record.image_name);
    }

    let manual = store.manual_tags();
    ctx.note(&format!("Manually tagged images ({}):", manual.len()));
    for record in &manual {
        let tags: Vec<&str> = record.tags.iter().map(String::as_str).collect();
        ctx.output.write(&format!("{}: {}", record.image_name, tags.join(", ")));
    }
    Ok(())
}

/// Print known tags: suggestions, every tag, or those matching `query`
///
/// # Errors
/// Returns an error if the project cannot be located.
pub fn vocab(ctx: &Context<'_>, query: Option<&str>, all: bool) -> Result<()> {
    let vocabulary = TagVocabulary::load(&layout(ctx)?.label_files());
    if vocabulary.is_empty() {
        ctx.note("No label files found.");
        return Ok(());
    }

    let tags: Vec<&str> = match query {
        Some(query) => vocabulary.filter(query),
        None if all => vocabulary.all().iter().map(String::as_str).collect(),
        None => vocabulary.suggestions().iter().map(String::as_str).collect(),
    };
    for tag in tags {
        ctx.output.write(tag);
    }
    Ok(())
}
