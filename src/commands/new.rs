//! Create a new article

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::validate_slug;
use crate::Folio;

/// Create a new article file with front-matter scaffolding.
///
/// The slug defaults to a slugified title. Returns the created path.
pub fn create_article(folio: &Folio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    validate_slug(&slug)?;

    let store = folio.store();
    let file_path = store.path_for(&slug);

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("Article already exists: {:?}", file_path);
    }

    fs::create_dir_all(store.dir())?;

    let now = chrono::Local::now();
    let content = format!(
        "---\ntitle: {}\ndate: {}\ncover:\nsummary:\n---\n\n",
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d")
    );
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}
