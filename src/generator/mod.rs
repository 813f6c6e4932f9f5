//! Generator module - writes the static article pages

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::ArticleStore;
use crate::render::PageRenderer;
use crate::Folio;

/// Summary of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub articles: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    store: ArticleStore,
    renderer: PageRenderer,
    static_dir: PathBuf,
    public_dir: PathBuf,
    articles_path: String,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            store: folio.store(),
            renderer: PageRenderer::new(&folio.config)?,
            static_dir: folio.static_dir.clone(),
            public_dir: folio.public_dir.clone(),
            articles_path: folio.config.articles_path.trim_matches('/').to_string(),
        })
    }

    /// Generate every article page and the listing page.
    ///
    /// Any article that fails to load or render aborts the run.
    pub fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.public_dir)
            .with_context(|| format!("failed to create {}", self.public_dir.display()))?;

        let assets = self.copy_static_assets()?;

        let slugs = self.store.slugs()?;
        let mut articles = Vec::with_capacity(slugs.len());

        for slug in &slugs {
            let article = self.store.load(slug)?;
            let html = self
                .renderer
                .render_article(&article)
                .with_context(|| format!("failed to render article `{}`", slug))?;

            let output_path = self.articles_dir().join(slug).join("index.html");
            write_file(&output_path, &html)?;
            tracing::debug!("Generated: {:?}", output_path);

            articles.push(article);
        }

        let listing = self.renderer.render_listing(&articles)?;
        write_file(&self.articles_dir().join("index.html"), &listing)?;

        Ok(GenerateReport {
            articles: articles.len(),
            assets,
        })
    }

    fn articles_dir(&self) -> PathBuf {
        if self.articles_path.is_empty() {
            self.public_dir.clone()
        } else {
            self.public_dir.join(&self.articles_path)
        }
    }

    /// Copy the static directory (images, etc.) into the output directory
    fn copy_static_assets(&self) -> Result<usize> {
        if !self.static_dir.is_dir() {
            tracing::debug!("No static directory at {:?}", self.static_dir);
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(&self.static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&self.static_dir)?;
            let dest = self.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("failed to copy {} to {}", path.display(), dest.display()))?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::LoadError;

    fn site() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.content_dir).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_generate_writes_pages_and_assets() {
        let (_dir, folio) = site();
        fs::write(
            folio.content_dir.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-01\n---\nHi there",
        )
        .unwrap();
        fs::write(
            folio.content_dir.join("second.md"),
            "---\ntitle: Second\n---\nMore",
        )
        .unwrap();
        fs::create_dir_all(folio.static_dir.join("images/articles")).unwrap();
        fs::write(folio.static_dir.join("images/articles/cover.webp"), b"img").unwrap();

        let report = Generator::new(&folio).unwrap().generate().unwrap();
        assert_eq!(report, GenerateReport { articles: 2, assets: 1 });

        let hello = fs::read_to_string(folio.public_dir.join("articles/hello/index.html")).unwrap();
        assert!(hello.contains("<h1>Hello</h1>"));
        assert!(folio.public_dir.join("articles/second/index.html").is_file());
        assert!(folio.public_dir.join("images/articles/cover.webp").is_file());

        let listing = fs::read_to_string(folio.public_dir.join("articles/index.html")).unwrap();
        assert!(listing.contains(r#"href="/articles/hello/""#));
        assert!(listing.contains(r#"href="/articles/second/""#));
    }

    #[test]
    fn test_generate_empty_store() {
        let (_dir, folio) = site();
        let report = Generator::new(&folio).unwrap().generate().unwrap();
        assert_eq!(report.articles, 0);
        assert!(folio.public_dir.join("articles/index.html").is_file());
    }

    #[test]
    fn test_generate_missing_store_fails() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let err = Generator::new(&folio).unwrap().generate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::StoreUnavailable { .. })
        ));
    }

    #[test]
    fn test_generate_aborts_on_bad_article() {
        let (_dir, folio) = site();
        fs::write(folio.content_dir.join("broken.md"), "---\ntitle: Broken\n").unwrap();
        let err = Generator::new(&folio).unwrap().generate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_generate_aborts_on_untitled_article() {
        let (_dir, folio) = site();
        fs::write(folio.content_dir.join("untitled.md"), "no front-matter").unwrap();
        let err = Generator::new(&folio).unwrap().generate().unwrap_err();
        assert!(format!("{:#}", err).contains("untitled"));
    }
}
