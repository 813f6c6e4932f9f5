//! folio-rs: Markdown articles for a personal blog/portfolio
//!
//! The core is [`content::ArticleStore`], a read-only view over a directory of
//! Markdown files with YAML front-matter. Around it sit a page renderer,
//! a static generator and a preview server.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site rooted at a directory holding `_config.yml`
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the article files
    pub content_dir: PathBuf,
    /// Static assets copied verbatim into the output
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site instance with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            public_dir,
        }
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("_config.yml")
    }

    /// The article store for this site
    pub fn store(&self) -> content::ArticleStore {
        content::ArticleStore::new(&self.content_dir).with_extension(&self.config.article_extension)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<generator::GenerateReport> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.content_dir, dir.path().join("src/contents/articles"));
        assert_eq!(folio.public_dir, dir.path().join("public"));
        assert_eq!(folio.store().extension(), "md");
    }

    #[test]
    fn test_config_file_overrides_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "content_dir: posts\narticle_extension: markdown\npublic_dir: dist\n",
        )
        .unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.content_dir, dir.path().join("posts"));
        assert_eq!(folio.public_dir, dir.path().join("dist"));
        assert_eq!(folio.store().dir(), dir.path().join("posts"));
        assert_eq!(folio.store().extension(), "markdown");
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "words_per_minute: lots\n").unwrap();
        assert!(Folio::new(dir.path()).is_err());
    }
}
