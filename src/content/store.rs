//! Article store - enumerates and loads articles from the content directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Article, FrontMatter, LoadError};

/// Read-only view over a directory of article files, one file per slug.
///
/// Nothing is cached: every call goes back to the filesystem, so the store
/// can be cloned freely and shared between threads.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    dir: PathBuf,
    extension: String,
}

impl ArticleStore {
    /// Create a store over `dir` holding `.md` files
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            extension: "md".to_string(),
        }
    }

    /// Use a different article file extension
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the file backing `slug`
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", slug, self.extension))
    }

    /// List the slugs of every article in the store, in directory order.
    ///
    /// Only regular files with the store's extension are considered, so every
    /// returned slug can be passed to [`ArticleStore::load`].
    pub fn slugs(&self) -> Result<Vec<String>, LoadError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| self.unavailable(e))?;

        let mut slugs = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| self.unavailable(e))?.path();

            if !path.is_file() {
                tracing::debug!("Skipping non-file entry {:?}", path);
                continue;
            }

            match self.slug_of(&path) {
                Some(slug) => slugs.push(slug),
                None => tracing::debug!("Skipping non-article file {:?}", path),
            }
        }

        tracing::debug!("Found {} articles in {:?}", slugs.len(), self.dir);
        Ok(slugs)
    }

    /// Read and parse the article named `slug`
    pub fn load(&self, slug: &str) -> Result<Article, LoadError> {
        validate_slug(slug)?;
        let path = self.path_for(slug);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::FileNotFound {
                    slug: slug.to_string(),
                    path,
                });
            }
            Err(source) => return Err(LoadError::Read { path, source }),
        };

        let (frontmatter, body) = match FrontMatter::parse(&raw) {
            Ok(parsed) => parsed,
            Err(source) => return Err(LoadError::Parse { path, source }),
        };

        tracing::debug!("Loaded article {} ({} front-matter keys)", slug, frontmatter.len());
        Ok(Article::new(slug, frontmatter, body))
    }

    /// Load every article; the first failure aborts
    pub fn load_all(&self) -> Result<Vec<Article>, LoadError> {
        self.slugs()?
            .iter()
            .map(|slug| self.load(slug))
            .collect()
    }

    fn slug_of(&self, path: &Path) -> Option<String> {
        if path.extension()?.to_str()? != self.extension {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        validate_slug(stem).ok()?;
        Some(stem.to_string())
    }

    fn unavailable(&self, source: io::Error) -> LoadError {
        LoadError::StoreUnavailable {
            path: self.dir.clone(),
            source,
        }
    }
}

/// Reject slugs that would resolve outside the store directory
pub(crate) fn validate_slug(slug: &str) -> Result<(), LoadError> {
    let escapes = slug.is_empty()
        || slug == "."
        || slug == ".."
        || slug.contains(['/', '\\', '\0']);
    if escapes {
        return Err(LoadError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}
