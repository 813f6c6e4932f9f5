//! Article record

use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// One article as read from the content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Identifier the article was loaded from (file name without extension)
    pub slug: String,

    /// Metadata block, passed through untyped
    pub frontmatter: FrontMatter,

    /// Raw Markdown body
    pub content: String,
}

impl Article {
    pub fn new(slug: impl Into<String>, frontmatter: FrontMatter, content: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            frontmatter,
            content: content.into(),
        }
    }

    /// Title from front-matter, falling back to the slug
    pub fn display_title(&self) -> &str {
        self.frontmatter.title().unwrap_or(&self.slug)
    }
}
