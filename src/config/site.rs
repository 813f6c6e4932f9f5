//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    /// URL segment under which article pages live
    pub articles_path: String,

    // Directory
    pub content_dir: String,
    pub article_extension: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    pub words_per_minute: usize,
    /// Moment.js-style display format for article dates
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            articles_path: "articles".to_string(),

            content_dir: "src/contents/articles".to_string(),
            article_extension: "md".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            words_per_minute: 200,
            date_format: "MMMM DD, YYYY".to_string(),
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "src/contents/articles");
        assert_eq!(config.article_extension, "md");
        assert_eq!(config.words_per_minute, 200);
        assert!(!config.highlight.line_number);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
content_dir: posts
highlight:
  theme: InspiredGitHub
analytics: plausible
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert!(!config.highlight.line_number);
        assert_eq!(config.public_dir, "public");
        assert!(config.extra.contains_key("analytics"));
    }
}
