//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

const CONFIG_TEMPLATE: &str = r#"# Folio Configuration

# Site
title: My Portfolio
subtitle: ''
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /
articles_path: articles

# Directory
content_dir: src/contents/articles
article_extension: md
static_dir: static
public_dir: public

# Writing
words_per_minute: 200
date_format: MMMM DD, YYYY
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const SAMPLE_ARTICLE: &str = r#"---
title: "Hello World"
date: {date}
summary: "The first article on this site."
featured: true
---

Welcome! Articles live in `src/contents/articles`, one Markdown file per article.
The file name becomes the URL: this one is served at `/articles/hello-world/`.

## Tables

| Command | What it does |
|---------|--------------|
| `folio new "Title"` | Create an article |
| `folio serve` | Preview with live rendering |
| `folio generate` | Write static pages to `public/` |

## Code

```rust
fn main() {
    println!("Hello, world!");
}
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    let defaults = SiteConfig::default();
    let content_dir = target_dir.join(&defaults.content_dir);

    fs::create_dir_all(&content_dir)?;
    fs::create_dir_all(target_dir.join(&defaults.static_dir).join("images/articles"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    fs::write(
        content_dir.join("hello-world.md"),
        SAMPLE_ARTICLE.replace("{date}", &today),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PageRenderer;
    use crate::Folio;

    #[test]
    fn test_init_site_is_loadable_and_renders() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "My Portfolio");

        let store = folio.store();
        assert_eq!(store.slugs().unwrap(), vec!["hello-world".to_string()]);

        let article = store.load("hello-world").unwrap();
        assert!(article.frontmatter.featured());

        let page = PageRenderer::new(&folio.config)
            .unwrap()
            .render_article(&article)
            .unwrap();
        assert!(page.contains("<table>"));
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
