//! Page rendering: turns article records into complete HTML pages
//!
//! This is the boundary where the untyped front-matter meets an expected
//! schema. The store passes metadata through unchecked; here a missing or
//! malformed `title` becomes an error naming the article.

mod views;

use anyhow::Result;
use tera::Context;

pub use views::{ArticleView, ListingView, SiteData};

use crate::config::SiteConfig;
use crate::content::{Article, MarkdownRenderer};
use crate::templates::TemplateRenderer;

/// Renders article and listing pages
pub struct PageRenderer {
    config: SiteConfig,
    markdown: MarkdownRenderer,
    templates: TemplateRenderer,
}

impl PageRenderer {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            markdown: MarkdownRenderer::from_config(&config.highlight)?,
            templates: TemplateRenderer::new()?,
        })
    }

    /// Validate front-matter and render the body of one article
    pub fn article_view(&self, article: &Article) -> Result<ArticleView> {
        ArticleView::build(article, &self.config, &self.markdown)
    }

    /// Split articles into featured cards and the full list, newest first
    pub fn listing(&self, articles: &[Article]) -> Result<ListingView> {
        let views = articles
            .iter()
            .map(|article| self.article_view(article))
            .collect::<Result<Vec<_>>>()?;
        Ok(ListingView::new(views))
    }

    /// Full HTML page for one article
    pub fn render_article(&self, article: &Article) -> Result<String> {
        let view = self.article_view(article)?;
        let mut context = self.base_context();
        context.insert("article", &view);
        self.templates.render("article.html", &context)
    }

    /// Full HTML page listing every article
    pub fn render_listing(&self, articles: &[Article]) -> Result<String> {
        let listing = self.listing(articles)?;
        let mut context = self.base_context();
        context.insert("listing", &listing);
        self.templates.render("articles.html", &context)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&self.config));
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    fn article(slug: &str, source: &str) -> Article {
        let (frontmatter, body) = FrontMatter::parse(source).unwrap();
        Article::new(slug, frontmatter, body)
    }

    fn renderer() -> PageRenderer {
        PageRenderer::new(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_render_article_page() {
        let page = renderer()
            .render_article(&article(
                "clean-code",
                "---\ntitle: Clean Code\ndate: 2023-03-22\ncover: /images/clean.webp\ntime: 9 min read\n---\n\n## Intro\n\n```dart\nvoid main() {}\n```\n",
            ))
            .unwrap();

        assert!(page.contains("<title>Clean Code</title>"));
        assert!(page.contains("<h1>Clean Code</h1>"));
        assert!(page.contains(r#"src="/images/clean.webp""#));
        assert!(page.contains("March 22, 2023"));
        assert!(page.contains("9 min read"));
        assert!(page.contains("<h2>Intro</h2>"));
        assert!(page.contains(r#"class="highlight dart""#));
    }

    #[test]
    fn test_render_article_without_title_fails() {
        let err = renderer()
            .render_article(&article("untitled", "---\ndate: 2023-03-22\n---\nBody"))
            .unwrap_err();
        assert!(err.to_string().contains("untitled"));
    }

    #[test]
    fn test_title_is_escaped() {
        let page = renderer()
            .render_article(&article("tags", "---\ntitle: \"<script> & co\"\n---\nBody"))
            .unwrap();
        assert!(page.contains("<h1>&lt;script&gt; &amp; co</h1>"));
    }

    #[test]
    fn test_render_listing_page() {
        let articles = vec![
            article("old", "---\ntitle: Old Post\ndate: 2021-01-01\n---\nold"),
            article(
                "star",
                "---\ntitle: Star Post\ndate: 2023-06-01\nfeatured: true\nsummary: The best one\n---\nstar",
            ),
            article("new", "---\ntitle: New Post\ndate: 2024-02-02\n---\nnew"),
        ];
        let page = renderer().render_listing(&articles).unwrap();

        assert!(page.contains(r#"<ul class="featured">"#));
        assert!(page.contains("The best one"));
        assert!(page.contains(r#"href="/articles/star/""#));

        let new_pos = page.find("New Post").unwrap();
        let old_pos = page.find("Old Post").unwrap();
        assert!(new_pos < old_pos);
    }

    #[test]
    fn test_render_empty_listing() {
        let page = renderer().render_listing(&[]).unwrap();
        assert!(page.contains("No articles yet."));
        assert!(!page.contains(r#"<ul class="featured">"#));
    }
}
