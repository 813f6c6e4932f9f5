//! Template view data

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;

use crate::config::SiteConfig;
use crate::content::{plain_text, Article, FrontValue, MarkdownRenderer};
use crate::helpers::{
    article_url, articles_url, count_words, date_xml, escape_html, full_url_for, reading_time,
    truncate_chars, url_for,
};

const SUMMARY_LENGTH: usize = 160;

/// Site-wide values available to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub articles_url: String,
    pub date_format: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: escape_html(&config.title),
            subtitle: escape_html(&config.subtitle),
            description: escape_html(&config.description),
            author: escape_html(&config.author),
            language: escape_html(&config.language),
            articles_url: articles_url(config),
            date_format: config.date_format.clone(),
        }
    }
}

/// One article, validated and ready for display.
///
/// Text fields are HTML-escaped; `content` is rendered Markdown.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub slug: String,
    pub title: String,
    /// Date as written, when it could not be parsed
    pub date: Option<String>,
    /// Parsed date in ISO 8601
    pub date_iso: Option<String>,
    pub cover: Option<String>,
    /// Reading time, from front-matter or estimated
    pub time: String,
    pub summary: Option<String>,
    pub featured: bool,
    pub link: String,
    /// Absolute URL including the site domain
    pub permalink: String,
    pub word_count: usize,
    pub content: String,

    #[serde(skip)]
    sort_date: Option<NaiveDateTime>,
}

impl ArticleView {
    pub fn build(
        article: &Article,
        config: &SiteConfig,
        markdown: &MarkdownRenderer,
    ) -> Result<Self> {
        let fm = &article.frontmatter;

        let title = fm
            .get("title")
            .ok_or_else(|| anyhow!("article `{}` has no title", article.slug))?
            .to_text()
            .ok_or_else(|| anyhow!("article `{}`: title must be a plain value", article.slug))?;

        let sort_date = fm.parsed_date();
        let date = match sort_date {
            Some(_) => None,
            None => fm.get("date").and_then(FrontValue::to_text),
        };

        let content = markdown.render(&article.content);
        let text = plain_text(&article.content);
        let word_count = count_words(&text);

        let time = fm
            .get("time")
            .and_then(FrontValue::to_text)
            .unwrap_or_else(|| reading_time(word_count, config.words_per_minute));

        let summary = match fm.summary() {
            Some(summary) => Some(summary.to_string()),
            None => (!text.is_empty()).then(|| truncate_chars(&text, SUMMARY_LENGTH, "...")),
        };

        Ok(Self {
            slug: article.slug.clone(),
            title: escape_html(&title),
            date: date.as_deref().map(escape_html),
            date_iso: sort_date.as_ref().map(date_xml),
            cover: fm.cover().map(|cover| escape_html(&url_for(config, cover))),
            time: escape_html(&time),
            summary: summary.as_deref().map(escape_html),
            featured: fm.featured(),
            link: article_url(config, &article.slug),
            permalink: full_url_for(
                config,
                &format!("{}/{}/", config.articles_path.trim_matches('/'), article.slug),
            ),
            word_count,
            content,
            sort_date,
        })
    }

    /// Newest first; undated articles last; ties broken by slug
    fn listing_order(a: &Self, b: &Self) -> Ordering {
        match (a.sort_date, b.sort_date) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.slug.cmp(&b.slug))
    }
}

/// Data for the article listing page
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    /// Articles flagged `featured: true`
    pub featured: Vec<ArticleView>,
    /// Every article, featured ones included
    pub articles: Vec<ArticleView>,
}

impl ListingView {
    pub fn new(mut articles: Vec<ArticleView>) -> Self {
        articles.sort_by(ArticleView::listing_order);
        let featured = articles.iter().filter(|a| a.featured).cloned().collect();
        Self { featured, articles }
    }
}
