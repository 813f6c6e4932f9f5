//! List and show articles

use anyhow::Result;

use crate::content::Article;
use crate::Folio;

/// Print every article in the store, newest first
pub fn run(folio: &Folio, json: bool) -> Result<()> {
    let mut articles = folio.store().load_all()?;
    sort_newest_first(&mut articles);

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    println!("Articles ({}):", articles.len());
    for article in &articles {
        let date = article
            .frontmatter
            .parsed_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        println!("  {} - {} [{}]", date, article.display_title(), article.slug);
    }

    Ok(())
}

/// Print one article record as JSON
pub fn show(folio: &Folio, slug: &str) -> Result<()> {
    let article = folio.store().load(slug)?;
    println!("{}", serde_json::to_string_pretty(&article)?);
    Ok(())
}

fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.frontmatter
            .parsed_date()
            .cmp(&a.frontmatter.parsed_date())
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    fn article(slug: &str, source: &str) -> Article {
        let (frontmatter, body) = FrontMatter::parse(source).unwrap();
        Article::new(slug, frontmatter, body)
    }

    #[test]
    fn test_sort_newest_first() {
        let mut articles = vec![
            article("undated", "no front-matter"),
            article("old", "---\ndate: 2020-01-01\n---\n"),
            article("new", "---\ndate: 2024-01-01\n---\n"),
        ];
        sort_newest_first(&mut articles);
        let order: Vec<_> = articles.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(order, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_show_missing_article() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        std::fs::create_dir_all(&folio.content_dir).unwrap();
        assert!(show(&folio, "nope").is_err());
    }
}
