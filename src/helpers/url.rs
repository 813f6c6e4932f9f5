//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/images/cover.webp") // -> "/blog/images/cover.webp"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/articles/") // -> "https://example.com/blog/articles/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// URL of the article listing page, e.g. `/articles/`
pub fn articles_url(config: &SiteConfig) -> String {
    let segment = config.articles_path.trim_matches('/');
    if segment.is_empty() {
        url_for(config, "/")
    } else {
        url_for(config, &format!("{}/", segment))
    }
}

/// URL of a single article page, e.g. `/articles/hello-world/`
pub fn article_url(config: &SiteConfig, slug: &str) -> String {
    format!("{}{}/", articles_url(config), slug)
}

fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/images/a.webp"), "/blog/images/a.webp");
        assert_eq!(url_for(&config, "about/"), "/blog/about/");
        assert_eq!(
            url_for(&config, "https://cdn.example.org/a.png"),
            "https://cdn.example.org/a.png"
        );
        assert_eq!(url_for(&SiteConfig::default(), "/images/a.webp"), "/images/a.webp");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/articles/"),
            "https://example.com/blog/articles/"
        );
    }

    #[test]
    fn test_article_urls() {
        let mut config = SiteConfig::default();
        assert_eq!(articles_url(&config), "/articles/");
        assert_eq!(article_url(&config, "hello"), "/articles/hello/");

        config.root = "/blog/".to_string();
        config.articles_path = "/posts/".to_string();
        assert_eq!(articles_url(&config), "/blog/posts/");

        config.articles_path = String::new();
        assert_eq!(article_url(&config, "x"), "/blog/x/");
    }
}
