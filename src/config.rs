use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub articles: ArticlesConfig,
}

/// Settings for the article aggregation endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct ArticlesConfig {
    /// RSS feed to aggregate
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    /// Canonical blog URL, used as the link fallback for entries without one
    #[serde(default = "default_blog_url")]
    pub blog_url: String,
    /// Maximum number of entries served per request
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    #[serde(default)]
    pub thumbnail_source: ThumbnailSource,
    /// Image hosts accepted by the embedded-content thumbnail strategy
    #[serde(default = "default_trusted_image_hosts")]
    pub trusted_image_hosts: Vec<String>,
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            blog_url: default_blog_url(),
            max_articles: default_max_articles(),
            thumbnail_source: ThumbnailSource::default(),
            trusted_image_hosts: default_trusted_image_hosts(),
        }
    }
}

/// Where article thumbnails are discovered. Exactly one strategy is active
/// per deployment.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThumbnailSource {
    /// Fetch each linked article page and read its social-preview meta tags
    #[default]
    ArticlePage,
    /// Scan the feed's own embedded HTML content for a trusted-host image
    EmbeddedContent,
}

fn default_feed_url() -> String {
    "https://medium.com/feed/bsa-epfl".to_string()
}

fn default_blog_url() -> String {
    "https://medium.com/bsa-epfl".to_string()
}

fn default_max_articles() -> usize {
    6
}

fn default_trusted_image_hosts() -> Vec<String> {
    vec![
        "cdn-images-1.medium.com".to_string(),
        "miro.medium.com".to_string(),
    ]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from a path, falling back to defaults when the file is absent.
    /// Every setting has a usable default so the site runs unconfigured.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.articles.feed_url, "https://medium.com/feed/bsa-epfl");
        assert_eq!(config.articles.blog_url, "https://medium.com/bsa-epfl");
        assert_eq!(config.articles.max_articles, 6);
        assert_eq!(
            config.articles.thumbnail_source,
            ThumbnailSource::ArticlePage
        );
        assert_eq!(config.articles.trusted_image_hosts.len(), 2);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            [articles]
            feed_url = "https://example.com/feed.xml"
            blog_url = "https://example.com/blog"
            max_articles = 3
            thumbnail_source = "embedded-content"
            trusted_image_hosts = ["img.example.com"]
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.articles.feed_url, "https://example.com/feed.xml");
        assert_eq!(config.articles.blog_url, "https://example.com/blog");
        assert_eq!(config.articles.max_articles, 3);
        assert_eq!(
            config.articles.thumbnail_source,
            ThumbnailSource::EmbeddedContent
        );
        assert_eq!(
            config.articles.trusted_image_hosts,
            vec!["img.example.com".to_string()]
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let content = r#"
            [articles]
            max_articles = 10
        "#;

        let config = Config::from_str(content).unwrap();

        assert_eq!(config.articles.max_articles, 10);
        assert_eq!(config.articles.feed_url, "https://medium.com/feed/bsa-epfl");
        assert_eq!(
            config.articles.thumbnail_source,
            ThumbnailSource::ArticlePage
        );
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.articles.max_articles, 6);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/path/config.toml").unwrap();
        assert_eq!(config.articles.max_articles, 6);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_thumbnail_source_is_rejected() {
        let content = r#"
            [articles]
            thumbnail_source = "carrier-pigeon"
        "#;

        let result = Config::from_str(content);
        assert!(result.is_err());
    }
}
