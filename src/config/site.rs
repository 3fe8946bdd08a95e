//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::Domain;

/// What to do with a content file that fails to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidContentPolicy {
    /// Log a warning and leave the file out of the listing
    #[default]
    Skip,
    /// Fail the whole listing
    Abort,
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // Content
    pub articles_dir: String,
    pub challenges_dir: String,
    pub content_extension: String,
    pub on_invalid: InvalidContentPolicy,

    // Listings
    pub latest_limit: usize,
    pub related_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            url: "http://localhost:3000".to_string(),

            articles_dir: "app/blog/posts".to_string(),
            challenges_dir: "app/challenges/posts".to_string(),
            content_extension: "mdx".to_string(),
            on_invalid: InvalidContentPolicy::Skip,

            latest_limit: 5,
            related_limit: 6,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Content directory of a domain, relative to the site root
    pub fn content_dir(&self, domain: Domain) -> &str {
        match domain {
            Domain::Articles => &self.articles_dir,
            Domain::Challenges => &self.challenges_dir,
        }
    }

    /// Site title, followed by the author when one is set
    pub fn heading(&self) -> String {
        if self.author.is_empty() {
            self.title.clone()
        } else {
            format!("{} by {}", self.title, self.author)
        }
    }

    /// Public URL of a post, like `https://example.com/blog/hello`
    pub fn permalink(&self, domain: Domain, slug: &str) -> String {
        let route = match domain {
            Domain::Articles => "blog",
            Domain::Challenges => "challenges",
        };
        format!("{}/{}/{}", self.url.trim_end_matches('/'), route, slug)
    }

    /// Content file extension without a leading dot
    pub fn content_extension(&self) -> &str {
        self.content_extension.trim_start_matches('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir(Domain::Articles), "app/blog/posts");
        assert_eq!(config.content_dir(Domain::Challenges), "app/challenges/posts");
        assert_eq!(config.content_extension(), "mdx");
        assert_eq!(config.on_invalid, InvalidContentPolicy::Skip);
        assert_eq!(config.related_limit, 6);
    }

    #[test]
    fn test_heading() {
        let mut config = SiteConfig::default();
        assert_eq!(config.heading(), "Portfolio");
        config.author = "Jane Doe".to_string();
        assert_eq!(config.heading(), "Portfolio by Jane Doe");
    }

    #[test]
    fn test_permalink() {
        let mut config = SiteConfig::default();
        assert_eq!(
            config.permalink(Domain::Articles, "hello"),
            "http://localhost:3000/blog/hello"
        );
        config.url = "https://example.github.io/".to_string();
        assert_eq!(
            config.permalink(Domain::Challenges, "two-sum"),
            "https://example.github.io/challenges/two-sum"
        );
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
articles_dir: content/blog
content_extension: .md
on_invalid: abort
latest_limit: 3
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.content_dir(Domain::Articles), "content/blog");
        assert_eq!(config.content_dir(Domain::Challenges), "app/challenges/posts");
        assert_eq!(config.content_extension(), "md");
        assert_eq!(config.on_invalid, InvalidContentPolicy::Abort);
        assert_eq!(config.latest_limit, 3);
        assert_eq!(config.related_limit, 6);
    }
}
