//! Create a new article or challenge

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::{
    ArticleMetadata, ChallengeMetadata, Difficulty, Document, Domain, FieldValue, FrontMatter,
    Metadata, DIFFICULTY_KEY,
};
use crate::Site;

/// Header values for a new content file
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub platform: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub languages: Vec<String>,
}

/// Write a new content file dated `date` and return its path
pub fn create_post(site: &Site, domain: Domain, post: &NewPost, date: NaiveDate) -> Result<PathBuf> {
    let front_matter = match domain {
        Domain::Articles => build_front_matter::<ArticleMetadata>(post, date)?,
        Domain::Challenges => build_front_matter::<ChallengeMetadata>(post, date)?,
    };

    let slug = slug::slugify(&post.title);
    if slug.is_empty() {
        bail!("Title {:?} does not produce a usable file name", post.title);
    }

    let target_dir = site.content_dir(domain);
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create {:?}", target_dir))?;

    let file_path = target_dir.join(format!("{}.{}", slug, site.config.content_extension()));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let document = Document {
        front_matter,
        content: String::new(),
    };
    fs::write(&file_path, document.to_source())?;

    tracing::info!("Created {} {:?}", domain, file_path);
    Ok(file_path)
}

/// Build the header and make sure it passes the domain schema
fn build_front_matter<M: Metadata>(post: &NewPost, date: NaiveDate) -> Result<FrontMatter> {
    check_text("title", &post.title)?;
    for item in post.tags.iter().chain(&post.languages) {
        check_list_item(item)?;
    }

    let mut fm = FrontMatter::new();
    fm.insert("title", FieldValue::Text(post.title.clone()));
    fm.insert(M::DATE_KEY, FieldValue::Text(date.format("%Y-%m-%d").to_string()));

    if M::DOMAIN == Domain::Challenges {
        let platform = post.platform.clone().unwrap_or_default();
        check_text("platform", &platform)?;
        fm.insert("platform", FieldValue::Text(platform));
        if let Some(difficulty) = post.difficulty {
            fm.insert(DIFFICULTY_KEY, FieldValue::Integer(difficulty.get() as i64));
        }
        if !post.languages.is_empty() {
            fm.insert("languages", FieldValue::List(post.languages.clone()));
        }
    }

    if let Some(summary) = &post.summary {
        check_text("summary", summary)?;
        fm.insert("summary", FieldValue::Text(summary.clone()));
    }
    if !post.tags.is_empty() {
        fm.insert("tags", FieldValue::List(post.tags.clone()));
    }

    M::from_front_matter(fm.clone())
        .with_context(|| format!("Invalid {} header", M::DOMAIN))?;
    Ok(fm)
}

/// Header values are single-line
fn check_text(field: &str, value: &str) -> Result<()> {
    if value.contains('\n') || value.contains('\r') {
        bail!("`{}` must fit on one line", field);
    }
    Ok(())
}

/// List items cannot hold separators or quotes
fn check_list_item(item: &str) -> Result<()> {
    if item.trim().is_empty() || item.trim() != item || item.contains([',', '\'', '"', '\n']) {
        bail!("Invalid list item {:?}", item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
    }

    #[test]
    fn test_create_article() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        let post = NewPost {
            title: "Hello, World: Part 1".to_string(),
            tags: vec!["rust".to_string(), "cli".to_string()],
            ..Default::default()
        };

        let path = create_post(&site, Domain::Articles, &post, date()).unwrap();
        assert_eq!(path, dir.path().join("app/blog/posts/hello-world-part-1.mdx"));

        let loaded = site.find::<ArticleMetadata>("hello-world-part-1").unwrap().unwrap();
        assert_eq!(loaded.metadata.title, "Hello, World: Part 1");
        assert_eq!(loaded.metadata.published_at, "2024-05-04");
        assert_eq!(loaded.tags(), ["rust", "cli"]);
        assert_eq!(loaded.content, "");
    }

    #[test]
    fn test_create_challenge_requires_platform() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        let post = NewPost {
            title: "Two Sum".to_string(),
            ..Default::default()
        };
        assert!(create_post(&site, Domain::Challenges, &post, date()).is_err());

        let post = NewPost {
            platform: Some("LeetCode".to_string()),
            difficulty: Difficulty::new(1),
            languages: vec!["rust".to_string()],
            ..post
        };
        create_post(&site, Domain::Challenges, &post, date()).unwrap();
        let loaded = site.find::<ChallengeMetadata>("two-sum").unwrap().unwrap();
        assert_eq!(loaded.metadata.platform, "LeetCode");
        assert_eq!(loaded.metadata.difficulty, Difficulty::new(1));
        assert_eq!(loaded.metadata.languages, vec!["rust"]);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        let post = NewPost {
            title: "Twice".to_string(),
            ..Default::default()
        };
        create_post(&site, Domain::Articles, &post, date()).unwrap();
        assert!(create_post(&site, Domain::Articles, &post, date()).is_err());
    }

    #[test]
    fn test_rejects_bad_list_items() {
        assert!(check_list_item("ok").is_ok());
        assert!(check_list_item("a,b").is_err());
        assert!(check_list_item("it's").is_err());
        assert!(check_list_item(" padded").is_err());
        assert!(check_list_item("").is_err());
    }
}
