//! folio-rs: content layer for a personal blog and coding-challenge portfolio
//!
//! Content files live in one directory per domain (articles and
//! challenges). Every call re-reads and re-parses the directory, so the
//! collections and the indexes derived from them are always current.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod index;
pub mod query;

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use content::{ChallengeMetadata, ContentError, ContentStore, Domain, Metadata, Post};
use index::{DifficultyCounts, TagCounts};
use query::Query;

/// Name of the configuration file in the site root
pub const CONFIG_FILE: &str = "_config.yml";

/// The site whose content is being served
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Absolute content directory of a domain
    pub fn content_dir(&self, domain: Domain) -> PathBuf {
        self.base_dir.join(self.config.content_dir(domain))
    }

    pub fn store(&self) -> ContentStore<'_> {
        ContentStore::new(self)
    }

    /// Every post of a domain, in directory order
    pub fn list<M: Metadata>(&self) -> Result<Vec<Post<M>>, ContentError> {
        self.store().list()
    }

    /// Single post by slug
    pub fn find<M: Metadata>(&self, slug: &str) -> Result<Option<Post<M>>, ContentError> {
        self.store().find(slug)
    }

    /// Filtered, sorted and truncated posts of a domain
    pub fn query<M: Metadata>(&self, query: &Query) -> Result<Vec<Post<M>>, ContentError> {
        let posts = self.list::<M>()?;
        Ok(query.apply(&posts).into_iter().cloned().collect())
    }

    /// The newest `latest_limit` posts
    pub fn latest<M: Metadata>(&self) -> Result<Vec<Post<M>>, ContentError> {
        self.query(&Query::new().limit(self.config.latest_limit))
    }

    pub fn all_tags<M: Metadata>(&self) -> Result<Vec<String>, ContentError> {
        Ok(index::all_tags(&self.list::<M>()?))
    }

    pub fn tag_counts<M: Metadata>(&self) -> Result<TagCounts, ContentError> {
        Ok(index::tag_counts(&self.list::<M>()?))
    }

    pub fn all_platforms(&self) -> Result<Vec<String>, ContentError> {
        Ok(index::all_platforms(&self.list::<ChallengeMetadata>()?))
    }

    pub fn platform_counts(&self) -> Result<BTreeMap<String, usize>, ContentError> {
        Ok(index::platform_counts(&self.list::<ChallengeMetadata>()?))
    }

    pub fn difficulty_counts(&self) -> Result<DifficultyCounts, ContentError> {
        Ok(index::difficulty_counts(&self.list::<ChallengeMetadata>()?))
    }
}
