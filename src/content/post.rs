//! Post model shared by both content domains

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::frontmatter::Document;
use super::metadata::SchemaError;
use super::FrontMatter;

/// One of the two parallel content collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Blog articles
    #[value(alias = "blog")]
    Articles,
    /// Coding-challenge writeups
    Challenges,
}

impl Domain {
    pub fn name(self) -> &'static str {
        match self {
            Domain::Articles => "articles",
            Domain::Challenges => "challenges",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Challenge difficulty, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&level) {
            Some(Self(level as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every level, easiest first
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (Self::MIN..=Self::MAX).map(Difficulty)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: i64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid difficulty: {}", s))?;
        Difficulty::new(level).ok_or_else(|| {
            format!(
                "difficulty must be between {} and {}",
                Difficulty::MIN,
                Difficulty::MAX
            )
        })
    }
}

/// Typed metadata of one domain
pub trait Metadata: Sized + Clone + fmt::Debug + Serialize {
    /// Domain whose directory holds this kind of post
    const DOMAIN: Domain;

    /// Header key of the primary date
    const DATE_KEY: &'static str;

    /// Convert a parsed header, failing on any field of the wrong type
    fn from_front_matter(front_matter: FrontMatter) -> Result<Self, SchemaError>;

    fn title(&self) -> &str;

    fn summary(&self) -> Option<&str>;

    /// Declared tags, empty when the header has none
    fn tags(&self) -> &[String];

    /// Primary date used for ordering
    fn date(&self) -> &NaiveDateTime;

    fn platform(&self) -> Option<&str> {
        None
    }

    fn difficulty(&self) -> Option<Difficulty> {
        None
    }
}

/// A content item: article or challenge
#[derive(Debug, Clone, Serialize)]
pub struct Post<M> {
    /// File name without extension
    pub slug: String,
    pub metadata: M,
    /// Body text after the header block, verbatim
    pub content: String,
}

impl<M: Metadata> Post<M> {
    /// Build a post from a parsed document
    pub fn from_document(slug: impl Into<String>, document: Document) -> Result<Self, SchemaError> {
        let metadata = M::from_front_matter(document.front_matter)?;
        Ok(Self {
            slug: slug.into(),
            metadata,
            content: document.content,
        })
    }

    pub fn title(&self) -> &str {
        self.metadata.title()
    }

    pub fn date(&self) -> &NaiveDateTime {
        self.metadata.date()
    }

    pub fn tags(&self) -> &[String] {
        self.metadata.tags()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}
