//! Typed metadata for articles and challenges
//!
//! Every known field is checked against the type it must have. Keys that
//! are not part of a schema are carried along untouched in `extra`.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use super::frontmatter::{FieldValue, FrontMatter, DIFFICULTY_KEY};
use super::post::{Difficulty, Domain, Metadata};
use crate::helpers::parse_date;

/// Metadata that does not fit its domain's schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("`{field}` must be text, found {found}")]
    ExpectedText {
        field: &'static str,
        found: &'static str,
    },

    #[error("`{field}` must be a list like ['a', 'b'], found {found}")]
    ExpectedList {
        field: &'static str,
        found: &'static str,
    },

    #[error("`{field}` must be an integer, found {found}")]
    ExpectedInteger {
        field: &'static str,
        found: &'static str,
    },

    #[error("difficulty must be between 1 and 5, found {0}")]
    DifficultyOutOfRange(i64),

    #[error("`{field}` is not a recognized date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// Blog article metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    pub title: String,
    /// Publication date as written in the header
    pub published_at: String,
    #[serde(skip)]
    pub published: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Fields outside the schema, in header order
    #[serde(flatten)]
    pub extra: IndexMap<String, FieldValue>,
}

impl Metadata for ArticleMetadata {
    const DOMAIN: Domain = Domain::Articles;
    const DATE_KEY: &'static str = "publishedAt";

    fn from_front_matter(front_matter: FrontMatter) -> Result<Self, SchemaError> {
        let mut fields = Fields(front_matter);
        let title = fields.required_text("title")?;
        let (published_at, published) = fields.date(Self::DATE_KEY)?;

        Ok(Self {
            title,
            published_at,
            published,
            summary: fields.optional_text("summary")?,
            image: fields.optional_text("image")?,
            thumbnail: fields.optional_text("thumbnail")?,
            tags: fields.optional_list("tags")?,
            extra: fields.rest(),
        })
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    fn date(&self) -> &NaiveDateTime {
        &self.published
    }
}

/// Coding-challenge writeup metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeMetadata {
    pub title: String,
    /// Solve date as written in the header
    pub date: String,
    #[serde(skip)]
    pub solved: NaiveDateTime,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub languages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, FieldValue>,
}

impl Metadata for ChallengeMetadata {
    const DOMAIN: Domain = Domain::Challenges;
    const DATE_KEY: &'static str = "date";

    fn from_front_matter(front_matter: FrontMatter) -> Result<Self, SchemaError> {
        let mut fields = Fields(front_matter);
        let title = fields.required_text("title")?;
        let (date, solved) = fields.date(Self::DATE_KEY)?;
        let platform = fields.required_text("platform")?;
        let difficulty = match fields.optional_integer(DIFFICULTY_KEY)? {
            Some(level) => {
                Some(Difficulty::new(level).ok_or(SchemaError::DifficultyOutOfRange(level))?)
            }
            None => None,
        };

        Ok(Self {
            title,
            date,
            solved,
            platform,
            difficulty,
            languages: fields.optional_list("languages")?.unwrap_or_default(),
            tags: fields.optional_list("tags")?,
            source_url: fields.optional_text("sourceUrl")?,
            summary: fields.optional_text("summary")?,
            thumbnail: fields.optional_text("thumbnail")?,
            extra: fields.rest(),
        })
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    fn date(&self) -> &NaiveDateTime {
        &self.solved
    }

    fn platform(&self) -> Option<&str> {
        Some(&self.platform)
    }

    fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
}

/// Consumes known fields out of a header; whatever remains is `extra`
struct Fields(FrontMatter);

impl Fields {
    /// Text field, `None` when absent or empty
    fn optional_text(&mut self, key: &'static str) -> Result<Option<String>, SchemaError> {
        match self.0.take(key) {
            None => Ok(None),
            Some(FieldValue::Text(s)) if s.is_empty() => Ok(None),
            Some(FieldValue::Text(s)) => Ok(Some(s)),
            Some(other) => Err(SchemaError::ExpectedText {
                field: key,
                found: other.kind(),
            }),
        }
    }

    fn required_text(&mut self, key: &'static str) -> Result<String, SchemaError> {
        self.optional_text(key)?
            .ok_or(SchemaError::MissingField(key))
    }

    /// List field, `None` when absent, empty text or an empty list
    fn optional_list(&mut self, key: &'static str) -> Result<Option<Vec<String>>, SchemaError> {
        match self.0.take(key) {
            None => Ok(None),
            Some(FieldValue::Text(s)) if s.is_empty() => Ok(None),
            Some(FieldValue::List(items)) if items.is_empty() => Ok(None),
            Some(FieldValue::List(items)) => Ok(Some(items)),
            Some(other) => Err(SchemaError::ExpectedList {
                field: key,
                found: other.kind(),
            }),
        }
    }

    fn optional_integer(&mut self, key: &'static str) -> Result<Option<i64>, SchemaError> {
        match self.0.take(key) {
            None => Ok(None),
            Some(FieldValue::Integer(n)) => Ok(Some(n)),
            Some(other) => Err(SchemaError::ExpectedInteger {
                field: key,
                found: other.kind(),
            }),
        }
    }

    /// Required date, returned both verbatim and parsed
    fn date(&mut self, key: &'static str) -> Result<(String, NaiveDateTime), SchemaError> {
        let raw = self.required_text(key)?;
        match parse_date(&raw) {
            Some(parsed) => Ok((raw, parsed)),
            None => Err(SchemaError::InvalidDate {
                field: key,
                value: raw,
            }),
        }
    }

    fn rest(self) -> IndexMap<String, FieldValue> {
        self.0.into_fields()
    }
}
