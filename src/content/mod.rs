//! Content module - header parsing, typed metadata and the content store

mod frontmatter;
pub mod loader;
mod metadata;
mod post;

pub use frontmatter::{Document, FieldValue, FrontMatter, ParseError, DIFFICULTY_KEY};
pub use loader::{ContentError, ContentStore};
pub use metadata::{ArticleMetadata, ChallengeMetadata, SchemaError};
pub use post::{Difficulty, Domain, Metadata, Post};

/// A blog article
pub type Article = Post<ArticleMetadata>;

/// A coding-challenge writeup
pub type Challenge = Post<ChallengeMetadata>;
