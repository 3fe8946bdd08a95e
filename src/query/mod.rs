//! Query engine - filter, search, sort and truncate a post collection

pub mod related;

pub use related::{related_posts, relevance_score, Related};

use crate::content::{Difficulty, Metadata, Post};

/// Filters for a listing. Every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Case-insensitive substring searched in title, summary, body, tags and platform
    pub search: Option<String>,
    /// Exact, case-sensitive tag
    pub tag: Option<String>,
    /// Exact platform
    pub platform: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Keep only the first `limit` posts after sorting
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether any filter is active; the limit does not count
    pub fn is_filtered(&self) -> bool {
        active(&self.search).is_some()
            || active(&self.tag).is_some()
            || active(&self.platform).is_some()
            || self.difficulty.is_some()
    }

    /// Whether a single post satisfies every filter
    pub fn matches<M: Metadata>(&self, post: &Post<M>) -> bool {
        if let Some(tag) = active(&self.tag) {
            if !post.has_tag(tag) {
                return false;
            }
        }

        if let Some(difficulty) = self.difficulty {
            if post.metadata.difficulty() != Some(difficulty) {
                return false;
            }
        }

        if let Some(platform) = active(&self.platform) {
            if post.metadata.platform() != Some(platform) {
                return false;
            }
        }

        match active(&self.search) {
            Some(text) => matches_search(post, &text.to_lowercase()),
            None => true,
        }
    }

    /// Filter, sort newest first and truncate
    pub fn apply<'p, M: Metadata>(&self, posts: &'p [Post<M>]) -> Vec<&'p Post<M>> {
        let mut results: Vec<&Post<M>> = posts.iter().filter(|post| self.matches(*post)).collect();
        sort_newest_first(&mut results);

        // A zero limit means no limit
        if let Some(limit) = self.limit.filter(|&n| n > 0) {
            results.truncate(limit);
        }

        results
    }
}

/// Run a query over a collection
pub fn query<'p, M: Metadata>(posts: &'p [Post<M>], query: &Query) -> Vec<&'p Post<M>> {
    query.apply(posts)
}

/// Sort by primary date, newest first. Equal dates fall back to slug order.
pub fn sort_newest_first<M: Metadata>(posts: &mut [&Post<M>]) {
    posts.sort_by(|a, b| {
        b.date()
            .cmp(a.date())
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

/// Empty filter strings count as unset
fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|s| !s.is_empty())
}

/// `needle` must already be lowercase
fn matches_search<M: Metadata>(post: &Post<M>, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(post.title())
        || post.metadata.summary().is_some_and(contains)
        || contains(post.content.as_str())
        || post.tags().iter().any(|tag| contains(tag.as_str()))
        || post.metadata.platform().is_some_and(contains)
}
