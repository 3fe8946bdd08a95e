//! Aggregate views over a post collection
//!
//! Every function walks the whole collection once; nothing is cached
//! between calls.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use crate::content::{Difficulty, Metadata, Post};

/// Reserved key holding the number of posts in a flattened tag-count map
pub const TOTAL_KEY: &str = "__total__";

/// Distinct tags across all posts, sorted ascending
pub fn all_tags<M: Metadata>(posts: &[Post<M>]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.tags())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Per-tag occurrence counts plus the total number of posts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCounts {
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl TagCounts {
    /// Occurrences of a tag, zero when unknown
    pub fn get(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Number of posts, tagged or not
    pub fn total(&self) -> usize {
        self.total
    }

    /// Tags in ascending order with their counts
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Flatten into one map with the total under [`TOTAL_KEY`].
    ///
    /// A real tag spelled like the sentinel is shadowed by the total.
    pub fn to_map(&self) -> BTreeMap<String, usize> {
        let mut map = self.counts.clone();
        map.insert(TOTAL_KEY.to_string(), self.total);
        map
    }
}

impl Serialize for TagCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

/// Count every tag occurrence; a tag repeated within one post counts twice
pub fn tag_counts<M: Metadata>(posts: &[Post<M>]) -> TagCounts {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for post in posts {
        for tag in post.tags() {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    TagCounts {
        counts,
        total: posts.len(),
    }
}

/// Distinct platforms, sorted ascending
pub fn all_platforms<M: Metadata>(posts: &[Post<M>]) -> Vec<String> {
    posts
        .iter()
        .filter_map(|post| post.metadata.platform())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of posts per platform
pub fn platform_counts<M: Metadata>(posts: &[Post<M>]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for platform in posts.iter().filter_map(|post| post.metadata.platform()) {
        *counts.entry(platform.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Number of posts per difficulty level, every level present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyCounts([usize; Difficulty::MAX as usize]);

impl DifficultyCounts {
    pub fn get(&self, difficulty: Difficulty) -> usize {
        self.0[difficulty.get() as usize - 1]
    }

    /// Levels 1..=5 with their counts
    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, usize)> + '_ {
        Difficulty::all().map(move |d| (d, self.get(d)))
    }

    /// Posts that declare a difficulty
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

impl Serialize for DifficultyCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (difficulty, count) in self.iter() {
            map.serialize_entry(&difficulty.get(), &count)?;
        }
        map.end()
    }
}

pub fn difficulty_counts<M: Metadata>(posts: &[Post<M>]) -> DifficultyCounts {
    let mut counts = DifficultyCounts::default();
    for difficulty in posts.iter().filter_map(|post| post.metadata.difficulty()) {
        counts.0[difficulty.get() as usize - 1] += 1;
    }
    counts
}
