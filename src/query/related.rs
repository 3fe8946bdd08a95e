//! Related-content scoring

use chrono::NaiveDateTime;

use crate::content::{Metadata, Post};
use crate::helpers::days_since;

/// Default number of related posts
pub const RELATED_LIMIT: usize = 6;

/// Points per tag shared with the current post
const SHARED_TAG_POINTS: i64 = 10;

/// Recency bonus for a post published today, minus one point per day
const RECENCY_WINDOW_DAYS: i64 = 30;

/// A candidate with its relevance score
#[derive(Debug, Clone)]
pub struct Related<'a, M> {
    pub post: &'a Post<M>,
    pub score: i64,
}

/// `10 × shared tags + max(0, 30 − days since publication)`
pub fn relevance_score<M: Metadata>(
    current_tags: &[String],
    candidate: &Post<M>,
    now: &NaiveDateTime,
) -> i64 {
    let shared = candidate
        .tags()
        .iter()
        .filter(|tag| current_tags.contains(tag))
        .count() as i64;
    let age = days_since(candidate.date(), now);

    shared * SHARED_TAG_POINTS + (RECENCY_WINDOW_DAYS - age).max(0)
}

/// Every other post ranked by relevance to `current`, best first.
///
/// Equal scores keep collection order. A zero `limit` means no limit.
pub fn related_posts<'a, M: Metadata>(
    current: &Post<M>,
    posts: &'a [Post<M>],
    now: &NaiveDateTime,
    limit: usize,
) -> Vec<Related<'a, M>> {
    let current_tags = current.tags();
    let mut ranked: Vec<Related<'a, M>> = posts
        .iter()
        .filter(|post| post.slug != current.slug)
        .map(|post| Related {
            post,
            score: relevance_score(current_tags, post, now),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    if limit > 0 {
        ranked.truncate(limit);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Article, Document};
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn article(slug: &str, days_ago: i64, tags: &str) -> Article {
        let date = (now() - Duration::days(days_ago)).format("%Y-%m-%dT%H:%M:%S");
        let raw = format!("---\ntitle: {slug}\npublishedAt: {date}\n{tags}---\n");
        Post::from_document(slug, Document::parse(&raw).unwrap()).unwrap()
    }

    #[test]
    fn test_scores() {
        let current = article("current", 10, "tags: [go]\n");
        let x = article("x", 5, "tags: [go]\n");
        let y = article("y", 40, "tags: [rust]\n");

        assert_eq!(relevance_score(current.tags(), &x, &now()), 35);
        assert_eq!(relevance_score(current.tags(), &y, &now()), 0);
    }

    #[test]
    fn test_related_ranks_shared_tags_first() {
        let current = article("current", 10, "tags: [go]\n");
        let posts = vec![
            article("y", 40, "tags: [rust]\n"),
            current.clone(),
            article("x", 5, "tags: [go]\n"),
        ];

        let related = related_posts(&current, &posts, &now(), RELATED_LIMIT);
        let order: Vec<_> = related.iter().map(|r| (r.post.slug.as_str(), r.score)).collect();
        assert_eq!(order, vec![("x", 35), ("y", 0)]);
    }

    #[test]
    fn test_related_is_capped_and_stable() {
        let current = article("current", 0, "tags: [go]\n");
        let mut posts: Vec<Article> = (0..8)
            .map(|i| article(&format!("p{i}"), 100, "tags: [go]\n"))
            .collect();
        posts.push(article("fresh", 0, "tags: [go, go]\n"));

        let related = related_posts(&current, &posts, &now(), RELATED_LIMIT);
        assert_eq!(related.len(), RELATED_LIMIT);
        assert_eq!(related[0].post.slug, "fresh");
        assert_eq!(related[0].score, 50);
        let rest: Vec<_> = related[1..].iter().map(|r| r.post.slug.as_str()).collect();
        assert_eq!(rest, vec!["p0", "p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_zero_limit_keeps_every_candidate() {
        let current = article("current", 0, "tags: [go]\n");
        let mut posts: Vec<Article> = (0..8)
            .map(|i| article(&format!("p{i}"), i, "tags: [go]\n"))
            .collect();
        posts.push(current.clone());

        let related = related_posts(&current, &posts, &now(), 0);
        assert_eq!(related.len(), 8);
        assert_eq!(related[0].post.slug, "p0");
    }

    #[test]
    fn test_untagged_current_scores_only_recency() {
        let current = article("current", 0, "");
        let posts = vec![article("old", 31, "tags: [go]\n"), article("new", 1, "tags: [go]\n")];
        let related = related_posts(&current, &posts, &now(), RELATED_LIMIT);
        let order: Vec<_> = related.iter().map(|r| (r.post.slug.as_str(), r.score)).collect();
        assert_eq!(order, vec![("new", 29), ("old", 0)]);
    }
}
