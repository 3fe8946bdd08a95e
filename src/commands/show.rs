//! Show a single post and the posts related to it

use anyhow::{bail, Result};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use super::list::stars;
use crate::content::{ArticleMetadata, ChallengeMetadata, Domain, Metadata, Post};
use crate::helpers::{format_date, utc_now};
use crate::query::{related_posts, Related};
use crate::Site;

/// Print one post with its metadata and body
pub fn run(site: &Site, domain: Domain, slug: &str, json: bool) -> Result<()> {
    match domain {
        Domain::Articles => show::<ArticleMetadata>(site, slug, json),
        Domain::Challenges => show::<ChallengeMetadata>(site, slug, json),
    }
}

fn show<M: Metadata>(site: &Site, slug: &str, json: bool) -> Result<()> {
    let Some(post) = site.find::<M>(slug)? else {
        bail!("No {} with slug {:?}", M::DOMAIN, slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    let today = Local::now().date_naive();
    println!("{}", post.title());
    println!("{}", format_date(post.date(), true, &today));
    println!("{}", site.config.permalink(M::DOMAIN, &post.slug));
    if let Some(platform) = post.metadata.platform() {
        println!("Platform: {}", platform);
    }
    if let Some(difficulty) = post.metadata.difficulty() {
        println!("Difficulty: {}", stars(difficulty.get()));
    }
    if let Some(summary) = post.metadata.summary() {
        println!("{}", summary);
    }
    if !post.tags().is_empty() {
        println!("Tags: {}", post.tags().join(", "));
    }
    println!();
    println!("{}", post.content);
    Ok(())
}

#[derive(Serialize)]
struct RelatedEntry<'a, M> {
    score: i64,
    #[serde(flatten)]
    post: &'a Post<M>,
}

/// Print the posts most related to `slug`
pub fn related(site: &Site, domain: Domain, slug: &str, json: bool) -> Result<()> {
    let now = utc_now();
    match domain {
        Domain::Articles => print_related::<ArticleMetadata>(site, slug, &now, json),
        Domain::Challenges => print_related::<ChallengeMetadata>(site, slug, &now, json),
    }
}

fn print_related<M: Metadata>(site: &Site, slug: &str, now: &NaiveDateTime, json: bool) -> Result<()> {
    let posts = site.list::<M>()?;
    let Some(current) = posts.iter().find(|post| post.slug == slug) else {
        bail!("No {} with slug {:?}", M::DOMAIN, slug);
    };

    let related: Vec<Related<'_, M>> =
        related_posts(current, &posts, now, site.config.related_limit);

    if json {
        let entries: Vec<_> = related
            .iter()
            .map(|r| RelatedEntry {
                score: r.score,
                post: r.post,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Related to {} ({}):", current.title(), related.len());
    for entry in &related {
        println!("  {:>3}  {} [{}]", entry.score, entry.post.title(), entry.post.slug);
    }
    Ok(())
}
