//! List site content and its indexes

use anyhow::Result;
use chrono::Local;

use crate::content::{ArticleMetadata, ChallengeMetadata, Domain, Metadata, Post};
use crate::helpers::format_date;
use crate::index;
use crate::query::sort_newest_first;
use crate::Site;

/// List every post of a domain, newest first
pub fn run(site: &Site, domain: Domain, json: bool) -> Result<()> {
    match domain {
        Domain::Articles => list_posts::<ArticleMetadata>(site, json),
        Domain::Challenges => list_posts::<ChallengeMetadata>(site, json),
    }
}

fn list_posts<M: Metadata>(site: &Site, json: bool) -> Result<()> {
    let posts = site.list::<M>()?;
    let mut sorted: Vec<&Post<M>> = posts.iter().collect();
    sort_newest_first(&mut sorted);

    if json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
        return Ok(());
    }

    println!("{}", site.config.heading());
    println!("{} ({}):", capitalize(M::DOMAIN.name()), sorted.len());
    print_posts(&sorted);
    Ok(())
}

/// List tags with their counts
pub fn tags(site: &Site, domain: Domain, json: bool) -> Result<()> {
    match domain {
        Domain::Articles => list_tags::<ArticleMetadata>(site, json),
        Domain::Challenges => list_tags::<ChallengeMetadata>(site, json),
    }
}

fn list_tags<M: Metadata>(site: &Site, json: bool) -> Result<()> {
    let counts = site.tag_counts::<M>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("Tags ({}), {} posts in total:", counts.len(), counts.total());
    for (tag, count) in counts.iter() {
        println!("  {} ({})", tag, count);
    }
    Ok(())
}

/// List challenge platforms with their counts
pub fn platforms(site: &Site, json: bool) -> Result<()> {
    let posts = site.list::<ChallengeMetadata>()?;
    let counts = index::platform_counts(&posts);

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("Platforms ({}):", counts.len());
    for platform in index::all_platforms(&posts) {
        println!("  {} ({})", platform, counts.get(&platform).copied().unwrap_or(0));
    }
    Ok(())
}

/// List challenge counts per difficulty level
pub fn difficulties(site: &Site, json: bool) -> Result<()> {
    let counts = site.difficulty_counts()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("Difficulties ({} rated challenges):", counts.total());
    for (difficulty, count) in counts.iter() {
        println!("  {} ({})", stars(difficulty.get()), count);
    }
    Ok(())
}

/// One line per post: date, title, slug, then challenge details and tags
pub(crate) fn print_posts<M: Metadata>(posts: &[&Post<M>]) {
    let today = Local::now().date_naive();
    for post in posts {
        let mut line = format!(
            "  {} - {} [{}]",
            format_date(post.date(), true, &today),
            post.title(),
            post.slug
        );
        if let Some(platform) = post.metadata.platform() {
            line.push_str(&format!(" {}", platform));
        }
        if let Some(difficulty) = post.metadata.difficulty() {
            line.push_str(&format!(" {}", stars(difficulty.get())));
        }
        if !post.tags().is_empty() {
            line.push_str(&format!(" #{}", post.tags().join(" #")));
        }
        println!("{}", line);
    }
}

/// Difficulty as filled and empty stars, like "★★★☆☆"
pub(crate) fn stars(level: u8) -> String {
    let level = level.min(5) as usize;
    format!("{}{}", "★".repeat(level), "☆".repeat(5 - level))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
