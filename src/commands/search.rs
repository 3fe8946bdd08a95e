//! Search and filter posts

use anyhow::Result;

use super::list::print_posts;
use crate::content::{ArticleMetadata, ChallengeMetadata, Domain, Metadata, Post};
use crate::query::Query;
use crate::Site;

/// Run a query against one domain and print the matches
pub fn run(site: &Site, domain: Domain, query: &Query, json: bool) -> Result<()> {
    if domain == Domain::Articles && (query.platform.is_some() || query.difficulty.is_some()) {
        tracing::warn!("Articles have no platform or difficulty, the filter matches nothing");
    }

    match domain {
        Domain::Articles => search::<ArticleMetadata>(site, query, json),
        Domain::Challenges => search::<ChallengeMetadata>(site, query, json),
    }
}

/// Print the newest posts of a domain, as shown on the home page
pub fn latest(site: &Site, domain: Domain, json: bool) -> Result<()> {
    let query = Query::new().limit(site.config.latest_limit);
    run(site, domain, &query, json)
}

fn search<M: Metadata>(site: &Site, query: &Query, json: bool) -> Result<()> {
    let posts = site.list::<M>()?;
    let results = query.apply(&posts);
    tracing::debug!("Query {:?} matched {} of {}", query, results.len(), posts.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_results(&results, query.is_filtered());
    Ok(())
}

fn print_results<M: Metadata>(results: &[&Post<M>], filtered: bool) {
    if results.is_empty() {
        println!("No {} found", M::DOMAIN);
        return;
    }

    if filtered {
        let noun = match (M::DOMAIN, results.len()) {
            (Domain::Articles, 1) => "post",
            (Domain::Articles, _) => "posts",
            (Domain::Challenges, 1) => "challenge",
            (Domain::Challenges, _) => "challenges",
        };
        println!("{} {} found", results.len(), noun);
    }

    print_posts(results);
}
