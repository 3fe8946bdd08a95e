//! Validate every content file

use anyhow::{bail, Result};

use crate::content::{ArticleMetadata, ChallengeMetadata, ContentError, Metadata};
use crate::Site;

/// Load every file of both domains and fail if any of them is invalid
pub fn run(site: &Site) -> Result<()> {
    let mut failures = Vec::new();
    let mut checked = 0;

    checked += check_domain::<ArticleMetadata>(site, &mut failures)?;
    checked += check_domain::<ChallengeMetadata>(site, &mut failures)?;

    for failure in &failures {
        tracing::error!("{}", failure);
    }

    if !failures.is_empty() {
        bail!("{} of {} content files are invalid", failures.len(), checked);
    }

    println!("All {} content files are valid", checked);
    Ok(())
}

fn check_domain<M: Metadata>(site: &Site, failures: &mut Vec<ContentError>) -> Result<usize> {
    let store = site.store();
    let checked = store.content_files(M::DOMAIN)?.len();
    let found = store.check::<M>()?;
    tracing::info!("Checked {} {}, {} invalid", checked, M::DOMAIN, found.len());
    failures.extend(found);
    Ok(checked)
}
