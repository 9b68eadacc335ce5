use anyhow::Result;
use futures::future;
use tracing::debug;

use crate::types::{Mergeability, MergeabilityLookup, PullRequest};

/// Resolves the merge state of every fetched pull request.
///
/// One secondary lookup per pull request, all issued concurrently and
/// joined; the enriched list exists only once the last lookup finishes.
/// A single failed lookup fails the whole pass; no partial result is
/// ever produced, so the caller degrades the entire run to the "no data"
/// sentinel.
pub async fn enrich<L>(prs: Vec<PullRequest>, lookup: &L) -> Result<Vec<PullRequest>>
where
    L: MergeabilityLookup + Sync,
{
    debug!("Resolving merge state for {} pull requests", prs.len());
    future::try_join_all(prs.into_iter().map(|pr| resolve_merge_state(pr, lookup))).await
}

async fn resolve_merge_state<L>(mut pr: PullRequest, lookup: &L) -> Result<PullRequest>
where
    L: MergeabilityLookup + Sync,
{
    let state = lookup
        .mergeable_state(&pr.repo.owner, &pr.repo.name, pr.number)
        .await?;
    pr.mergeable = Mergeability::from_api(state);
    Ok(pr)
}
