use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

use crate::{
    graphql::search_pull_requests,
    search::build_search_query,
    types::{MergeabilityLookup, PullRequest, PullRequestSource, Repo},
};

/// Creates an authenticated GitHub client from the configured token.
pub fn setup_github_client(token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .context("Failed to create GitHub client")
}

/// Extracts the owning repository from a GitHub pull request URL.
pub fn repo_from_pr_url(url_str: &str) -> Result<Repo> {
    let url = url::Url::parse(url_str)
        .with_context(|| format!("Failed to parse pull request URL: '{}'", url_str))?;

    let path_segments: Vec<&str> = url
        .path_segments()
        .context("Cannot parse URL path")?
        .collect();

    // Expected path structure: ["owner", "repo", "pull", "123"]
    if path_segments.len() < 2 {
        anyhow::bail!(
            "URL must be in format https://github.com/owner/repo/pull/123, got: '{}'",
            url_str
        );
    }

    Repo::new(path_segments[0], path_segments[1])
}

/// GitHub as the bot sees it: one client answering both the open-PR
/// listing and the per-PR mergeability lookup.
#[derive(Clone)]
pub struct GitHubHost {
    client: Octocrab,
}

impl GitHubHost {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PullRequestSource for GitHubHost {
    async fn fetch_pull_requests(
        &self,
        repos: &[Repo],
        label_filter: Option<&str>,
    ) -> Result<Vec<PullRequest>> {
        let query = build_search_query(repos, label_filter);
        debug!("Searching for open pull requests: {}", query);
        search_pull_requests(&self.client, &query).await
    }
}

#[async_trait]
impl MergeabilityLookup for GitHubHost {
    async fn mergeable_state(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Option<bool>> {
        let pr = self
            .client
            .pulls(owner, repo)
            .get(number)
            .await
            .with_context(|| format!("Failed to look up {}/{}#{}", owner, repo, number))?;
        Ok(pr.mergeable)
    }
}
