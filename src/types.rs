use std::{collections::HashSet, str::FromStr};

use anyhow::Result;
use async_trait::async_trait;

/// A repository the bot watches, identified as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub owner: String,
    pub name: String,
}

impl Repo {
    pub fn new(owner: &str, name: &str) -> Result<Self> {
        if owner.is_empty() || name.is_empty() || owner.contains('/') || name.contains('/') {
            anyhow::bail!(
                "Repository must be in format 'owner/name', got: '{}/{}'",
                owner,
                name
            );
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            anyhow::bail!("Repository must be in format 'owner/name', got: '{}'", s);
        }
        Repo::new(parts[0], parts[1])
    }
}

/// Whether a pull request can currently be merged without conflicts.
///
/// The hosting service computes this lazily, so a freshly fetched pull
/// request stays `Unknown` until the secondary lookup resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mergeability {
    Unknown,
    Mergeable,
    Conflicted,
}

impl Mergeability {
    /// Maps the hosting service's `mergeable` field, which is null while
    /// the merge state is still being computed.
    pub fn from_api(mergeable: Option<bool>) -> Self {
        match mergeable {
            Some(true) => Mergeability::Mergeable,
            Some(false) => Mergeability::Conflicted,
            None => Mergeability::Unknown,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Mergeability::Mergeable => "✅",
            Mergeability::Conflicted => "🔴",
            Mergeability::Unknown => "⭐",
        }
    }
}

/// An open pull request as reported to chat. Built fresh on every run and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub repo: Repo,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub labels: Vec<String>,
    pub author_login: String,
    pub mergeable: Mergeability,
}

/// Which weekdays and times of day the scheduled report fires on.
/// Days are lowercase weekday names; times are `hour * 100 + minute`.
#[derive(Debug, Clone, Default)]
pub struct ScheduleConfig {
    pub days_to_run: HashSet<String>,
    pub times_to_run: HashSet<u32>,
}

/// Label and author restrictions applied to the fetched pull requests.
/// Both sets empty means nothing is filtered out.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub exclude_labels: HashSet<String>,
    pub tracked_users: HashSet<String>,
}

/// Channels and groups that receive the scheduled broadcast, in order.
#[derive(Debug, Clone, Default)]
pub struct DeliveryTargets {
    pub channels: Vec<String>,
    pub groups: Vec<String>,
}

/// Source of raw open pull requests for the configured repositories.
#[async_trait]
pub trait PullRequestSource {
    async fn fetch_pull_requests(
        &self,
        repos: &[Repo],
        label_filter: Option<&str>,
    ) -> Result<Vec<PullRequest>>;
}

/// Secondary per-pull-request lookup resolving the merge state.
/// Returns the hosting service's raw tri-state `mergeable` field.
#[async_trait]
pub trait MergeabilityLookup {
    async fn mergeable_state(&self, owner: &str, repo: &str, number: u64)
    -> Result<Option<bool>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_parses_owner_and_name() {
        let repo: Repo = "rust-lang/cargo".parse().unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "cargo");
        assert_eq!(repo.full_name(), "rust-lang/cargo");
    }

    #[test]
    fn repo_rejects_malformed_input() {
        assert!("cargo".parse::<Repo>().is_err());
        assert!("a/b/c".parse::<Repo>().is_err());
        assert!("/cargo".parse::<Repo>().is_err());
    }

    #[test]
    fn mergeability_maps_the_api_tri_state() {
        assert_eq!(Mergeability::from_api(Some(true)), Mergeability::Mergeable);
        assert_eq!(
            Mergeability::from_api(Some(false)),
            Mergeability::Conflicted
        );
        assert_eq!(Mergeability::from_api(None), Mergeability::Unknown);
    }
}
