//! pr-patrol: a bot that nags your team about open pull requests.
//!
//! Periodically searches GitHub for open pull requests across the
//! configured repositories, resolves each one's merge state, filters and
//! renders them into a single report, and posts it to the configured
//! Slack channels and groups. The same report is produced on demand when
//! the bot is asked via direct message or a recognised command phrase.
//!
//! The external collaborators - the pull request source, the mergeability
//! lookup, and the chat sender - are injected traits, so the whole
//! pipeline runs against mocks in tests without touching the network.

pub mod bot;
pub mod config;
pub mod enrich;
pub mod event;
pub mod filter;
pub mod github;
pub mod graphql;
pub mod report;
pub mod schedule;
pub mod search;
pub mod slack;
pub mod types;

pub use bot::Patrol;
pub use config::Config;
pub use enrich::enrich;
pub use event::{COMMANDS, ChatEvent, Trigger, WORKAROUND_PHRASE, classify};
pub use filter::filter;
pub use github::{GitHubHost, repo_from_pr_url, setup_github_client};
pub use report::{GITHUB_ERROR, NO_PULL_REQUESTS, PR_LIST_HEADER, Report, format_report};
pub use schedule::should_run;
pub use slack::{ChatSender, MessageParams, SlackSender};
pub use types::{
    DeliveryTargets, FilterConfig, Mergeability, MergeabilityLookup, PullRequest,
    PullRequestSource, Repo, ScheduleConfig,
};
