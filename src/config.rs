use std::{collections::HashSet, env};

use anyhow::{Context, Result};

use crate::{
    slack::MessageParams,
    types::{DeliveryTargets, FilterConfig, Repo, ScheduleConfig},
};

const REQUIRED_VARS: &[&str] = &["SLACK_TOKEN", "GH_TOKEN", "GH_REPOS"];

const DEFAULT_DAYS_TO_RUN: &str = "Monday,Tuesday,Wednesday,Thursday,Friday";
const DEFAULT_TIME_TO_RUN: u32 = 900;
const DEFAULT_BOT_NAME: &str = "PR Patrol";

/// Everything the bot needs to run, read from the environment once at
/// startup and passed by reference from then on.
#[derive(Debug, Clone)]
pub struct Config {
    pub slack_token: String,
    pub github_token: String,
    pub repos: Vec<Repo>,
    pub label_filter: Option<String>,
    pub schedule: ScheduleConfig,
    pub filter: FilterConfig,
    pub targets: DeliveryTargets,
    pub message_params: MessageParams,
}

impl Config {
    /// Reads the process environment. Fails with the names of any missing
    /// required variables; this is the only fatal error in the system.
    pub fn from_env() -> Result<Self> {
        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| optional_var(name).is_none())
            .collect();
        if !missing.is_empty() {
            anyhow::bail!(
                "Missing required environment variables: {}",
                missing.join(",")
            );
        }

        let slack_token = required_var("SLACK_TOKEN")?;
        let github_token = required_var("GH_TOKEN")?;
        let repos = parse_repos(&required_var("GH_REPOS")?)?;

        let schedule = ScheduleConfig {
            days_to_run: parse_days(optional_var("DAYS_TO_RUN").as_deref()),
            times_to_run: parse_times(optional_var("TIMES_TO_RUN").as_deref())?,
        };

        let filter = FilterConfig {
            exclude_labels: set_of(optional_var("GH_EXCLUDE_LABELS").as_deref()),
            tracked_users: set_of(optional_var("USERS_TRACKED").as_deref()),
        };

        let targets = DeliveryTargets {
            channels: list_of(optional_var("SLACK_CHANNELS").as_deref()),
            groups: list_of(optional_var("SLACK_GROUPS").as_deref()),
        };

        let message_params = MessageParams {
            username: Some(
                optional_var("SLACK_BOT_NAME").unwrap_or_else(|| DEFAULT_BOT_NAME.to_string()),
            ),
            icon_url: optional_var("SLACK_BOT_ICON"),
        };

        Ok(Config {
            slack_token,
            github_token,
            repos,
            label_filter: optional_var("GH_LABELS"),
            schedule,
            filter,
            targets,
            message_params,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("Missing required environment variable: {}", name))
}

/// Unset and empty are treated the same.
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

fn list_of(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| split_list(raw).map(str::to_string).collect())
        .unwrap_or_default()
}

fn set_of(raw: Option<&str>) -> HashSet<String> {
    raw.map(|raw| split_list(raw).map(str::to_string).collect())
        .unwrap_or_default()
}

fn parse_repos(raw: &str) -> Result<Vec<Repo>> {
    split_list(raw).map(str::parse).collect()
}

/// Weekday names are matched case-insensitively, so store them lowercase.
fn parse_days(raw: Option<&str>) -> HashSet<String> {
    split_list(raw.unwrap_or(DEFAULT_DAYS_TO_RUN))
        .map(|day| day.to_lowercase())
        .collect()
}

/// Times of day are `hour * 100 + minute` integers, e.g. 930 for 9:30.
fn parse_times(raw: Option<&str>) -> Result<HashSet<u32>> {
    match raw {
        None => Ok(HashSet::from([DEFAULT_TIME_TO_RUN])),
        Some(raw) => split_list(raw)
            .map(|entry| {
                entry
                    .parse::<u32>()
                    .with_context(|| format!("Invalid time of day in TIMES_TO_RUN: '{}'", entry))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_default_to_weekdays() {
        let days = parse_days(None);
        assert_eq!(days.len(), 5);
        assert!(days.contains("monday"));
        assert!(days.contains("friday"));
        assert!(!days.contains("saturday"));
    }

    #[test]
    fn days_are_normalised_to_lowercase() {
        let days = parse_days(Some("Saturday,SUNDAY"));
        assert_eq!(days, HashSet::from(["saturday".into(), "sunday".into()]));
    }

    #[test]
    fn times_default_to_nine_am() {
        assert_eq!(parse_times(None).unwrap(), HashSet::from([900]));
    }

    #[test]
    fn times_parse_comma_separated_codes() {
        let times = parse_times(Some("900,1330")).unwrap();
        assert_eq!(times, HashSet::from([900, 1330]));
    }

    #[test]
    fn malformed_time_is_an_error() {
        assert!(parse_times(Some("9:30")).is_err());
    }

    #[test]
    fn repo_list_is_parsed_and_validated() {
        let repos = parse_repos("rust-lang/cargo, tokio-rs/tokio").unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[1].full_name(), "tokio-rs/tokio");

        assert!(parse_repos("not-a-repo").is_err());
    }

    #[test]
    fn empty_entries_are_dropped_from_lists() {
        assert_eq!(list_of(Some("general,,dev,")), vec!["general", "dev"]);
    }
}
