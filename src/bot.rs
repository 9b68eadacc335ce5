use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    enrich::enrich,
    event::{ChatEvent, classify},
    filter::filter,
    report::{Report, format_report},
    schedule::should_run,
    slack::ChatSender,
    types::{MergeabilityLookup, PullRequest, PullRequestSource},
};

/// The bot: one configuration plus the three injected collaborators.
/// Holds no mutable state; every run builds its data fresh and drops it.
pub struct Patrol<S, L, C> {
    config: Config,
    source: S,
    lookup: L,
    chat: C,
}

impl<S, L, C> Patrol<S, L, C>
where
    S: PullRequestSource + Sync,
    L: MergeabilityLookup + Sync,
    C: ChatSender + Sync,
{
    pub fn new(config: Config, source: S, lookup: L, chat: C) -> Self {
        Self {
            config,
            source,
            lookup,
            chat,
        }
    }

    pub fn chat(&self) -> &C {
        &self.chat
    }

    /// One schedule evaluation. Runs the pipeline and broadcasts when the
    /// configured day and time both match, otherwise does nothing.
    pub async fn run_tick(&self, now: DateTime<Local>) {
        if !should_run(&now, &self.config.schedule) {
            debug!("Nothing to run this minute");
            return;
        }

        info!("Running scheduled pull request report");
        let report = self.collect_report().await;
        self.broadcast(&report).await;
    }

    /// Answers an inbound chat event, replying only to the channel the
    /// request came from. Unrecognised events are dropped silently.
    pub async fn handle_event(&self, event: &ChatEvent) {
        let trigger = classify(event);
        if !trigger.requests_report() {
            return;
        }

        debug!(
            "Answering {:?} report request on channel {}",
            trigger, event.channel
        );
        let report = self.collect_report().await;
        self.reply(&report, &event.channel).await;
    }

    /// Runs fetch, enrichment, filtering, and formatting. Fetch and
    /// enrichment failures are logged and resolved to the "no data"
    /// sentinel here; they never escape the pipeline.
    pub async fn collect_report(&self) -> Report {
        debug!("Checking for pull requests...");

        let fetched = match self.fetch_and_enrich().await {
            Ok(prs) => Some(filter(prs, &self.config.filter)),
            Err(err) => {
                error!("Failed to collect pull requests: {:#}", err);
                None
            }
        };

        format_report(fetched)
    }

    async fn fetch_and_enrich(&self) -> anyhow::Result<Vec<PullRequest>> {
        let raw = self
            .source
            .fetch_pull_requests(&self.config.repos, self.config.label_filter.as_deref())
            .await?;
        enrich(raw, &self.lookup).await
    }

    /// Delivers the report to every configured channel and group. Sends
    /// are fire-and-forget: a failed destination is logged and the rest
    /// still receive the report. Nothing is retried.
    pub async fn broadcast(&self, report: &Report) {
        let text = report.render();

        for channel in &self.config.targets.channels {
            if let Err(err) = self
                .chat
                .send_to_channel(channel, &text, &self.config.message_params)
                .await
            {
                warn!("Failed to deliver report to channel '{}': {:#}", channel, err);
            }
        }

        for group in &self.config.targets.groups {
            if let Err(err) = self
                .chat
                .send_to_group(group, &text, &self.config.message_params)
                .await
            {
                warn!("Failed to deliver report to group '{}': {:#}", group, err);
            }
        }
    }

    /// Sends the report to a single channel, for interactive requests.
    pub async fn reply(&self, report: &Report, channel: &str) {
        if let Err(err) = self
            .chat
            .reply(channel, &report.render(), &self.config.message_params)
            .await
        {
            warn!("Failed to reply on channel '{}': {:#}", channel, err);
        }
    }
}
