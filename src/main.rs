use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use pr_patrol::{Config, GitHubHost, Patrol, SlackSender, setup_github_client};
use tracing::info;

// Human-readable build info (for clap version display)
const BUILD_INFO_HUMAN: &str = env!("BUILD_INFO_HUMAN");

// The schedule is evaluated once per wall-clock minute.
const CHECK_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "pr-patrol")]
#[command(
    about = "Posts a digest of open pull requests to Slack on a schedule, and on demand when asked"
)]
#[command(long_version = BUILD_INFO_HUMAN)]
struct Cli {
    /// Run the report once, deliver it, and exit
    #[arg(long)]
    once: bool,

    /// With --once, reply to a single channel instead of broadcasting
    #[arg(long, value_name = "CHANNEL", requires = "once")]
    channel: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_filter = if debug { "pr_patrol=debug" } else { "pr_patrol=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = Config::from_env()?;
    let github = GitHubHost::new(setup_github_client(&config.github_token)?);
    let slack = SlackSender::new(&config.slack_token);

    // The same GitHub client answers both the listing and the per-PR
    // mergeability lookups.
    let bot = Patrol::new(config, github.clone(), github, slack);

    if cli.once {
        let report = bot.collect_report().await;
        match &cli.channel {
            Some(channel) => bot.reply(&report, channel).await,
            None => bot.broadcast(&report).await,
        }
        return Ok(());
    }

    info!(
        "Starting pr-patrol, evaluating the schedule every {}s",
        CHECK_INTERVAL.as_secs()
    );

    let mut ticks = tokio::time::interval(CHECK_INTERVAL);
    // A pipeline run slower than the interval must not burst make-up
    // ticks into the same minute.
    ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        ticks.tick().await;
        bot.run_tick(Local::now()).await;
    }
}
