use crate::types::PullRequest;

pub const PR_LIST_HEADER: &str = ":cop: Open pull requests waiting for a review:";
pub const NO_PULL_REQUESTS: &str = "No open pull requests right now. Nice work! :tada:";
pub const GITHUB_ERROR: &str = "Could not reach GitHub, please try again later.";

/// The outcome of one pipeline run, ready to be rendered into chat text.
/// Always exactly one of: the "no data" sentinel, the "nothing open"
/// sentinel, or the ordered list of rendered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    GitHubError,
    NoPullRequests,
    List(Vec<String>),
}

impl Report {
    pub fn render(&self) -> String {
        match self {
            Report::GitHubError => GITHUB_ERROR.to_string(),
            Report::NoPullRequests => NO_PULL_REQUESTS.to_string(),
            Report::List(lines) => format!("{}\n\n{}", PR_LIST_HEADER, lines.join("\n")),
        }
    }
}

/// Renders the filtered, enriched list into a report. `None` marks the
/// upstream "no data" sentinel; fetch and enrichment failures must have
/// been resolved to it before this point.
pub fn format_report(fetched: Option<Vec<PullRequest>>) -> Report {
    match fetched {
        None => Report::GitHubError,
        Some(prs) if prs.is_empty() => Report::NoPullRequests,
        Some(prs) => Report::List(prs.iter().map(format_line).collect()),
    }
}

fn format_line(pr: &PullRequest) -> String {
    format!("{} {} | {}", pr.mergeable.glyph(), pr.title, pr.url)
}
