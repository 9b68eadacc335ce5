use crate::types::{FilterConfig, PullRequest};

/// Drops pull requests carrying an excluded label, then restricts to the
/// tracked authors when any are configured. Both predicates are plain set
/// membership, so with neither set configured this is the identity.
pub fn filter(prs: Vec<PullRequest>, config: &FilterConfig) -> Vec<PullRequest> {
    prs.into_iter()
        .filter(|pr| {
            !pr.labels
                .iter()
                .any(|label| config.exclude_labels.contains(label))
        })
        .filter(|pr| {
            config.tracked_users.is_empty() || config.tracked_users.contains(&pr.author_login)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mergeability, Repo};

    fn pr(number: u64, author: &str, labels: &[&str]) -> PullRequest {
        PullRequest {
            repo: Repo::new("acme", "api").unwrap(),
            number,
            title: format!("PR #{}", number),
            url: format!("https://github.com/acme/api/pull/{}", number),
            labels: labels.iter().map(|label| label.to_string()).collect(),
            author_login: author.to_string(),
            mergeable: Mergeability::Unknown,
        }
    }

    fn config(exclude: &[&str], tracked: &[&str]) -> FilterConfig {
        FilterConfig {
            exclude_labels: exclude.iter().map(|label| label.to_string()).collect(),
            tracked_users: tracked.iter().map(|user| user.to_string()).collect(),
        }
    }

    #[test]
    fn empty_config_is_the_identity() {
        let prs = vec![pr(1, "alice", &["wip"]), pr(2, "bob", &[])];
        assert_eq!(filter(prs.clone(), &config(&[], &[])), prs);
    }

    #[test]
    fn any_excluded_label_drops_the_pull_request() {
        let prs = vec![
            pr(1, "alice", &["bug", "wip"]),
            pr(2, "bob", &["bug"]),
            pr(3, "carol", &[]),
        ];
        let kept = filter(prs, &config(&["wip"], &[]));
        let numbers: Vec<u64> = kept.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn tracked_users_restrict_by_author() {
        let prs = vec![pr(1, "alice", &[]), pr(2, "bob", &[])];
        let kept = filter(prs, &config(&[], &["alice"]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].author_login, "alice");
    }

    #[test]
    fn both_predicates_apply_together() {
        let prs = vec![
            pr(1, "alice", &["wip"]),
            pr(2, "alice", &[]),
            pr(3, "bob", &[]),
        ];
        let kept = filter(prs, &config(&["wip"], &["alice"]));
        let numbers: Vec<u64> = kept.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, vec![2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let prs = vec![
            pr(1, "alice", &["wip"]),
            pr(2, "bob", &[]),
            pr(3, "carol", &["bug"]),
        ];
        let config = config(&["wip"], &["bob", "carol"]);
        let once = filter(prs, &config);
        let twice = filter(once.clone(), &config);
        assert_eq!(once, twice);
    }
}
