use crate::types::Repo;

/// Builds the GitHub search expression for the open-pull-request listing.
/// Multiple `repo:` terms are OR'ed by GitHub search, so one query covers
/// every configured repository.
#[derive(Debug)]
pub struct SearchQueryBuilder {
    terms: Vec<String>,
}

impl SearchQueryBuilder {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn repo(&mut self, repo: &Repo) -> &mut Self {
        self.terms.push(format!("repo:{}", repo.full_name()));
        self
    }

    pub fn pr_type(&mut self) -> &mut Self {
        self.terms.push("type:pr".to_string());
        self
    }

    pub fn open(&mut self) -> &mut Self {
        self.terms.push("state:open".to_string());
        self
    }

    pub fn label(&mut self, label: &str) -> &mut Self {
        self.terms.push(format!("label:{}", label));
        self
    }

    pub fn build(&self) -> String {
        self.terms.join(" ")
    }
}

/// The one query shape the bot issues: all configured repos, open PRs,
/// optionally restricted to a single label.
pub fn build_search_query(repos: &[Repo], label_filter: Option<&str>) -> String {
    let mut builder = SearchQueryBuilder::new();
    for repo in repos {
        builder.repo(repo);
    }
    builder.pr_type().open();
    if let Some(label) = label_filter {
        builder.label(label);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos(names: &[&str]) -> Vec<Repo> {
        names.iter().map(|name| name.parse().unwrap()).collect()
    }

    #[test]
    fn query_covers_every_repo() {
        let query = build_search_query(&repos(&["acme/api", "acme/web"]), None);
        assert_eq!(query, "repo:acme/api repo:acme/web type:pr state:open");
    }

    #[test]
    fn label_filter_is_appended_when_configured() {
        let query = build_search_query(&repos(&["acme/api"]), Some("needs-review"));
        assert_eq!(query, "repo:acme/api type:pr state:open label:needs-review");
    }
}
