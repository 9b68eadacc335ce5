use anyhow::Result;
use octocrab::Octocrab;
use serde::Deserialize;

use crate::{
    github::repo_from_pr_url,
    types::{Mergeability, PullRequest},
};

// GitHub caps search pagination; stop well before hammering the API.
const MAX_SEARCH_PAGES: usize = 20;

pub fn create_search_query() -> serde_json::Value {
    serde_json::json!({
        "query": r#"
            query($query: String!, $after: String) {
                search(query: $query, type: ISSUE, first: 100, after: $after) {
                    nodes {
                        ... on PullRequest {
                            number
                            title
                            url
                            author {
                                login
                            }
                            labels(first: 20) {
                                nodes {
                                    name
                                }
                            }
                        }
                    }
                    pageInfo {
                        hasNextPage
                        endCursor
                    }
                }
            }
        "#,
        "variables": {}
    })
}

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse {
    pub data: SearchData,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: SearchResults,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub nodes: Vec<GraphQLPullRequest>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLPullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub author: Option<GraphQLAuthor>,
    pub labels: GraphQLLabelConnection,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLAuthor {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLLabelConnection {
    pub nodes: Vec<GraphQLLabel>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLLabel {
    pub name: String,
}

/// Converts a GraphQL search node into the bot's pull-request model.
/// The owning repository is derived from the pull request's URL; the
/// merge state stays `Unknown` until the enrichment pass resolves it.
pub fn convert_pull_request(node: GraphQLPullRequest) -> Result<PullRequest> {
    let repo = repo_from_pr_url(&node.url)?;

    Ok(PullRequest {
        repo,
        number: node.number,
        title: node.title,
        author_login: node
            .author
            .map(|author| author.login)
            .unwrap_or_else(|| "unknown".to_string()),
        url: node.url,
        labels: node
            .labels
            .nodes
            .into_iter()
            .map(|label| label.name)
            .collect(),
        mergeable: Mergeability::Unknown,
    })
}

/// Runs the search query against GitHub, following pagination cursors
/// until the result set is exhausted.
pub async fn search_pull_requests(
    octocrab: &Octocrab,
    search_query: &str,
) -> Result<Vec<PullRequest>> {
    let mut all_prs = Vec::new();
    let mut after_cursor: Option<String> = None;
    let mut page_count = 0;

    loop {
        page_count += 1;
        let mut query = create_search_query();
        query["variables"]["query"] = serde_json::Value::String(search_query.to_string());
        query["variables"]["after"] = match &after_cursor {
            Some(cursor) => serde_json::Value::String(cursor.clone()),
            None => serde_json::Value::Null,
        };

        let response: GraphQLResponse = octocrab.graphql(&query).await?;
        let search_results = response.data.search;

        for node in search_results.nodes {
            all_prs.push(convert_pull_request(node)?);
        }

        if !search_results.page_info.has_next_page {
            break;
        }

        after_cursor = search_results.page_info.end_cursor;
        if after_cursor.is_none() {
            break;
        }

        if page_count >= MAX_SEARCH_PAGES {
            break;
        }
    }

    Ok(all_prs)
}
