use octocrab::Octocrab;

use crate::error::{RelayError, RelayResult};
use crate::github::{GithubRepoName, PullRequestInfo};

#[derive(serde::Serialize)]
struct PullRequestQuery<'a> {
    head: &'a str,
    state: &'static str,
}

/// Provides access to the pull requests of a single repository using the GitHub API.
pub struct GithubRepositoryClient {
    client: Octocrab,
    repo_name: GithubRepoName,
}

impl GithubRepositoryClient {
    pub fn new(client: Octocrab, repo_name: GithubRepoName) -> Self {
        Self { client, repo_name }
    }

    /// Finds the open pull request whose head is `branch`.
    ///
    /// Only branches pushed to the repository itself are considered (`<owner>:<branch>`),
    /// and if GitHub returns several pull requests, the first one wins.
    pub async fn find_pull_request(&self, branch: &str) -> RelayResult<PullRequestInfo> {
        if branch.is_empty() {
            return Err(RelayError::BranchNotFound(branch.to_string()));
        }

        // https://docs.github.com/en/rest/pulls/pulls#list-pull-requests
        let head = format!("{}:{branch}", self.repo_name.owner());
        let pulls: Option<Vec<PullRequestInfo>> = self
            .client
            .get(
                format!(
                    "/repos/{}/{}/pulls",
                    self.repo_name.owner(),
                    self.repo_name.name()
                ),
                Some(&PullRequestQuery {
                    head: &head,
                    state: "open",
                }),
            )
            .await?;
        tracing::debug!(
            "Found {} pull request(s) for {head}",
            pulls.as_ref().map_or(0, Vec::len)
        );

        pulls
            .and_then(|pulls| pulls.into_iter().next())
            .ok_or_else(|| RelayError::BranchNotFound(branch.to_string()))
    }
}
