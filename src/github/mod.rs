//! Contains definitions of common types (repository name, pull request, user) needed
//! for looking up pull requests on GitHub.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use url::Url;

pub mod api;
pub mod branch;

/// Unique identifier of a GitHub repository
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

impl FromStr for GithubRepoName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(format!(
                "Repository `{value}` has to be in the format `<owner>/<name>`"
            )),
        }
    }
}

/// Author of a pull request.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct GithubUser {
    pub login: String,
    pub avatar_url: Url,
    pub html_url: Url,
}

/// The subset of a GitHub pull request needed to notify its reviewers.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct PullRequestInfo {
    // GitHub sends `null` for PRs without a description.
    pub body: Option<String>,
    pub user: GithubUser,
}

impl PullRequestInfo {
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}
