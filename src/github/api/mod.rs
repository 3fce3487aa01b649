use anyhow::Context;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

pub mod client;

pub fn base_github_url() -> Url {
    Url::parse("https://api.github.com").expect("Invalid GitHub API URL")
}

/// Creates an API client authenticated with a personal access token.
pub fn create_github_client(token: &SecretString, base_url: &Url) -> anyhow::Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.expose_secret().to_string())
        .base_uri(base_url.as_str())
        .context("Invalid GitHub API URL")?
        .build()
        .context("Could not create octocrab builder")
}
