use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{RelayError, RelayResult};
use crate::slack::{SlackMessage, SlackResponse, SlackUser};

pub fn base_slack_url() -> Url {
    Url::parse("https://slack.com/api/").expect("Invalid Slack API URL")
}

/// Client of the Slack Web API, authenticated with a bot token.
pub struct SlackClient {
    client: reqwest::Client,
    token: SecretString,
    lookup_url: Url,
    post_message_url: Url,
}

impl SlackClient {
    pub fn new(token: SecretString, base_url: &Url) -> anyhow::Result<Self> {
        // `join` would drop the last path segment of a base URL without a trailing slash
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            token,
            lookup_url: base_url
                .join("users.lookupByEmail")
                .context("Invalid Slack API URL")?,
            post_message_url: base_url
                .join("chat.postMessage")
                .context("Invalid Slack API URL")?,
        })
    }

    /// Resolves the Slack user registered with the given email address.
    pub async fn lookup_user_by_email(&self, email: &str) -> RelayResult<SlackUser> {
        // https://api.slack.com/methods/users.lookupByEmail
        let response = self
            .client
            .get(self.lookup_url.clone())
            .bearer_auth(self.token.expose_secret())
            .query(&[("email", email)])
            .send()
            .await?
            .error_for_status()?
            .json::<SlackResponse>()
            .await?;

        match response {
            SlackResponse {
                ok: true,
                user: Some(user),
                ..
            } => Ok(user),
            SlackResponse { error, .. } => {
                tracing::debug!("Slack user lookup for {email} failed: {error:?}");
                Err(RelayError::UserNotFound(email.to_string()))
            }
        }
    }

    /// Sends the message, surfacing the error code reported by Slack if it is rejected.
    pub async fn post_message(&self, message: &SlackMessage) -> RelayResult<()> {
        // https://api.slack.com/methods/chat.postMessage
        let response = self
            .client
            .post(self.post_message_url.clone())
            .bearer_auth(self.token.expose_secret())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/json; charset=utf-8",
            )
            .json(message)
            .send()
            .await?
            .error_for_status()?
            .json::<SlackResponse>()
            .await?;

        if response.ok {
            Ok(())
        } else {
            Err(RelayError::MessageRejected(
                response.error.unwrap_or_default(),
            ))
        }
    }
}
