//! The review relay: turns a build notification into review requests sent to the
//! reviewers of the pull request the build was made from.
use std::sync::Arc;

use octocrab::Octocrab;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::config::{BrandingConfig, RelayConfig};
use crate::error::RelayResult;
use crate::github::api::client::GithubRepositoryClient;
use crate::github::branch::extract_branch;
use crate::reviewers::ReviewerExtractor;
use crate::server::WebhookPayload;
use crate::slack::message::review_request_message;
use crate::slack::{SlackClient, SlackMessage, SlackUser};

pub struct ReviewRelay {
    github: GithubRepositoryClient,
    slack: SlackClient,
    reviewers: ReviewerExtractor,
    branding: BrandingConfig,
}

impl ReviewRelay {
    pub fn new(config: RelayConfig, github: Octocrab, slack: SlackClient) -> anyhow::Result<Self> {
        Ok(Self {
            github: GithubRepositoryClient::new(github, config.repository),
            slack,
            reviewers: ReviewerExtractor::new(&config.reviewer_domain)?,
            branding: config.branding,
        })
    }

    /// Handles a single webhook delivery and returns how many reviewers were notified.
    ///
    /// Every reviewer is notified by a separate task, a reviewer that cannot be
    /// resolved or messaged is logged and skipped.
    pub async fn handle_delivery(self: &Arc<Self>, payload: WebhookPayload) -> RelayResult<usize> {
        let branch = extract_branch(&payload.app_version.notes);
        tracing::Span::current().record("branch", branch.as_str());
        tracing::info!(
            "Received build {} of branch `{branch}`",
            payload.app_version.short_version
        );

        let pr = self.github.find_pull_request(&branch).await?;
        let emails = self.reviewers.extract(pr.body());
        if emails.is_empty() {
            tracing::info!("Pull request of `{branch}` does not mention any reviewer");
            return Ok(0);
        }

        let message = review_request_message(&payload, &branch, &pr, &self.branding);
        let mut notifications = JoinSet::new();
        for email in emails {
            let relay = Arc::clone(self);
            let message = message.clone();
            notifications.spawn(
                async move {
                    let result = relay.notify_reviewer(&email, &message).await;
                    (email, result)
                }
                .in_current_span(),
            );
        }

        let mut notified = 0;
        while let Some(result) = notifications.join_next().await {
            match result {
                Ok((_, Ok(user))) => {
                    tracing::info!("message sent to: {}", user.real_name);
                    notified += 1;
                }
                Ok((email, Err(error))) => {
                    tracing::error!("Cannot notify reviewer {email}: {error:?}");
                }
                Err(error) => {
                    tracing::error!("Reviewer notification has crashed: {error:?}");
                }
            }
        }
        tracing::info!("Notified {notified} reviewer(s) of `{branch}`");
        Ok(notified)
    }

    /// Resolves the Slack user of `email` and sends them the review request.
    pub async fn notify_reviewer(
        &self,
        email: &str,
        message: &SlackMessage,
    ) -> RelayResult<SlackUser> {
        let user = self.slack.lookup_user_by_email(email).await?;
        self.slack
            .post_message(&message.addressed_to(&user.id))
            .await?;
        Ok(user)
    }
}
