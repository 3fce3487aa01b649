use crate::config::BrandingConfig;
use crate::github::PullRequestInfo;
use crate::server::WebhookPayload;
use crate::slack::{Attachment, Field, SlackMessage};

/// Builds the review request sent to every reviewer of a build.
///
/// The message is not addressed yet, use [`SlackMessage::addressed_to`] once the
/// reviewer has been resolved.
pub fn review_request_message(
    payload: &WebhookPayload,
    branch: &str,
    pr: &PullRequestInfo,
    branding: &BrandingConfig,
) -> SlackMessage {
    SlackMessage {
        channel: String::new(),
        text: String::new(),
        as_user: true,
        attachments: vec![Attachment {
            fallback: branding.text.clone(),
            color: branding.color.clone(),
            author_name: pr.user.login.clone(),
            author_link: pr.user.html_url.to_string(),
            author_icon: pr.user.avatar_url.to_string(),
            pretext: payload.text.clone(),
            text: branding.text.clone(),
            fields: vec![
                Field {
                    title: "Version".to_string(),
                    value: payload.app_version.short_version.clone(),
                    short: true,
                },
                Field {
                    title: "Branch".to_string(),
                    value: branch.to_string(),
                    short: true,
                },
            ],
            image_url: branding.image_url.clone(),
            thumb_url: branding.thumb_url.clone(),
            footer: branding.footer.clone(),
            footer_icon: branding.footer_icon.clone(),
        }],
    }
}
