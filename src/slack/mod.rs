//! Types of the Slack Web API used to notify reviewers.
use serde::{Deserialize, Serialize};

pub mod client;
pub mod message;

pub use client::SlackClient;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SlackUser {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub real_name: String,
}

/// Common envelope of Slack Web API responses.
#[derive(Deserialize, Debug)]
pub(crate) struct SlackResponse {
    pub ok: bool,
    pub user: Option<SlackUser>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    pub author_name: String,
    pub author_link: String,
    pub author_icon: String,
    pub pretext: String,
    pub text: String,
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    pub footer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
}

/// Payload of `chat.postMessage`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SlackMessage {
    /// Id of the user (or channel) receiving the message.
    pub channel: String,
    pub text: String,
    pub as_user: bool,
    pub attachments: Vec<Attachment>,
}

impl SlackMessage {
    /// Returns a copy of this message addressed to the given channel.
    pub fn addressed_to(&self, channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            ..self.clone()
        }
    }
}
