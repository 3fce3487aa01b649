use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;

/// Build notification sent by the app distribution service.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct WebhookPayload {
    pub text: String,
    pub app_version: AppVersion,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct AppVersion {
    #[serde(rename = "shortversion")]
    pub short_version: String,
    /// Release notes (HTML), the first paragraph contains the branch of the build.
    pub notes: String,
}

/// axum extractor for build notification webhooks.
///
/// The sender is never told about failures, invalid payloads are logged and
/// answered with an empty `200 OK`.
#[derive(Debug)]
pub struct BuildWebhook(pub WebhookPayload);

#[async_trait]
impl<S> FromRequest<S> for BuildWebhook
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(request, state).await.map_err(|error| {
            tracing::error!("Reading webhook body failed: {error:?}");
            StatusCode::OK
        })?;

        match serde_json::from_slice::<WebhookPayload>(&body) {
            Ok(payload) => Ok(BuildWebhook(payload)),
            Err(error) => {
                tracing::error!("Cannot parse webhook payload: {error:?}");
                Err(StatusCode::OK)
            }
        }
    }
}
