use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Error;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{Instrument, Span};

use crate::relay::ReviewRelay;

pub use webhook::{AppVersion, BuildWebhook, WebhookPayload};

mod webhook;

pub type DeliverySender = mpsc::Sender<WebhookPayload>;

/// Shared server state for all axum handlers.
pub struct ServerState {
    delivery_queue: DeliverySender,
}

impl ServerState {
    pub fn new(delivery_queue: DeliverySender) -> Self {
        Self { delivery_queue }
    }
}

pub type ServerStateRef = Arc<ServerState>;

pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .route("/webhook-handler", post(webhook_handler))
        .route("/health", get(health_handler))
        .layer(ConcurrencyLimitLayer::new(100))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(Arc::new(state))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Router panicked: {err:?}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "")
}

/// Axum handler that receives a build webhook and sends it to the delivery queue.
///
/// The sender always receives an empty `200 OK`, the outcome of the delivery is only logged.
pub async fn webhook_handler(
    State(state): State<ServerStateRef>,
    BuildWebhook(payload): BuildWebhook,
) -> impl IntoResponse {
    if let Err(err) = state.delivery_queue.send(payload).await {
        tracing::error!("Could not enqueue webhook delivery: {err:?}");
    }
    (StatusCode::OK, "")
}

pub struct RelayProcess {
    pub delivery_tx: DeliverySender,
    pub relay_process: Pin<Box<dyn Future<Output = ()> + Send>>,
}

/// Creates a future with a relay process that continuously receives webhook deliveries
/// and notifies the reviewers of each of them.
///
/// The process ends once all senders of the delivery queue are dropped and the
/// deliveries that were already received are finished.
pub fn create_relay_process(relay: ReviewRelay) -> RelayProcess {
    let (delivery_tx, delivery_rx) = mpsc::channel::<WebhookPayload>(1024);

    let service = async move {
        consume_deliveries(Arc::new(relay), delivery_rx).await;
    };

    RelayProcess {
        delivery_tx,
        relay_process: Box::pin(service),
    }
}

async fn consume_deliveries(
    relay: Arc<ReviewRelay>,
    mut delivery_rx: mpsc::Receiver<WebhookPayload>,
) {
    let mut deliveries = JoinSet::new();
    loop {
        tokio::select! {
            payload = delivery_rx.recv() => {
                let Some(payload) = payload else {
                    break;
                };
                let relay = relay.clone();

                let span = tracing::info_span!(
                    "Delivery",
                    version = %payload.app_version.short_version,
                    branch = tracing::field::Empty
                );
                tracing::debug!("Received webhook delivery: {payload:#?}");
                deliveries.spawn(async move {
                    if let Err(error) = relay
                        .handle_delivery(payload)
                        .instrument(span.clone())
                        .await
                    {
                        handle_root_error(span, error.into());
                    }
                });
            }
            Some(result) = deliveries.join_next(), if !deliveries.is_empty() => {
                if let Err(error) = result {
                    tracing::error!("Webhook delivery has crashed: {error:?}");
                }
            }
        }
    }

    while let Some(result) = deliveries.join_next().await {
        if let Err(error) = result {
            tracing::error!("Webhook delivery has crashed: {error:?}");
        }
    }
}

fn handle_root_error(span: Span, error: Error) {
    span.in_scope(|| {
        tracing::error!("Error: {error:?}");
    });
}
