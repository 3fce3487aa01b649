use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tokio::task::JoinHandle;
use tower::Service;

use crate::server::{create_app, create_relay_process, RelayProcess, ServerState, WebhookPayload};
use crate::tests::mocks::{ExternalHttpMock, World};

pub mod mocks;

pub use io::load_test_file;

pub fn default_webhook_body() -> String {
    load_test_file("webhook/build-available.json")
}

/// Build notification of branch `release/2.3`.
pub fn default_webhook_payload() -> WebhookPayload {
    serde_json::from_str(&default_webhook_body()).unwrap()
}

/// Represents a running relay web application together with the background
/// relay process. This structure should be used in tests to send webhooks
/// through the whole pipeline.
///
/// Dropping the `app` closes the delivery queue, which lets the relay process
/// finish once all received deliveries are handled.
pub struct RelayTester {
    app: Router,
    http_mock: ExternalHttpMock,
    relay: JoinHandle<()>,
}

impl RelayTester {
    pub async fn new(world: World) -> Self {
        let http_mock = world.build().await;

        let RelayProcess {
            delivery_tx,
            relay_process,
        } = create_relay_process(http_mock.relay());
        let app = create_app(ServerState::new(delivery_tx));
        let relay = tokio::spawn(relay_process);
        Self {
            app,
            http_mock,
            relay,
        }
    }

    pub async fn send_webhook(&mut self, body: &str) -> StatusCode {
        let request = Request::post("/webhook-handler")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&mut self, uri: &str) -> StatusCode {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn send(&mut self, request: Request<Body>) -> StatusCode {
        let response = self
            .app
            .call(request)
            .await
            .expect("Cannot send request");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        assert!(body.is_empty(), "Unexpected response body {body:?}");
        status
    }

    /// Waits until all deliveries are handled and returns the external services,
    /// so that the requests they received can be checked.
    pub async fn finish(self) -> ExternalHttpMock {
        drop(self.app);
        self.relay.await.unwrap();
        self.http_mock
    }
}
