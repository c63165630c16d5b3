//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_transport`] to get a transport and a receiver, then
//! [`expect_request`] plus the response builders to script each exchange.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::api::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::ApiError;

/// A request captured by the mock transport, paired with the channel the
/// test answers it on.
pub struct RecordedRequest {
    pub request: ApiRequest,
    pub respond_to: oneshot::Sender<Result<ApiResponse, ApiError>>,
}

struct MockTransport {
    sender: mpsc::Sender<RecordedRequest>,
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RecordedRequest {
                request,
                respond_to,
            })
            .await
            .map_err(|_| ApiError::Network("Mock transport closed".to_string()))?;

        response
            .await
            .map_err(|_| ApiError::Network("Mock responder dropped".to_string()))?
    }
}

/// Creates a mock transport and a receiver for asserting requests.
///
/// # Testing Strategy
/// In unit/integration tests we don't want a live HTTP server if we are
/// just testing the *client* logic (e.g., `OrderClient`).
///
/// Instead, the mock transport forwards every request to a channel we
/// control (`receiver`). We can then inspect the requests arriving on
/// that channel and answer each through its oneshot, simulating the
/// server's behavior (success, rejection, failure) deterministically.
pub fn create_mock_transport(
    buffer_size: usize,
) -> (Arc<dyn Transport>, mpsc::Receiver<RecordedRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let transport: Arc<dyn Transport> = Arc::new(MockTransport { sender });
    (transport, receiver)
}

/// Helper to verify that the next request hits the given method and path.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<RecordedRequest>,
    method: Method,
    path: &str,
) -> Option<(ApiRequest, oneshot::Sender<Result<ApiResponse, ApiError>>)> {
    match receiver.recv().await {
        Some(RecordedRequest {
            request,
            respond_to,
        }) if request.method == method && request.path == path => Some((request, respond_to)),
        _ => None,
    }
}

/// 200 response with a JSON body.
pub fn ok_json(body: serde_json::Value) -> ApiResponse {
    ApiResponse {
        status: 200,
        body: body.to_string().into_bytes(),
    }
}

/// Non-2xx response carrying the server's `msg` field.
pub fn rejected(status: u16, msg: &str) -> ApiResponse {
    ApiResponse {
        status,
        body: serde_json::json!({ "msg": msg }).to_string().into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::session::SessionStore;

    #[tokio::test]
    async fn test_mock_transport() {
        let (transport, mut receiver) = create_mock_transport(8);
        let session = SessionStore::new();
        session.set_token("jwt-123");
        let client = ApiClient::new(transport, session);

        let get_task =
            tokio::spawn(async move { client.get::<serde_json::Value>("/products").await });

        let (request, responder) = expect_request(&mut receiver, Method::Get, "/products")
            .await
            .expect("Expected GET /products");
        assert_eq!(request.token.as_deref(), Some("jwt-123"));
        responder.send(Ok(ok_json(serde_json::json!([])))).unwrap();

        let result = get_task.await.unwrap();
        assert_eq!(result.unwrap(), serde_json::json!([]));
    }
}
