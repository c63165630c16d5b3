//! HTTP plumbing shared by every resource client: the request/response
//! model, the `Transport` seam, and the token-attaching `ApiClient`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::session::SessionStore;

/// Header carrying the session token, as the server expects it.
pub const AUTH_HEADER: &str = "x-auth-token";

// ===== Request / response model =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<FormPart>),
}

/// One field of a multipart upload.
#[derive(Clone)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
        }
    }
}

// File parts can run to megabytes; log names and sizes only.
impl fmt::Debug for FormPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormPart::Text { name, value } => f
                .debug_struct("Text")
                .field("name", name)
                .field("value", value)
                .finish(),
            FormPart::File {
                name,
                file_name,
                bytes,
            } => f
                .debug_struct("File")
                .field("name", name)
                .field("file_name", file_name)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// A request as handed to the transport: method, path relative to the API
/// base URL, the session token if one is attached, and the body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: RequestBody,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// The server's own failure message. Rejection bodies carry it in a
    /// `msg` or `error` field; anything else falls back to the raw body
    /// or the status code.
    pub fn server_message(&self) -> String {
        if let Ok(value) = serde_json::from_slice::<Value>(&self.body) {
            for key in ["msg", "error"] {
                if let Some(message) = value.get(key).and_then(Value::as_str) {
                    return message.to_string();
                }
            }
        }
        let text = String::from_utf8_lossy(&self.body);
        if text.trim().is_empty() {
            format!("HTTP {}", self.status)
        } else {
            text.into_owned()
        }
    }
}

// ===== Transport seam =====

/// Executes one HTTP exchange. Implementations only carry bytes; status
/// handling and decoding stay in [`ApiClient`]. Tests substitute a
/// scripted transport here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// The real transport over a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(token) = &request.token {
            builder = builder.header(AUTH_HEADER, token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(parts) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    form = match part {
                        FormPart::Text { name, value } => form.text(name, value),
                        FormPart::File {
                            name,
                            file_name,
                            bytes,
                        } => form.part(
                            name,
                            reqwest::multipart::Part::bytes(bytes).file_name(file_name),
                        ),
                    };
                }
                builder.multipart(form)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_vec();

        Ok(ApiResponse { status, body })
    }
}

// ===== Shared client =====

/// Shared core under every resource client. Attaches the current session
/// token, turns non-2xx statuses into [`ApiError::Rejected`] carrying the
/// server's message, and decodes success bodies.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        ApiClient { transport, session }
    }

    /// Whether a session token would be attached to the next request.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub async fn send(
        &self,
        method: Method,
        path: impl Into<String>,
        body: RequestBody,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            method,
            path: path.into(),
            token: self.session.token(),
            body,
        };
        debug!(method = %request.method, path = %request.path, "Sending request");

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(ApiError::Rejected {
                status: response.status,
                message: response.server_message(),
            });
        }
        Ok(response)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: impl Into<String>) -> Result<T, ApiError> {
        self.send(Method::Get, path, RequestBody::Empty).await?.json()
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        body: Value,
    ) -> Result<T, ApiError> {
        self.send(Method::Post, path, RequestBody::Json(body))
            .await?
            .json()
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        parts: Vec<FormPart>,
    ) -> Result<T, ApiError> {
        self.send(Method::Post, path, RequestBody::Form(parts))
            .await?
            .json()
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        body: Value,
    ) -> Result<T, ApiError> {
        self.send(Method::Put, path, RequestBody::Json(body))
            .await?
            .json()
    }

    /// PUT actions that carry no payload (mark-read, reject, and the
    /// like).
    pub async fn put_empty<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
    ) -> Result<T, ApiError> {
        self.send(Method::Put, path, RequestBody::Empty).await?.json()
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
    ) -> Result<T, ApiError> {
        self.send(Method::Delete, path, RequestBody::Empty)
            .await?
            .json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_msg_over_error() {
        let response = ApiResponse {
            status: 400,
            body: br#"{"msg":"Product already booked","error":"ignored"}"#.to_vec(),
        };
        assert_eq!(response.server_message(), "Product already booked");
    }

    #[test]
    fn server_message_falls_back_to_error_field() {
        let response = ApiResponse {
            status: 500,
            body: br#"{"error":"boom"}"#.to_vec(),
        };
        assert_eq!(response.server_message(), "boom");
    }

    #[test]
    fn server_message_falls_back_to_raw_body_then_status() {
        let html = ApiResponse {
            status: 502,
            body: b"Bad Gateway".to_vec(),
        };
        assert_eq!(html.server_message(), "Bad Gateway");

        let empty = ApiResponse {
            status: 502,
            body: Vec::new(),
        };
        assert_eq!(empty.server_message(), "HTTP 502");
    }
}
