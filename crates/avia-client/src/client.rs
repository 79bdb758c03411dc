//! HTTP client for the assistant's chat endpoint

use crate::{
    error::{Error, Result},
    types::{ChatReply, ChatRequest, ErrorBody},
};

/// Default endpoint of the assistant backend.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/chat";

/// Client for the assistant's chat endpoint.
///
/// Holds a connection pool; cheap to clone per call site is not needed,
/// one instance lives for the whole session.
pub struct AssistantClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AssistantClient {
    /// Create a client posting to the given endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one user message and return the assistant's reply.
    ///
    /// No retry and no explicit timeout: the HTTP client's own defaults
    /// apply, and a failed exchange is resolved by the user resending.
    pub async fn send_message(&self, message: &str) -> Result<ChatReply> {
        let request = ChatRequest {
            message: message.to_string(),
        };

        tracing::debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The backend reports failures as {"error": "..."}; fall back to
            // the raw body when it doesn't.
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(Error::api(status.as_u16(), message));
        }

        let reply: ChatReply = serde_json::from_str(&body)?;
        if !reply.steps.is_empty() {
            tracing::debug!("reply carried {} agent steps", reply.steps.len());
        }

        Ok(reply)
    }
}

impl Default for AssistantClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response, then close.
    async fn spawn_stub(response: String) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        addr
    }

    /// Read one full request (headers + content-length body) off the socket.
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                return;
            }
        }
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn client_for(addr: SocketAddr) -> AssistantClient {
        AssistantClient::new(format!("http://{addr}/api/chat"))
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let addr = spawn_stub(http_response(
            "200 OK",
            r#"{"response": "Flight AB123 is on time"}"#,
        ))
        .await;

        let reply = client_for(addr)
            .send_message("flight status of AB123")
            .await
            .unwrap();
        assert_eq!(reply.response, "Flight AB123 is on time");
        assert!(reply.steps.is_empty());
    }

    #[tokio::test]
    async fn test_send_message_passes_steps_through() {
        let addr = spawn_stub(http_response(
            "200 OK",
            r#"{"response": "done", "steps": [{"tool": "AviationStack"}]}"#,
        ))
        .await;

        let reply = client_for(addr).send_message("hi").await.unwrap();
        assert_eq!(reply.steps.len(), 1);
    }

    #[tokio::test]
    async fn test_send_message_server_error() {
        let addr = spawn_stub(http_response(
            "500 Internal Server Error",
            r#"{"error": "agent failed"}"#,
        ))
        .await;

        let err = client_for(addr).send_message("hi").await.unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "agent failed");
            }
            other => panic!("expected Api error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_send_message_error_body_not_json() {
        let addr = spawn_stub(http_response("502 Bad Gateway", "upstream gone")).await;

        let err = client_for(addr).send_message("hi").await.unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream gone");
            }
            other => panic!("expected Api error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_send_message_malformed_body() {
        let addr = spawn_stub(http_response("200 OK", "not json at all")).await;

        let err = client_for(addr).send_message("hi").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)), "got: {err}");
    }

    #[tokio::test]
    async fn test_send_message_connection_refused() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr).send_message("hi").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)), "got: {err}");
    }
}
