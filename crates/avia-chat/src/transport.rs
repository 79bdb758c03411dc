//! Transport abstraction for the message exchange

use async_trait::async_trait;
use avia_client::{AssistantClient, ChatReply, Result};

/// Sends one user message and resolves with the assistant's reply.
///
/// One call per accepted submission; the session never issues a second
/// call while one is outstanding.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request/reply exchange
    async fn send(&self, message: &str) -> Result<ChatReply>;
}

/// Production transport: posts to the assistant backend over HTTP.
pub struct HttpTransport {
    client: AssistantClient,
}

impl HttpTransport {
    /// Create a transport posting to the given endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: AssistantClient::new(endpoint),
        }
    }

    /// Endpoint this transport posts to
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            client: AssistantClient::default(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, message: &str) -> Result<ChatReply> {
        self.client.send_message(message).await
    }
}
