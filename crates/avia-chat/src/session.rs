//! The chat session: drives the exchange cycle over the conversation.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::{
    conversation::{Conversation, Message, Sender},
    diagnostics::{DiagnosticsSink, TracingSink},
    events::ChatEvent,
    transport::Transport,
};

/// Welcome message seeded into every new conversation.
pub const WELCOME_MESSAGE: &str =
    "Hello! I am your Aviation Assistant. Ask me about flight statuses, airlines, or airports.";

/// Fixed bot text shown when a transport call fails.
pub const FALLBACK_MESSAGE: &str = "Sorry, I encountered an error while processing your request.";

/// Outcome of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The message was appended and one exchange ran to completion.
    Accepted,
    /// The guard rejected it: blank input, or a reply already outstanding.
    Ignored,
}

/// The conversation store.
///
/// Owns the transcript and the single-flight guard, and runs the
/// request/reply cycle one exchange at a time. Cloning is cheap; clones
/// share the same conversation.
#[derive(Clone)]
pub struct ChatSession {
    conversation: Arc<Mutex<Conversation>>,
    transport: Arc<dyn Transport>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    event_tx: broadcast::Sender<ChatEvent>,
}

impl ChatSession {
    /// Create a session seeded with the welcome message
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_diagnostics(transport, Arc::new(TracingSink))
    }

    /// Create a session with a specific diagnostics sink
    pub fn with_diagnostics(
        transport: Arc<dyn Transport>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(256);

        let mut conversation = Conversation::default();
        conversation.append(Sender::Bot, WELCOME_MESSAGE);

        Self {
            conversation: Arc::new(Mutex::new(conversation)),
            transport,
            diagnostics,
            event_tx,
        }
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.event_tx.subscribe()
    }

    /// Snapshot of the transcript
    pub fn messages(&self) -> Vec<Message> {
        self.conversation.lock().messages.clone()
    }

    /// Whether a transport call is outstanding
    pub fn awaiting_reply(&self) -> bool {
        self.conversation.lock().awaiting_reply
    }

    /// Submit user text and run one exchange.
    ///
    /// Blank input, or a submission while a reply is outstanding, is a
    /// silent no-op. An accepted submission appends the user message as
    /// typed, performs exactly one transport call, and appends exactly one
    /// bot message (the reply, or the fallback on failure) before
    /// returning.
    pub async fn submit(&self, text: &str) -> Submission {
        // Guard and user-append happen under one lock so two concurrent
        // submissions cannot both pass.
        {
            let mut conversation = self.conversation.lock();
            if text.trim().is_empty() || conversation.awaiting_reply {
                return Submission::Ignored;
            }
            let message = conversation.append(Sender::User, text);
            conversation.awaiting_reply = true;
            let _ = self.event_tx.send(ChatEvent::MessageAppended { message });
            let _ = self.event_tx.send(ChatEvent::ExchangeStart);
        }

        match self.transport.send(text).await {
            Ok(reply) => self.complete(reply.response),
            Err(error) => {
                self.diagnostics.report(&error);
                self.complete(FALLBACK_MESSAGE);
            }
        }

        Submission::Accepted
    }

    /// Append the resolving bot message and clear the in-flight flag.
    fn complete(&self, text: impl Into<String>) {
        let message = {
            let mut conversation = self.conversation.lock();
            let message = conversation.append(Sender::Bot, text);
            conversation.awaiting_reply = false;
            message
        };
        let _ = self.event_tx.send(ChatEvent::MessageAppended { message });
        let _ = self.event_tx.send(ChatEvent::ExchangeEnd);
    }
}
