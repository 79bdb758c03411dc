//! avia-chat: conversation store and message exchange cycle
//!
//! This crate owns the append-only transcript, the single-flight guard,
//! and the request/reply cycle against the assistant backend.

pub mod conversation;
pub mod diagnostics;
pub mod events;
pub mod session;
pub mod transport;

pub use conversation::{Conversation, Message, Sender};
pub use diagnostics::{DiagnosticsSink, TracingSink};
pub use events::ChatEvent;
pub use session::{ChatSession, FALLBACK_MESSAGE, Submission, WELCOME_MESSAGE};
pub use transport::{HttpTransport, Transport};
