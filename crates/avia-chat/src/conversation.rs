//! Conversation state: the append-only transcript and the in-flight flag.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One turn in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Displayed content
    pub text: String,
    /// Who sent it
    pub sender: Sender,
    /// Milliseconds since epoch, assigned at append time
    pub timestamp: i64,
}

/// Conversation state: ordered transcript plus the single-flight flag.
#[derive(Debug, Default)]
pub struct Conversation {
    /// Transcript, append-only for the lifetime of the session
    pub messages: Vec<Message>,
    /// Whether a transport call is outstanding
    pub awaiting_reply: bool,
}

impl Conversation {
    /// Append a message stamped with the current time.
    ///
    /// The timestamp is clamped to the previous entry's, so append order,
    /// display order, and timestamp order stay identical even across a
    /// wall-clock step backwards.
    pub(crate) fn append(&mut self, sender: Sender, text: impl Into<String>) -> Message {
        let mut timestamp = chrono::Utc::now().timestamp_millis();
        if let Some(last) = self.messages.last() {
            timestamp = timestamp.max(last.timestamp);
        }

        let message = Message {
            text: text.into(),
            sender,
            timestamp,
        };
        self.messages.push(message.clone());
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut conversation = Conversation::default();
        conversation.append(Sender::Bot, "welcome");
        conversation.append(Sender::User, "hello");
        conversation.append(Sender::Bot, "hi there");

        let senders: Vec<Sender> = conversation.messages.iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::Bot, Sender::User, Sender::Bot]);
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut conversation = Conversation::default();
        for i in 0..20 {
            conversation.append(Sender::User, format!("msg {i}"));
        }

        let stamps: Vec<i64> = conversation.messages.iter().map(|m| m.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]), "stamps: {stamps:?}");
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let message = Message {
            text: "hi".into(),
            sender: Sender::Bot,
            timestamp: 0,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["sender"], "bot");
    }
}
