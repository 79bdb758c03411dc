//! Chat session event types

use crate::conversation::Message;
use serde::{Deserialize, Serialize};

/// Events emitted by the session for the rendering layer.
///
/// The transcript itself is the source of truth; events exist so a
/// renderer can follow along without polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A message was appended to the transcript
    MessageAppended { message: Message },

    /// A transport call went out; a reply is now outstanding
    ExchangeStart,

    /// The outstanding exchange resolved and the flag cleared
    ExchangeEnd,
}
