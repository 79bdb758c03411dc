//! avia-client: HTTP client for the aviation assistant backend
//!
//! This crate speaks the assistant's chat protocol: one POST per user
//! message, a typed reply, and a typed error for everything that can go
//! wrong on the wire.

pub mod client;
pub mod error;
pub mod types;

pub use client::{AssistantClient, DEFAULT_ENDPOINT};
pub use error::{Error, Result};
pub use types::{ChatReply, ChatRequest};
