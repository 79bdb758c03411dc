//! avia-tui: Terminal UI components
//!
//! Chat-oriented widgets built on ratatui and crossterm. This crate knows
//! nothing about the conversation model; the binary converts domain
//! messages into view lines.

pub mod input;
pub mod theme;
pub mod widgets;

pub use theme::Theme;
