//! Conversation domain
//!
//! A conversation is an append-only sequence of [`message::Message`]s.
//! The [`log::ConversationLog`] is the only writer of message sequence
//! numbers, which keeps them contiguous from zero.

pub mod log;
pub mod message;
