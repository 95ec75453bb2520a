//! Chat sessions and messages.
//!
//! - `ChatRepository`: owner-scoped persistence port
//! - `SessionService`: list/create/rename/delete sessions
//! - `MessageService`: list messages and run the send-message workflow

pub mod message;
pub mod repository;
pub mod session;

#[cfg(test)]
pub(crate) mod in_memory;
