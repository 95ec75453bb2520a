//! Shared domain types for the career guide chat backend.
//!
//! Users, chat sessions and messages, LLM request/response shapes, caller
//! identity, configuration, and the error enums shared across crates.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
pub mod llm;
pub mod user;
