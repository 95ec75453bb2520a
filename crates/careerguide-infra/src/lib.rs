//! Infrastructure layer for the career guide chat backend.
//!
//! Contains implementations of the traits defined in `careerguide-core`:
//! SQLite storage, Gemini and OpenAI-compatible completion clients, and
//! caller identity resolvers. Also loads configuration from disk.

pub mod config;
pub mod filesystem;
pub mod identity;
pub mod llm;
pub mod sqlite;
