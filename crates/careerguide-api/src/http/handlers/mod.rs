//! HTTP request handlers for the RPC API.

pub mod health;
pub mod message;
pub mod session;
pub mod user;
