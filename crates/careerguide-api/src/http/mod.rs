//! RPC API layer.
//!
//! Axum-based procedures at `/api/rpc/<procedure>` with caller resolution,
//! envelope response format, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
