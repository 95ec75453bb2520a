//! Observability for the career guide chat backend.

pub mod tracing_setup;
