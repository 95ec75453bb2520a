//! Business logic and repository trait definitions.
//!
//! This crate defines the "ports" (repository, identity and LLM provider
//! traits) that the infrastructure layer implements, plus the services that
//! orchestrate them. It depends only on `careerguide-types` -- never on
//! `careerguide-infra` or any database/IO crate.

pub mod chat;
pub mod identity;
pub mod llm;
pub mod user;
