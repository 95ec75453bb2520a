//! Local user records keyed by identity-provider subject.

pub mod repository;
pub mod service;
