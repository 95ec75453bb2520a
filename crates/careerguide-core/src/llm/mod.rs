//! LLM provider abstractions and best-effort generators.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `FallbackChain`: ordered candidates tried until one yields text
//! - `ReplyGenerator` / `TitleGenerator`: fixed-prompt generators that
//!   degrade to static text instead of failing

pub mod box_provider;
pub mod fallback;
pub mod provider;
pub mod reply;
pub mod title;

#[cfg(test)]
pub(crate) mod mock;
