//! LLM-powered SQL generation: prompt construction, completion client,
//! and the denylist guard.

pub mod client;
pub mod generator;
pub mod prompt;

pub use client::{AnthropicClient, CompletionProvider};
pub use generator::{QueryGenerator, ERROR_PREFIX};
pub use prompt::{build_prompt, format_schema};
