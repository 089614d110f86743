//! buchregal-llm: blurb generation for the buchregal book manager
//!
//! The completion service is treated as opaque: a conversation goes in,
//! a JSON-shaped string comes out. This crate owns the prompt, the wire
//! client and the payload parsing, plus a scripted provider for tests.

pub mod prompt;
pub mod provider;
pub mod types;

pub use prompt::build_blurb_prompt;
pub use provider::{parse_blurb_payload, BlurbProvider, ChatCompletionsClient, ScriptedBlurbs};
pub use types::{BlurbRequest, BlurbResponse, LlmError, Message, Role};
