//! Spindle LLM - outbound model client and parameter-merging service

pub mod client;
pub mod openai;
pub mod service;

pub use client::{ChatRequest, ChatStream, LlmClient, LlmError, LlmResult};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use service::{CallOverrides, LlmService};
