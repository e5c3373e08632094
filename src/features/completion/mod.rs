//! # Completion Feature
//!
//! Single synchronous request per user turn: persona prompt as the system
//! message followed by the full conversation log.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod gateway;
pub mod openai_chat;

pub use gateway::{CompletionError, CompletionGateway, DisabledGateway};
pub use openai_chat::{build_request_messages, OpenAiGateway};
