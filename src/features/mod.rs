//! # Features
//!
//! - `personas`: persona builder and preset catalog
//! - `conversation`: message log, per-user sessions, session store
//! - `completion`: gateway to the hosted completion service

pub mod completion;
pub mod conversation;
pub mod personas;

pub use completion::{CompletionError, CompletionGateway, DisabledGateway, OpenAiGateway};
pub use conversation::{
    ChatSession, Conversation, ConversationState, Message, Role, SessionStore,
};
pub use personas::{
    Persona, PersonaDefinition, PersonaError, PersonaSource, PresetCatalog, PromptBuilder,
};
