// Core layer - configuration
pub mod core;

// Features layer - personas, conversation sessions, completion gateway
pub mod features;

// Presentation layer - HTML chat surface
pub mod web;

pub use core::Config;

pub use features::{
    // Completion
    CompletionError, CompletionGateway, DisabledGateway, OpenAiGateway,
    // Conversation
    ChatSession, Conversation, ConversationState, Message, Role, SessionStore,
    // Personas
    Persona, PersonaDefinition, PersonaError, PersonaSource, PresetCatalog, PromptBuilder,
};

pub use web::{create_router, AppState};
