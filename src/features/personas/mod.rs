//! # Personas Feature
//!
//! Persona builder: turns custom form fields or a named preset into the
//! system prompt that conditions a chat session.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod persona;
pub mod presets;
pub mod prompt_builder;

pub use persona::{Persona, PersonaDefinition, PersonaSource, DEFAULT_AVATAR, FALLBACK_PROMPT};
pub use presets::{PresetCatalog, PresetRecord};
pub use prompt_builder::{render_prompt, PersonaError, PromptBuilder};
