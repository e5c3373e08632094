//! Persona records: what the form submits and what a build resolves to

use serde::{Deserialize, Serialize};

/// Avatar shown next to assistant messages when neither the form nor the
/// preset provides one
pub const DEFAULT_AVATAR: &str = "🦊";

/// Prompt used by sessions that never submitted a persona
pub const FALLBACK_PROMPT: &str = "You are a helpful assistant.";

/// Persona fields as entered on the builder form.
///
/// Every text field may be empty; an empty field renders as an empty clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaDefinition {
    pub name: String,
    pub personality: String,
    pub topics: String,
    pub communication_style: String,
    pub language: String,
    #[serde(default)]
    pub custom_instructions: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Where a persona build takes its fields from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaSource {
    Custom(PersonaDefinition),
    Preset {
        name: String,
        custom_instructions: Option<String>,
        avatar: Option<String>,
    },
}

impl PersonaSource {
    pub fn preset(name: impl Into<String>) -> Self {
        PersonaSource::Preset {
            name: name.into(),
            custom_instructions: None,
            avatar: None,
        }
    }
}

/// A built persona, ready to condition a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub definition: PersonaDefinition,
    pub system_prompt: String,
    pub avatar: String,
    /// Preset name, or None for custom fields
    pub preset: Option<String>,
}

impl Persona {
    pub fn display_name(&self) -> &str {
        if self.definition.name.trim().is_empty() {
            "Assistant"
        } else {
            &self.definition.name
        }
    }
}

/// Treat whitespace-only optional input as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
