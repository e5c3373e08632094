//! System prompt construction from custom fields or presets
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use thiserror::Error;

use super::persona::{non_blank, Persona, PersonaDefinition, PersonaSource, DEFAULT_AVATAR};
use super::presets::{PresetCatalog, PresetRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonaError {
    #[error("unknown preset name: {0}")]
    UnknownPreset(String),
}

/// Builder resolving a [`PersonaSource`] into a [`Persona`]
///
/// # Example
///
/// ```ignore
/// let persona = PromptBuilder::new(&catalog, PersonaSource::preset("Pirate"))
///     .with_default_avatar("🤖")
///     .build()?;
/// ```
pub struct PromptBuilder<'a> {
    catalog: &'a PresetCatalog,
    source: PersonaSource,
    default_avatar: String,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(catalog: &'a PresetCatalog, source: PersonaSource) -> Self {
        Self {
            catalog,
            source,
            default_avatar: DEFAULT_AVATAR.to_string(),
        }
    }

    /// Override the avatar used when neither the form nor the preset sets one
    pub fn with_default_avatar(mut self, avatar: &str) -> Self {
        self.default_avatar = avatar.to_string();
        self
    }

    /// Resolve the source and render the system prompt.
    ///
    /// Fails only when a preset name is not in the catalog.
    pub fn build(self) -> Result<Persona, PersonaError> {
        let (definition, preset_avatar, preset) = match self.source {
            PersonaSource::Custom(mut definition) => {
                definition.custom_instructions = non_blank(definition.custom_instructions);
                definition.avatar = non_blank(definition.avatar);
                (definition, None, None)
            }
            PersonaSource::Preset {
                name,
                custom_instructions,
                avatar,
            } => {
                let record = self
                    .catalog
                    .get(&name)
                    .ok_or_else(|| PersonaError::UnknownPreset(name.clone()))?;
                let definition = definition_from_preset(
                    &name,
                    record,
                    non_blank(custom_instructions),
                    non_blank(avatar),
                );
                (definition, non_blank(record.avatar_icon.clone()), Some(name))
            }
        };

        let avatar = definition
            .avatar
            .clone()
            .or(preset_avatar)
            .unwrap_or(self.default_avatar);

        Ok(Persona {
            system_prompt: render_prompt(&definition),
            definition,
            avatar,
            preset,
        })
    }
}

/// Expand a preset record into the same shape the custom form produces
fn definition_from_preset(
    name: &str,
    record: &PresetRecord,
    custom_instructions: Option<String>,
    avatar: Option<String>,
) -> PersonaDefinition {
    PersonaDefinition {
        name: name.to_string(),
        personality: record.personality_description.clone(),
        topics: record.favorite_topics.clone(),
        communication_style: record.communication_style.clone(),
        language: record.preferred_language.clone(),
        custom_instructions,
        avatar,
    }
}

/// Render a persona definition into system prompt text
pub fn render_prompt(definition: &PersonaDefinition) -> String {
    let mut prompt = format!(
        "You are {}, a chat companion.\n\
         Personality: {}\n\
         Favorite topics: {}\n\
         Communication style: {}\n\
         Always reply in {}.",
        definition.name.trim(),
        definition.personality.trim(),
        definition.topics.trim(),
        definition.communication_style.trim(),
        definition.language.trim(),
    );

    if let Some(instructions) = definition
        .custom_instructions
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        prompt.push_str("\n\nAdditional instructions:\n");
        prompt.push_str(instructions);
    }

    prompt
}
