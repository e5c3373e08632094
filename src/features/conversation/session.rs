//! Per-user chat session: conversation log plus active persona

use chrono::{DateTime, Utc};
use log::{debug, warn};
use uuid::Uuid;

use super::history::{Conversation, ConversationState};
use super::message::{Message, Role};
use crate::features::completion::{CompletionError, CompletionGateway};
use crate::features::personas::{Persona, FALLBACK_PROMPT};

/// One user's isolated chat state. Created by the hosting layer, dropped
/// when the session ends.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    conversation: Conversation,
    persona: Option<Persona>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(greeting: &str) -> Self {
        Self::with_id(Uuid::new_v4(), greeting)
    }

    pub fn with_id(id: Uuid, greeting: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            conversation: Conversation::new(greeting),
            persona: None,
            created_at: now,
            last_active: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.all()
    }

    pub fn state(&self) -> ConversationState {
        self.conversation.state()
    }

    pub fn persona(&self) -> Option<&Persona> {
        self.persona.as_ref()
    }

    /// Replace the active persona. The conversation is kept as is.
    pub fn set_persona(&mut self, persona: Persona) {
        debug!(
            "[{}] Persona set to '{}'",
            self.id,
            persona.display_name()
        );
        self.persona = Some(persona);
        self.touch();
    }

    /// Prompt for the next completion, never empty
    pub fn system_prompt(&self) -> &str {
        self.persona
            .as_ref()
            .map(|p| p.system_prompt.as_str())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(FALLBACK_PROMPT)
    }

    pub fn reset(&mut self) {
        self.conversation.reset();
        self.touch();
    }

    /// Run one user turn against `gateway`.
    ///
    /// The user message is appended first and stays in the log even when the
    /// gateway fails; the assistant reply is appended only on success.
    pub async fn submit(
        &mut self,
        gateway: &dyn CompletionGateway,
        text: &str,
    ) -> Result<String, CompletionError> {
        self.touch();
        self.conversation.append(Role::User, text);
        debug!(
            "[{}] User message appended | Log length: {} | Preview: '{}'",
            self.id,
            self.conversation.len(),
            text.chars().take(100).collect::<String>()
        );

        let result = gateway
            .complete(self.system_prompt(), self.conversation.all())
            .await;

        match result {
            Ok(reply) => {
                self.conversation.append(Role::Assistant, reply.clone());
                self.touch();
                Ok(reply)
            }
            Err(e) => {
                warn!("[{}] Completion failed: {e}", self.id);
                Err(e)
            }
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}
