//! OpenAI chat completion gateway
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use async_trait::async_trait;
use log::{debug, error, info};
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use openai::Credentials;
use std::time::{Duration, Instant};

use super::gateway::{CompletionError, CompletionGateway};
use crate::core::Config;
use crate::features::conversation::{Message, Role};

pub struct OpenAiGateway {
    model: String,
    credentials: Credentials,
    timeout: Duration,
}

impl OpenAiGateway {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> Self {
        Self {
            model: model.to_string(),
            credentials: Credentials::new(api_key, base_url),
            timeout,
        }
    }

    /// Build a gateway from config, or None when no API key is set
    pub fn from_config(config: &Config) -> Option<Self> {
        config.openai_api_key.as_deref().map(|key| {
            Self::new(
                key,
                &config.openai_base_url,
                &config.openai_model,
                config.completion_timeout,
            )
        })
    }
}

#[async_trait]
impl CompletionGateway for OpenAiGateway {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<String, CompletionError> {
        let start_time = Instant::now();
        let messages = build_request_messages(system_prompt, history);
        debug!(
            "Sending chat completion | Model: {} | Messages: {}",
            self.model,
            messages.len()
        );

        let request = ChatCompletion::builder(&self.model, messages)
            .credentials(self.credentials.clone())
            .create();

        let chat_completion = match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(completion)) => completion,
            Ok(Err(e)) => {
                error!("OpenAI API error after {:?}: {e}", start_time.elapsed());
                return Err(CompletionError::Service(e.to_string()));
            }
            Err(_) => {
                error!("OpenAI request timed out after {:?}", self.timeout);
                return Err(CompletionError::Timeout(self.timeout));
            }
        };

        if let Some(usage) = &chat_completion.usage {
            info!(
                "Chat completion done in {:?} | Tokens: prompt={} completion={} total={}",
                start_time.elapsed(),
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        chat_completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|text| !text.is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// One system message with the persona prompt, then the history in order
pub fn build_request_messages(system_prompt: &str, history: &[Message]) -> Vec<ChatCompletionMessage> {
    std::iter::once(chat_message(ChatCompletionMessageRole::System, system_prompt))
        .chain(
            history
                .iter()
                .map(|msg| chat_message(to_openai_role(msg.role()), msg.content())),
        )
        .collect()
}

fn to_openai_role(role: Role) -> ChatCompletionMessageRole {
    match role {
        Role::User => ChatCompletionMessageRole::User,
        Role::Assistant => ChatCompletionMessageRole::Assistant,
        Role::System => ChatCompletionMessageRole::System,
    }
}

fn chat_message(role: ChatCompletionMessageRole, content: &str) -> ChatCompletionMessage {
    ChatCompletionMessage {
        role,
        content: Some(content.to_string()),
        name: None,
        function_call: None,
        tool_call_id: None,
        tool_calls: None,
    }
}
