use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageDetail,
        ImageUrl,
    },
    Client,
};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::api_key_holder::ApiKeyHolder,
};

/// One prompt call: optional system instructions, the rendered prompt text and
/// an optional inline media attachment given as a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub name: &'static str,
    pub system: Option<String>,
    pub text: String,
    pub media_data_uri: Option<String>,
}

impl PromptRequest {
    pub fn new(name: &'static str, text: impl Into<String>) -> Self {
        Self {
            name,
            system: None,
            text: text.into(),
            media_data_uri: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_media(mut self, data_uri: impl Into<String>) -> Self {
        self.media_data_uri = Some(data_uri.into());
        self
    }
}

/// Raw text generation against the model provider.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, request: PromptRequest) -> AppResult<String>;
}

/// Chat-completions client for any OpenAI-compatible endpoint.
///
/// The API key is resolved on every call so a developer override applies to
/// the next request without a restart.
pub struct OpenAiModelClient {
    api_keys: Arc<ApiKeyHolder>,
    api_base_url: String,
    model_name: String,
}

impl OpenAiModelClient {
    pub fn new(config: &Config, api_keys: Arc<ApiKeyHolder>) -> Self {
        Self {
            api_keys,
            api_base_url: config.llm_api_base_url.clone(),
            model_name: config.llm_model.clone(),
        }
    }

    async fn client(&self) -> AppResult<Client<OpenAIConfig>> {
        let api_key = self
            .api_keys
            .resolve()
            .await
            .ok_or(AppError::MissingApiKey)?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(&self.api_base_url);

        Ok(Client::with_config(openai_config))
    }

    fn build_messages(request: &PromptRequest) -> AppResult<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::new();

        if let Some(system) = &request.system {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(system.as_str())
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = match &request.media_data_uri {
            Some(data_uri) => {
                let parts = vec![
                    ChatCompletionRequestUserMessageContentPart::Text(
                        ChatCompletionRequestMessageContentPartText {
                            text: request.text.clone(),
                        },
                    ),
                    ChatCompletionRequestUserMessageContentPart::ImageUrl(
                        ChatCompletionRequestMessageContentPartImage {
                            image_url: ImageUrl {
                                url: data_uri.clone(),
                                detail: Some(ImageDetail::Auto),
                            },
                        },
                    ),
                ];
                ChatCompletionRequestUserMessageArgs::default()
                    .content(ChatCompletionRequestUserMessageContent::Array(parts))
                    .build()?
            }
            None => ChatCompletionRequestUserMessageArgs::default()
                .content(request.text.as_str())
                .build()?,
        };
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        Ok(messages)
    }
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    async fn generate(&self, request: PromptRequest) -> AppResult<String> {
        log::debug!(
            "Calling model {} for prompt {} ({} chars)",
            self.model_name,
            request.name,
            request.text.len()
        );

        let client = self.client().await?;
        let messages = Self::build_messages(&request)?;

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .build()?;

        let response = client.chat().create(chat_request).await.map_err(|e| {
            log::error!("Model call for prompt {} failed: {}", request.name, e);
            AppError::ModelError(e.to_string())
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        log::debug!(
            "Model returned {} chars for prompt {}",
            content.len(),
            request.name
        );

        Ok(content)
    }
}
