use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    constants::prompts::extract_content_from_url_prompt,
    errors::AppResult,
    models::dto::{request::ExtractContentFromUrlInput, response::ExtractedTextOutput},
    services::{
        flows::Flow,
        model_service::{ModelClient, PromptRequest},
        page_fetcher::PageFetcher,
        structured_output::prompt_structured,
    },
};

/// Fetches a page and asks the model for its main readable text.
///
/// Never fails at runtime: fetch and model problems come back as
/// `Error:`-prefixed text.
pub struct ExtractContentFromUrlFlow {
    model: Arc<dyn ModelClient>,
    fetcher: Arc<dyn PageFetcher>,
}

impl ExtractContentFromUrlFlow {
    pub fn new(model: Arc<dyn ModelClient>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { model, fetcher }
    }
}

#[async_trait]
impl Flow for ExtractContentFromUrlFlow {
    type Input = ExtractContentFromUrlInput;
    type Output = ExtractedTextOutput;

    fn name(&self) -> &'static str {
        "extractContentFromUrlFlow"
    }

    async fn run(&self, input: ExtractContentFromUrlInput) -> AppResult<ExtractedTextOutput> {
        let page = match self.fetcher.fetch(&input.url).await {
            Ok(page) => page,
            Err(e) => {
                log::error!("Error fetching URL content: {}", e);
                return Ok(ExtractedTextOutput::new(format!(
                    "Error: Could not fetch content from URL. {}",
                    e
                )));
            }
        };

        if !page.is_success() {
            log::error!("Failed to fetch URL: {}, Status: {}", input.url, page.status);
            return Ok(ExtractedTextOutput::new(format!(
                "Error: Could not fetch content from URL. Status: {}. {}",
                page.status, page.body
            )));
        }

        if page.body.trim().is_empty() {
            return Ok(ExtractedTextOutput::new("Error: Fetched content was empty."));
        }

        let request = PromptRequest::new(
            "extractContentFromUrlPrompt",
            extract_content_from_url_prompt(&page.body),
        );

        match prompt_structured::<ExtractedTextOutput>(self.model.as_ref(), request).await {
            Ok(Some(output)) => Ok(output),
            Ok(None) => Ok(ExtractedTextOutput::new(
                "Error: AI could not process the fetched content.",
            )),
            Err(e) => {
                log::error!("Error processing fetched content with AI model: {}", e);
                Ok(ExtractedTextOutput::new(format!(
                    "Error: AI processing failed. {}",
                    e
                )))
            }
        }
    }
}
