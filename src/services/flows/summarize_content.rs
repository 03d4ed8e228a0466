use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    constants::prompts::summarize_content_prompt,
    errors::AppResult,
    models::dto::{request::SummarizeContentInput, response::SummarizeContentOutput},
    services::{
        flows::Flow,
        model_service::{ModelClient, PromptRequest},
        structured_output::prompt_structured,
    },
};

pub const SUMMARY_UNAVAILABLE: &str = "Error: AI could not summarize the content.";

pub struct SummarizeContentFlow {
    model: Arc<dyn ModelClient>,
}

impl SummarizeContentFlow {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Flow for SummarizeContentFlow {
    type Input = SummarizeContentInput;
    type Output = SummarizeContentOutput;

    fn name(&self) -> &'static str {
        "summarizeContentFlow"
    }

    async fn run(&self, input: SummarizeContentInput) -> AppResult<SummarizeContentOutput> {
        let request = PromptRequest::new(
            "summarizeContentPrompt",
            summarize_content_prompt(&input.content),
        );

        let output = prompt_structured::<SummarizeContentOutput>(self.model.as_ref(), request)
            .await?
            .filter(|output| !output.summary.trim().is_empty());

        Ok(output.unwrap_or_else(|| SummarizeContentOutput {
            summary: SUMMARY_UNAVAILABLE.to_string(),
        }))
    }
}
