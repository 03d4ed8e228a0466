use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    constants::prompts::EXTRACT_TEXT_FROM_PDF_PROMPT,
    errors::AppResult,
    models::dto::{request::ExtractTextFromPdfInput, response::ExtractedTextOutput},
    services::{
        flows::Flow,
        model_service::{ModelClient, PromptRequest},
        structured_output::prompt_structured,
    },
};

pub struct ExtractTextFromPdfFlow {
    model: Arc<dyn ModelClient>,
}

impl ExtractTextFromPdfFlow {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Flow for ExtractTextFromPdfFlow {
    type Input = ExtractTextFromPdfInput;
    type Output = ExtractedTextOutput;

    fn name(&self) -> &'static str {
        "extractTextFromPdfFlow"
    }

    async fn run(&self, input: ExtractTextFromPdfInput) -> AppResult<ExtractedTextOutput> {
        let request = PromptRequest::new("extractTextFromPdfPrompt", EXTRACT_TEXT_FROM_PDF_PROMPT)
            .with_media(input.pdf_data_uri);

        let output = prompt_structured::<ExtractedTextOutput>(self.model.as_ref(), request).await?;

        Ok(output.unwrap_or_else(|| ExtractedTextOutput::new("")))
    }
}
