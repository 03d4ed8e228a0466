use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::dto::{
        request::{
            ExtractContentFromUrlInput, ExtractTextFromPdfInput, GenerateQuizQuestionsInput,
            SummarizeContentInput,
        },
        response::{ExtractedTextOutput, GenerateQuizQuestionsOutput, SummarizeContentOutput},
    },
    services::{
        flows::{
            execute, ExtractContentFromUrlFlow, ExtractTextFromPdfFlow,
            GenerateQuizQuestionsFlow, SummarizeContentFlow,
        },
        model_service::ModelClient,
        page_fetcher::PageFetcher,
    },
};

/// Entry point to every flow; each call validates its input first.
pub struct FlowService {
    summarize_content: SummarizeContentFlow,
    generate_quiz_questions: GenerateQuizQuestionsFlow,
    extract_text_from_pdf: ExtractTextFromPdfFlow,
    extract_content_from_url: ExtractContentFromUrlFlow,
}

impl FlowService {
    pub fn new(model: Arc<dyn ModelClient>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            summarize_content: SummarizeContentFlow::new(model.clone()),
            generate_quiz_questions: GenerateQuizQuestionsFlow::new(model.clone()),
            extract_text_from_pdf: ExtractTextFromPdfFlow::new(model.clone()),
            extract_content_from_url: ExtractContentFromUrlFlow::new(model, fetcher),
        }
    }

    pub async fn summarize_content(
        &self,
        input: SummarizeContentInput,
    ) -> AppResult<SummarizeContentOutput> {
        execute(&self.summarize_content, input).await
    }

    pub async fn generate_quiz_questions(
        &self,
        input: GenerateQuizQuestionsInput,
    ) -> AppResult<GenerateQuizQuestionsOutput> {
        execute(&self.generate_quiz_questions, input).await
    }

    pub async fn extract_text_from_pdf(
        &self,
        input: ExtractTextFromPdfInput,
    ) -> AppResult<ExtractedTextOutput> {
        execute(&self.extract_text_from_pdf, input).await
    }

    pub async fn extract_content_from_url(
        &self,
        input: ExtractContentFromUrlInput,
    ) -> AppResult<ExtractedTextOutput> {
        execute(&self.extract_content_from_url, input).await
    }
}
