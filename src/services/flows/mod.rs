//! Flows: named, schema-validated wrappers around one model prompt each.

pub mod extract_content_from_url;
pub mod extract_text_from_pdf;
pub mod generate_quiz_questions;
pub mod summarize_content;

use async_trait::async_trait;
use validator::Validate;

use crate::errors::AppResult;

pub use extract_content_from_url::ExtractContentFromUrlFlow;
pub use extract_text_from_pdf::ExtractTextFromPdfFlow;
pub use generate_quiz_questions::GenerateQuizQuestionsFlow;
pub use summarize_content::SummarizeContentFlow;

#[async_trait]
pub trait Flow: Send + Sync {
    type Input: Validate + Send + 'static;
    type Output: Send;

    fn name(&self) -> &'static str;

    /// Runs the flow on an already validated input.
    async fn run(&self, input: Self::Input) -> AppResult<Self::Output>;
}

/// Validates `input` against the flow's input contract, then runs the flow.
pub async fn execute<F: Flow>(flow: &F, input: F::Input) -> AppResult<F::Output> {
    input.validate()?;

    log::info!("Running flow {}", flow.name());
    let result = flow.run(input).await;
    match &result {
        Ok(_) => log::info!("Flow {} completed", flow.name()),
        Err(e) => log::error!("Flow {} failed: {}", flow.name(), e),
    }
    result
}
