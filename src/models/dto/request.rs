use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Difficulty, QuestionFormat, QuizQuestion};

static DATA_URI_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^data:[A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+;base64,[A-Za-z0-9+/]+={0,2}$")
        .expect("DATA_URI_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeContentInput {
    /// The content to summarize.
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizQuestionsInput {
    /// The content to generate quiz questions from.
    pub content: String,

    /// The quiz should focus on aspects of the content related to this subject.
    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    /// Desired number of questions; the model is asked to get as close as possible.
    #[validate(range(min = 1))]
    #[serde(default)]
    pub num_questions: Option<u32>,

    #[serde(default)]
    pub question_format: Option<QuestionFormat>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTextFromPdfInput {
    /// Expected format: `data:application/pdf;base64,<encoded_data>`.
    #[validate(regex(path = *DATA_URI_REGEX))]
    pub pdf_data_uri: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtractContentFromUrlInput {
    #[validate(url)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetContentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoadTextFileRequest {
    #[serde(default)]
    pub file_name: Option<String>,
    #[validate(length(min = 1))]
    pub mime_type: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoadPdfRequest {
    pub pdf_data_uri: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoadUrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizSettingsRequest {
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    pub difficulty: Option<Difficulty>,
    #[validate(range(min = 1, max = 20))]
    pub num_questions: Option<u32>,
    pub question_format: Option<QuestionFormat>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnswerQuestionRequest {
    #[validate(length(min = 1))]
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GradeQuizRequest {
    pub questions: Vec<QuizQuestion>,
    /// Selected option per question index.
    #[serde(default)]
    pub answers: BTreeMap<usize, String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrintQuizRequest {
    #[serde(default)]
    pub subject: Option<String>,
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub answers: BTreeMap<usize, String>,
    #[serde(default)]
    pub submitted: bool,
}

/// Parses `{ "apiKey": string | null }`.
///
/// An unreadable body is a `RequestFailed` (500); a missing or non-string,
/// non-null `apiKey` is a `BadRequest` (400).
pub fn parse_dev_api_key_body(body: &[u8]) -> AppResult<Option<String>> {
    let value: Value = serde_json::from_slice(body).map_err(|e| AppError::RequestFailed {
        message: "Failed to set API key.".to_string(),
        details: e.to_string(),
    })?;

    match value.get("apiKey") {
        Some(Value::String(key)) => Ok(Some(key.clone())),
        Some(Value::Null) => Ok(None),
        _ => Err(AppError::BadRequest(
            "Invalid API key provided. Must be a string or null.".to_string(),
        )),
    }
}
