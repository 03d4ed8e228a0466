use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{ContentTab, Notice, QuizQuestion, QuizSession, QuizSettings};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeContentOutput {
    /// A concise summary of the content.
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizQuestionsOutput {
    /// The generated quiz questions.
    pub questions: Vec<QuizQuestion>,
}

/// Output of both text extraction flows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTextOutput {
    /// The extracted text.
    pub extracted_text: String,
}

impl ExtractedTextOutput {
    pub fn new(extracted_text: impl Into<String>) -> Self {
        Self {
            extracted_text: extracted_text.into(),
        }
    }

    /// Extraction flows report failures in-band with an `Error:` prefix.
    pub fn is_error(&self) -> bool {
        self.extracted_text.starts_with("Error:")
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub feedback: String,
    pub results: Vec<QuestionResult>,
}

/// Session snapshot returned by every session endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSessionDto {
    pub id: Uuid,
    pub active_tab: ContentTab,
    pub raw_content: String,
    pub url_input: String,
    pub summary: String,
    pub settings: QuizSettings,
    pub questions: Vec<QuizQuestion>,
    pub user_answers: BTreeMap<usize, String>,
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<usize>,
    pub all_questions_answered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&QuizSession> for QuizSessionDto {
    fn from(session: &QuizSession) -> Self {
        QuizSessionDto {
            id: session.id,
            active_tab: session.active_tab,
            raw_content: session.raw_content.clone(),
            url_input: session.url_input.clone(),
            summary: session.summary.clone(),
            settings: session.settings.clone(),
            questions: session.questions.clone(),
            user_answers: session.user_answers.clone(),
            submitted: session.submitted,
            score: session.submitted.then_some(session.score),
            all_questions_answered: session.all_questions_answered(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session: QuizSessionDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl SessionResponse {
    pub fn new(session: &QuizSession, notice: Option<Notice>) -> Self {
        Self {
            session: QuizSessionDto::from(session),
            notice,
        }
    }
}
