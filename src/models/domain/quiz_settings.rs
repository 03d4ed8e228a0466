use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::{Difficulty, QuestionFormat};

pub const DEFAULT_NUM_QUESTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    pub subject: String,
    pub difficulty: Difficulty,
    pub num_questions: u32,
    pub question_format: QuestionFormat,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            subject: String::new(),
            difficulty: Difficulty::Medium,
            num_questions: DEFAULT_NUM_QUESTIONS,
            question_format: QuestionFormat::Mcq,
        }
    }
}

impl QuizSettings {
    /// Subject to focus on, or `None` when left blank.
    pub fn subject_focus(&self) -> Option<String> {
        let subject = self.subject.trim();
        (!subject.is_empty()).then(|| subject.to_string())
    }

    pub fn target_questions(&self) -> Option<u32> {
        (self.num_questions > 0).then_some(self.num_questions)
    }
}
