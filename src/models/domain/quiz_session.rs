use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{quiz_question::QuizQuestion, quiz_settings::QuizSettings};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentTab {
    #[default]
    Paste,
    Txt,
    Pdf,
    Url,
}

/// In-memory state of one content-to-quiz session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub id: Uuid,
    pub active_tab: ContentTab,
    pub raw_content: String,
    pub url_input: String,
    pub summary: String,
    pub settings: QuizSettings,
    pub questions: Vec<QuizQuestion>,
    pub user_answers: BTreeMap<usize, String>,
    pub submitted: bool,
    pub score: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            active_tab: ContentTab::Paste,
            raw_content: String::new(),
            url_input: String::new(),
            summary: String::new(),
            settings: QuizSettings::default(),
            questions: Vec::new(),
            user_answers: BTreeMap::new(),
            submitted: false,
            score: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Clears the summary and everything derived from it.
    pub fn reset_quiz_state(&mut self) {
        self.summary.clear();
        self.clear_quiz();
        self.score = 0;
    }

    /// Clears generated questions and answers, keeping the summary.
    pub fn clear_quiz(&mut self) {
        self.questions.clear();
        self.user_answers.clear();
        self.submitted = false;
    }

    pub fn start_over(&mut self) {
        self.active_tab = ContentTab::Paste;
        self.raw_content.clear();
        self.url_input.clear();
        self.reset_quiz_state();
    }

    pub fn all_questions_answered(&self) -> bool {
        !self.questions.is_empty() && self.user_answers.len() == self.questions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
