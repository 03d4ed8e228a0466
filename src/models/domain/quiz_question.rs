use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single generated question. `answer` is expected to be one of `options`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct QuizQuestion {
    /// The quiz question.
    pub question: String,
    /// The multiple-choice options (4 for mcq, ["True", "False"] for true_false).
    pub options: Vec<String>,
    /// The correct answer.
    pub answer: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, selected: Option<&str>) -> bool {
        selected == Some(self.answer.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionFormat {
    #[default]
    Mcq,
    TrueFalse,
}

impl fmt::Display for QuestionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionFormat::Mcq => write!(f, "mcq"),
            QuestionFormat::TrueFalse => write!(f, "true_false"),
        }
    }
}
