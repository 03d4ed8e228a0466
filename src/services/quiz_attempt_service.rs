use std::collections::BTreeMap;

use crate::models::{
    domain::QuizQuestion,
    dto::response::{QuestionResult, QuizResult},
};

pub struct QuizAttemptService;

impl QuizAttemptService {
    /// Number of questions whose selected option equals the correct answer.
    pub fn score(questions: &[QuizQuestion], answers: &BTreeMap<usize, String>) -> usize {
        questions
            .iter()
            .enumerate()
            .filter(|(index, question)| question.is_correct(answers.get(index).map(String::as_str)))
            .count()
    }

    /// Grades every question; unanswered questions count as incorrect.
    pub fn grade(questions: &[QuizQuestion], answers: &BTreeMap<usize, String>) -> QuizResult {
        let results: Vec<QuestionResult> = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = answers.get(&index).cloned();
                QuestionResult {
                    index,
                    is_correct: question.is_correct(selected.as_deref()),
                    selected,
                    correct_answer: question.answer.clone(),
                }
            })
            .collect();

        let score = results.iter().filter(|r| r.is_correct).count();
        let total = questions.len();

        QuizResult {
            score,
            total,
            feedback: Self::feedback(score, total).to_string(),
            results,
        }
    }

    pub fn feedback(score: usize, total: usize) -> &'static str {
        // Integer form of score >= 70% / 50% of total.
        if total == 0 {
            "Keep trying! Review the material and try again."
        } else if score == total {
            "Excellent! Perfect score!"
        } else if score * 10 >= total * 7 {
            "Great job!"
        } else if score * 2 >= total {
            "Good effort, keep practicing!"
        } else {
            "Keep trying! Review the material and try again."
        }
    }
}
