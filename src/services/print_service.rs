use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::{models::domain::QuizQuestion, services::quiz_attempt_service::QuizAttemptService};

pub struct PrintableQuiz<'a> {
    pub subject: Option<&'a str>,
    pub questions: &'a [QuizQuestion],
    pub answers: &'a BTreeMap<usize, String>,
    pub submitted: bool,
}

/// Renders a quiz (and its results once submitted) as plain text for printing.
///
/// Before submission options are shown as `( )`/`(*)` for the current
/// selection. After submission the correct option is marked `[✓]` and a wrong
/// selection `[✗]`.
pub fn render_printable(quiz: &PrintableQuiz<'_>) -> String {
    let mut out = String::new();

    match quiz.subject.map(str::trim).filter(|s| !s.is_empty()) {
        Some(subject) => {
            let _ = writeln!(out, "Quiz - {}", subject);
        }
        None => out.push_str("Quiz\n"),
    }
    out.push_str(if quiz.submitted {
        "Quiz Results\n"
    } else {
        "Interactive Quiz\n"
    });

    if quiz.submitted {
        let score = QuizAttemptService::score(quiz.questions, quiz.answers);
        let total = quiz.questions.len();
        let _ = writeln!(out, "\nYour Score: {} / {}", score, total);
        let _ = writeln!(out, "{}", QuizAttemptService::feedback(score, total));
    }

    for (index, question) in quiz.questions.iter().enumerate() {
        let selected = quiz.answers.get(&index).map(String::as_str);
        let _ = writeln!(out, "\n{}. {}", index + 1, question.question);

        for (opt_index, option) in question.options.iter().enumerate() {
            let is_selected = selected == Some(option.as_str());
            let marker = if quiz.submitted {
                if *option == question.answer {
                    "[✓]"
                } else if is_selected {
                    "[✗]"
                } else {
                    "[ ]"
                }
            } else if is_selected {
                "(*)"
            } else {
                "( )"
            };
            let _ = writeln!(out, "   {} {}. {}", marker, option_label(opt_index), option);
        }

        if quiz.submitted {
            if question.is_correct(selected) {
                out.push_str("   Your answer was correct.\n");
            } else {
                let _ = writeln!(
                    out,
                    "   Your answer was incorrect. Correct Answer: {}",
                    question.answer
                );
            }
        }
    }

    out
}

fn option_label(index: usize) -> String {
    let mut label = String::new();
    let mut n = index;
    loop {
        label.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label
}
