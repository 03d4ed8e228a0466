use crate::models::domain::{Difficulty, QuestionFormat};

pub struct QuizPromptParams<'a> {
    pub content: &'a str,
    pub subject: Option<&'a str>,
    pub difficulty: Option<Difficulty>,
    pub num_questions: Option<u32>,
    pub question_format: Option<QuestionFormat>,
}

const QUIZ_PROMPT_RULES: &str = r#"For each question, you MUST provide:
- "question": The quiz question text.
- "options": An array of strings. For MCQs, this must be exactly 4 options. For True/False, this must be ["True", "False"].
- "answer": The correct answer string, which must be one of the provided options.

Format the output as a JSON object with a "questions" array, where each object adheres to the structure described above.
Example for MCQ: { "question": "What is 2+2?", "options": ["3", "4", "5", "6"], "answer": "4" }
Example for True/False: { "question": "Is the sky blue?", "options": ["True", "False"], "answer": "True" }
Ensure the options for MCQ are plausible distractors.
"#;

pub fn generate_quiz_questions_prompt(params: &QuizPromptParams<'_>) -> String {
    let mut prompt = String::from(
        "You are an expert quiz creator. Given the following content, generate a quiz based on the specifications.\n\n",
    );
    prompt.push_str("Content:\n");
    prompt.push_str(params.content);
    prompt.push_str("\n\nQuiz Specifications:\n");

    if let Some(subject) = params.subject {
        prompt.push_str(&format!("Subject Focus: {}\n", subject));
    }
    if let Some(difficulty) = params.difficulty {
        prompt.push_str(&format!("Difficulty: {}\n", difficulty));
    }
    match params.num_questions {
        Some(count) => prompt.push_str(&format!(
            "Target Number of Questions: {} (Generate as close to this number as possible based on the content.)\n",
            count
        )),
        None => prompt.push_str(
            "Generate a suitable number of questions (e.g., 5-10) based on the content.\n",
        ),
    }
    match params.question_format {
        Some(format) => prompt.push_str(&format!(
            "Preferred Question Format: {} (If 'mcq', provide 4 distinct multiple-choice options. If 'true_false', provide \"True\" and \"False\" as options.)\n",
            format
        )),
        None => prompt
            .push_str("Question Format: Default to multiple-choice (mcq) with 4 options.\n"),
    }

    prompt.push('\n');
    prompt.push_str(QUIZ_PROMPT_RULES);
    prompt
}
