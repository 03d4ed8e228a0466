use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    constants::quiz_prompt::{generate_quiz_questions_prompt, QuizPromptParams},
    errors::AppResult,
    models::{
        domain::{quiz_settings::DEFAULT_NUM_QUESTIONS, QuestionFormat, QuizQuestion},
        dto::{request::GenerateQuizQuestionsInput, response::GenerateQuizQuestionsOutput},
    },
    services::{
        flows::Flow,
        model_service::{ModelClient, PromptRequest},
        structured_output::{extract_json, schema_instructions},
    },
};

pub struct GenerateQuizQuestionsFlow {
    model: Arc<dyn ModelClient>,
}

impl GenerateQuizQuestionsFlow {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    /// Accepts either `{"questions": [...]}` or a bare array of questions.
    fn parse_questions(raw: &str) -> Vec<QuizQuestion> {
        extract_json::<GenerateQuizQuestionsOutput>(raw)
            .map(|output| output.questions)
            .or_else(|| extract_json::<Vec<QuizQuestion>>(raw))
            .unwrap_or_default()
    }
}

#[async_trait]
impl Flow for GenerateQuizQuestionsFlow {
    type Input = GenerateQuizQuestionsInput;
    type Output = GenerateQuizQuestionsOutput;

    fn name(&self) -> &'static str {
        "generateQuizQuestionsFlow"
    }

    async fn run(&self, input: GenerateQuizQuestionsInput) -> AppResult<GenerateQuizQuestionsOutput> {
        let subject = input
            .subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let prompt = generate_quiz_questions_prompt(&QuizPromptParams {
            content: &input.content,
            subject,
            difficulty: input.difficulty,
            num_questions: Some(input.num_questions.unwrap_or(DEFAULT_NUM_QUESTIONS)),
            question_format: Some(input.question_format.unwrap_or(QuestionFormat::Mcq)),
        });

        let request = PromptRequest::new(
            "generateQuizQuestionsPrompt",
            format!(
                "{}\n{}",
                prompt,
                schema_instructions::<GenerateQuizQuestionsOutput>()
            ),
        );

        let raw = self.model.generate(request).await?;
        let questions = Self::parse_questions(&raw);
        if questions.is_empty() {
            log::warn!(
                "Quiz generation returned no output, or output did not conform to schema"
            );
        }

        Ok(GenerateQuizQuestionsOutput { questions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::services::{flows::execute, model_service::MockModelClient};

    fn input(content: &str) -> GenerateQuizQuestionsInput {
        GenerateQuizQuestionsInput {
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn applies_default_count_and_format() {
        let mut model = MockModelClient::new();
        model
            .expect_generate()
            .withf(|req| {
                req.text.contains("Target Number of Questions: 5")
                    && req.text.contains("Preferred Question Format: mcq")
            })
            .times(1)
            .returning(|_| {
                Ok(r#"{"questions":[{"question":"What is 2+2?","options":["3","4","5","6"],"answer":"4"}]}"#.to_string())
            });

        let flow = GenerateQuizQuestionsFlow::new(Arc::new(model));
        let output = execute(&flow, input("Arithmetic basics")).await.unwrap();

        assert_eq!(output.questions.len(), 1);
        assert_eq!(output.questions[0].answer, "4");
    }

    #[tokio::test]
    async fn accepts_bare_array_output() {
        let mut model = MockModelClient::new();
        model.expect_generate().returning(|_| {
            Ok(r#"```json
[{"question":"Is the sky blue?","options":["True","False"],"answer":"True"}]
```"#
                .to_string())
        });

        let flow = GenerateQuizQuestionsFlow::new(Arc::new(model));
        let output = execute(&flow, input("Sky")).await.unwrap();

        assert_eq!(output.questions.len(), 1);
        assert_eq!(output.questions[0].options, vec!["True", "False"]);
    }

    #[tokio::test]
    async fn stray_bracket_before_output_keeps_questions() {
        let mut model = MockModelClient::new();
        model.expect_generate().returning(|_| {
            Ok("Here is the quiz (see [1):\n{\"questions\":[{\"question\":\"q\",\"options\":[\"True\",\"False\"],\"answer\":\"True\"}]}".to_string())
        });

        let flow = GenerateQuizQuestionsFlow::new(Arc::new(model));
        let output = execute(&flow, input("Truths")).await.unwrap();

        assert_eq!(output.questions.len(), 1);
        assert_eq!(output.questions[0].answer, "True");
    }

    #[tokio::test]
    async fn malformed_output_yields_empty_question_list() {
        for raw in ["", "not json", r#"{"questions": null}"#, r#"{"questions": [{"question": 1}]}"#] {
            let mut model = MockModelClient::new();
            let reply = raw.to_string();
            model
                .expect_generate()
                .returning(move |_| Ok(reply.clone()));

            let flow = GenerateQuizQuestionsFlow::new(Arc::new(model));
            let output = execute(&flow, input("content")).await.unwrap();

            assert!(output.questions.is_empty(), "expected no questions for {:?}", raw);
        }
    }

    #[tokio::test]
    async fn rejects_non_positive_question_count() {
        let model = MockModelClient::new();
        let flow = GenerateQuizQuestionsFlow::new(Arc::new(model));

        let result = execute(
            &flow,
            GenerateQuizQuestionsInput {
                num_questions: Some(0),
                ..input("content")
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
