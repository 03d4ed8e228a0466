#[cfg(test)]
pub mod fixtures {
    use std::collections::BTreeMap;

    use crate::models::domain::QuizQuestion;

    /// Model reply matching `mcq_questions()`.
    pub const QUIZ_JSON: &str = r#"{"questions":[{"question":"What is 2+2?","options":["3","4","5","6"],"answer":"4"},{"question":"What is the capital of France?","options":["Paris","London","Rome","Berlin"],"answer":"Paris"}]}"#;

    pub fn question(text: &str, options: &[&str], answer: &str) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    pub fn mcq_questions() -> Vec<QuizQuestion> {
        vec![
            question("What is 2+2?", &["3", "4", "5", "6"], "4"),
            question(
                "What is the capital of France?",
                &["Paris", "London", "Rome", "Berlin"],
                "Paris",
            ),
        ]
    }

    /// Answers keyed by position, as submitted from the quiz form.
    pub fn answers(selected: &[&str]) -> BTreeMap<usize, String> {
        selected
            .iter()
            .enumerate()
            .map(|(index, answer)| (index, answer.to_string()))
            .collect()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
pub mod test_state {
    use std::sync::Arc;

    use crate::{
        app_state::AppState,
        config::Config,
        services::{
            api_key_holder::ApiKeyHolder, model_service::MockModelClient,
            page_fetcher::MockPageFetcher,
        },
    };

    /// Development state with the test key and mocks that expect no calls.
    pub fn app_state() -> AppState {
        app_state_with_config(Config::test_config())
    }

    pub fn app_state_with_config(config: Config) -> AppState {
        app_state_with(config, MockModelClient::new(), MockPageFetcher::new())
    }

    pub fn app_state_with(
        config: Config,
        model: MockModelClient,
        fetcher: MockPageFetcher,
    ) -> AppState {
        let api_keys = Arc::new(ApiKeyHolder::new(
            config.environment,
            config.google_api_key.clone(),
        ));
        AppState::with_clients(config, api_keys, Arc::new(model), Arc::new(fetcher))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::dto::response::GenerateQuizQuestionsOutput;

    #[test]
    fn test_quiz_json_matches_fixture_questions() {
        let output: GenerateQuizQuestionsOutput = serde_json::from_str(QUIZ_JSON).unwrap();
        assert_eq!(output.questions, mcq_questions());
    }

    #[test]
    fn test_answers_are_keyed_by_position() {
        let selected = answers(&["a", "b"]);
        assert_eq!(selected.get(&0).map(String::as_str), Some("a"));
        assert_eq!(selected.get(&1).map(String::as_str), Some("b"));
    }
}
