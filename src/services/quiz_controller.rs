use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{ContentTab, Notice, QuizSession},
        dto::request::{
            ExtractContentFromUrlInput, ExtractTextFromPdfInput, GenerateQuizQuestionsInput,
            SummarizeContentInput, UpdateQuizSettingsRequest,
        },
    },
    services::{
        flow_service::FlowService,
        print_service::{render_printable, PrintableQuiz},
        quiz_attempt_service::QuizAttemptService,
    },
};

/// Drives one session through load → summarize → generate → answer → submit.
///
/// Flow failures never escape: they are turned into destructive notices.
/// Only caller mistakes (bad answer index, answering after submission,
/// submitting early) are returned as errors.
pub struct QuizController {
    flows: Arc<FlowService>,
}

impl QuizController {
    pub fn new(flows: Arc<FlowService>) -> Self {
        Self { flows }
    }

    pub fn set_content(&self, session: &mut QuizSession, content: String) {
        session.active_tab = ContentTab::Paste;
        session.raw_content = content;
    }

    pub fn load_text_file(&self, session: &mut QuizSession, mime_type: &str, text: String) -> Notice {
        if !mime_type.eq_ignore_ascii_case("text/plain") {
            return Notice::destructive("Invalid file type", "Please upload a .txt file.");
        }

        session.reset_quiz_state();
        session.raw_content = text;
        session.active_tab = ContentTab::Paste;
        Notice::info(
            "TXT file loaded successfully!",
            "Content loaded into the text area.",
        )
    }

    pub async fn load_pdf(&self, session: &mut QuizSession, pdf_data_uri: String) -> Notice {
        if !pdf_data_uri.starts_with("data:application/pdf") {
            return Notice::destructive("Invalid file type", "Please upload a .pdf file.");
        }

        session.active_tab = ContentTab::Pdf;
        session.raw_content.clear();
        session.reset_quiz_state();

        match self
            .flows
            .extract_text_from_pdf(ExtractTextFromPdfInput { pdf_data_uri })
            .await
        {
            Ok(output) if !output.extracted_text.is_empty() && !output.is_error() => {
                session.raw_content = output.extracted_text;
                session.active_tab = ContentTab::Paste;
                Notice::info(
                    "PDF content extracted successfully!",
                    "Content loaded into the text area.",
                )
            }
            Ok(output) => {
                let description = if output.extracted_text.is_empty() {
                    "Could not extract text from the PDF, or the PDF is empty/unreadable by AI."
                        .to_string()
                } else {
                    output.extracted_text
                };
                Notice::destructive("PDF Processing Failed", description)
            }
            Err(e) => {
                log::error!("Error extracting text from PDF: {}", e);
                Notice::destructive(
                    "PDF Processing Failed",
                    "An error occurred during AI processing of the PDF.",
                )
            }
        }
    }

    pub async fn load_url(&self, session: &mut QuizSession, url: String) -> Notice {
        session.url_input = url.clone();
        let url = url.trim().to_string();

        if url.is_empty() {
            return Notice::destructive(
                "URL is empty",
                "Please provide a URL to fetch content from.",
            );
        }

        let input = ExtractContentFromUrlInput { url };
        if input.validate().is_err() {
            return Notice::destructive(
                "Invalid URL",
                "Please enter a valid URL (e.g., https://example.com).",
            );
        }

        session.active_tab = ContentTab::Url;
        session.raw_content.clear();
        session.reset_quiz_state();

        match self.flows.extract_content_from_url(input).await {
            Ok(output) if !output.extracted_text.is_empty() && !output.is_error() => {
                session.raw_content = output.extracted_text;
                session.active_tab = ContentTab::Paste;
                Notice::info(
                    "URL content fetched successfully!",
                    "Content loaded into the text area.",
                )
            }
            Ok(output) => {
                let description = if output.extracted_text.is_empty() {
                    "Could not extract text from the URL.".to_string()
                } else {
                    output.extracted_text
                };
                Notice::destructive("URL Fetching Failed", description)
            }
            Err(e) => {
                log::error!("Error fetching content from URL: {}", e);
                Notice::destructive("URL Fetching Error", e.to_string())
            }
        }
    }

    pub async fn summarize(&self, session: &mut QuizSession) -> Notice {
        if session.raw_content.trim().is_empty() {
            return Notice::destructive(
                "Content is empty",
                "Please provide some content to summarize.",
            );
        }

        session.summary.clear();
        session.clear_quiz();

        let input = SummarizeContentInput {
            content: session.raw_content.clone(),
        };
        match self.flows.summarize_content(input).await {
            Ok(output) if !output.summary.is_empty() && !output.summary.starts_with("Error:") => {
                session.summary = output.summary;
                Notice::success("Content summarized successfully!")
            }
            Ok(output) => {
                let description = if output.summary.is_empty() {
                    "The AI could not summarize the content.".to_string()
                } else {
                    output.summary
                };
                Notice::destructive("Summarization Failed", description)
            }
            Err(e) => {
                log::error!("Error summarizing content: {}", e);
                Notice::destructive(
                    "Summarization failed",
                    "Could not summarize the content. Please try again.",
                )
            }
        }
    }

    pub fn update_settings(
        &self,
        session: &mut QuizSession,
        patch: UpdateQuizSettingsRequest,
    ) -> AppResult<()> {
        patch.validate()?;

        let settings = &mut session.settings;
        if let Some(subject) = patch.subject {
            settings.subject = subject;
        }
        if let Some(difficulty) = patch.difficulty {
            settings.difficulty = difficulty;
        }
        if let Some(num_questions) = patch.num_questions {
            settings.num_questions = num_questions;
        }
        if let Some(question_format) = patch.question_format {
            settings.question_format = question_format;
        }
        Ok(())
    }

    pub async fn generate_quiz(&self, session: &mut QuizSession) -> Notice {
        if session.summary.trim().is_empty() {
            return Notice::destructive(
                "Summary is empty",
                "Please summarize content first to generate a quiz.",
            );
        }

        session.clear_quiz();

        let input = GenerateQuizQuestionsInput {
            content: session.summary.clone(),
            subject: session.settings.subject_focus(),
            difficulty: Some(session.settings.difficulty),
            num_questions: session.settings.target_questions(),
            question_format: Some(session.settings.question_format),
        };

        match self.flows.generate_quiz_questions(input).await {
            Ok(output) if !output.questions.is_empty() => {
                session.questions = output.questions;
                Notice::success("Quiz generated successfully!")
            }
            Ok(_) => Notice::info(
                "Quiz Generation Failed",
                "No questions were generated. The summary might be too short, or the AI could not fulfill the request with the current settings.",
            ),
            Err(e) => {
                log::error!("Error generating quiz: {}", e);
                Notice::destructive(
                    "Quiz generation failed",
                    "Could not generate the quiz. Please try again.",
                )
            }
        }
    }

    pub fn answer(&self, session: &mut QuizSession, index: usize, answer: String) -> AppResult<()> {
        if session.submitted {
            return Err(AppError::ValidationError(
                "Quiz has already been submitted".to_string(),
            ));
        }
        if index >= session.questions.len() {
            return Err(AppError::ValidationError(format!(
                "Question index {} is out of range (quiz has {} questions)",
                index,
                session.questions.len()
            )));
        }
        if !session.questions[index].options.contains(&answer) {
            return Err(AppError::ValidationError(format!(
                "'{}' is not one of the options for question {}",
                answer, index
            )));
        }

        session.user_answers.insert(index, answer);
        Ok(())
    }

    pub fn submit(&self, session: &mut QuizSession) -> AppResult<Notice> {
        if session.submitted {
            return Err(AppError::ValidationError(
                "Quiz has already been submitted".to_string(),
            ));
        }
        if !session.all_questions_answered() {
            return Err(AppError::ValidationError(
                "All questions must be answered before submitting".to_string(),
            ));
        }

        let score = QuizAttemptService::score(&session.questions, &session.user_answers);
        session.score = score;
        session.submitted = true;

        Ok(Notice::info(
            "Quiz Submitted!",
            format!("You scored {} out of {}.", score, session.questions.len()),
        ))
    }

    pub fn start_over(&self, session: &mut QuizSession) {
        session.start_over();
    }

    pub fn printable(&self, session: &QuizSession) -> AppResult<String> {
        if session.questions.is_empty() {
            return Err(AppError::NotFound(
                "No quiz has been generated for this session".to_string(),
            ));
        }

        Ok(render_printable(&PrintableQuiz {
            subject: Some(session.settings.subject.as_str()),
            questions: &session.questions,
            answers: &session.user_answers,
            submitted: session.submitted,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{NoticeVariant, QuestionFormat};
    use crate::services::{
        model_service::MockModelClient,
        page_fetcher::{FetchedPage, MockPageFetcher},
    };
    use crate::test_utils::fixtures::{mcq_questions, QUIZ_JSON};

    fn controller(model: MockModelClient, fetcher: MockPageFetcher) -> QuizController {
        QuizController::new(Arc::new(FlowService::new(
            Arc::new(model),
            Arc::new(fetcher),
        )))
    }

    fn idle_controller() -> QuizController {
        let mut model = MockModelClient::new();
        model.expect_generate().never();
        let mut fetcher = MockPageFetcher::new();
        fetcher.expect_fetch().never();
        controller(model, fetcher)
    }

    fn quiz_session() -> QuizSession {
        let mut session = QuizSession::new();
        session.raw_content = "content".to_string();
        session.summary = "summary".to_string();
        session.questions = mcq_questions();
        session
    }

    #[test]
    fn load_text_file_rejects_other_types() {
        let controller = idle_controller();
        let mut session = quiz_session();

        let notice = controller.load_text_file(&mut session, "application/pdf", "x".to_string());

        assert_eq!(notice.title, "Invalid file type");
        assert!(notice.is_destructive());
        assert_eq!(session.raw_content, "content");
        assert_eq!(session.questions.len(), 2);
    }

    #[test]
    fn load_text_file_replaces_content_and_resets_quiz() {
        let controller = idle_controller();
        let mut session = quiz_session();
        session.active_tab = ContentTab::Txt;

        let notice = controller.load_text_file(&mut session, "text/plain", "new text".to_string());

        assert_eq!(notice.title, "TXT file loaded successfully!");
        assert_eq!(session.raw_content, "new text");
        assert_eq!(session.active_tab, ContentTab::Paste);
        assert!(session.summary.is_empty());
        assert!(session.questions.is_empty());
    }

    #[tokio::test]
    async fn summarize_requires_content() {
        let controller = idle_controller();
        let mut session = QuizSession::new();
        session.raw_content = "   ".to_string();

        let notice = controller.summarize(&mut session).await;

        assert_eq!(notice.title, "Content is empty");
        assert!(notice.is_destructive());
    }

    #[tokio::test]
    async fn summarize_stores_summary_and_clears_quiz() {
        let mut model = MockModelClient::new();
        model
            .expect_generate()
            .returning(|_| Ok(r#"{"summary":"short"}"#.to_string()));
        let controller = controller(model, MockPageFetcher::new());
        let mut session = quiz_session();
        session.user_answers.insert(0, "4".to_string());

        let notice = controller.summarize(&mut session).await;

        assert_eq!(notice.title, "Content summarized successfully!");
        assert_eq!(session.summary, "short");
        assert!(session.questions.is_empty());
        assert!(session.user_answers.is_empty());
    }

    #[tokio::test]
    async fn summarize_failures_become_notices() {
        let mut model = MockModelClient::new();
        model
            .expect_generate()
            .returning(|_| Err(AppError::MissingApiKey));
        let controller = controller(model, MockPageFetcher::new());
        let mut session = quiz_session();

        let notice = controller.summarize(&mut session).await;

        assert_eq!(notice.title, "Summarization failed");
        assert!(notice.is_destructive());
        assert!(session.summary.is_empty());
    }

    #[tokio::test]
    async fn summarize_error_text_is_not_stored() {
        let mut model = MockModelClient::new();
        model
            .expect_generate()
            .returning(|_| Ok("garbage".to_string()));
        let controller = controller(model, MockPageFetcher::new());
        let mut session = quiz_session();

        let notice = controller.summarize(&mut session).await;

        assert_eq!(notice.title, "Summarization Failed");
        assert_eq!(
            notice.description.as_deref(),
            Some("Error: AI could not summarize the content.")
        );
        assert!(session.summary.is_empty());
    }

    #[tokio::test]
    async fn generate_quiz_requires_summary() {
        let controller = idle_controller();
        let mut session = QuizSession::new();

        let notice = controller.generate_quiz(&mut session).await;

        assert_eq!(notice.title, "Summary is empty");
    }

    #[tokio::test]
    async fn generate_quiz_uses_settings() {
        let mut model = MockModelClient::new();
        model
            .expect_generate()
            .withf(|req| {
                req.text.contains("Content:\nsummary")
                    && req.text.contains("Subject Focus: Geography")
                    && req.text.contains("Target Number of Questions: 2")
                    && req.text.contains("Preferred Question Format: mcq")
            })
            .returning(|_| Ok(QUIZ_JSON.to_string()));
        let controller = controller(model, MockPageFetcher::new());
        let mut session = quiz_session();
        session.questions.clear();
        controller
            .update_settings(
                &mut session,
                UpdateQuizSettingsRequest {
                    subject: Some("Geography".to_string()),
                    num_questions: Some(2),
                    question_format: Some(QuestionFormat::Mcq),
                    ..Default::default()
                },
            )
            .unwrap();

        let notice = controller.generate_quiz(&mut session).await;

        assert_eq!(notice.title, "Quiz generated successfully!");
        assert_eq!(session.questions, mcq_questions());
    }

    #[tokio::test]
    async fn empty_generation_is_a_default_notice() {
        let mut model = MockModelClient::new();
        model
            .expect_generate()
            .returning(|_| Ok(r#"{"questions":[]}"#.to_string()));
        let controller = controller(model, MockPageFetcher::new());
        let mut session = quiz_session();

        let notice = controller.generate_quiz(&mut session).await;

        assert_eq!(notice.title, "Quiz Generation Failed");
        assert_eq!(notice.variant, NoticeVariant::Default);
        assert!(session.questions.is_empty());
    }

    #[test]
    fn update_settings_rejects_out_of_range_count() {
        let controller = idle_controller();
        let mut session = QuizSession::new();

        let result = controller.update_settings(
            &mut session,
            UpdateQuizSettingsRequest {
                num_questions: Some(0),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(session.settings.num_questions, 5);
    }

    #[test]
    fn submit_scores_answers() {
        let controller = idle_controller();
        let mut session = quiz_session();
        controller.answer(&mut session, 0, "4".to_string()).unwrap();
        controller.answer(&mut session, 1, "London".to_string()).unwrap();

        let notice = controller.submit(&mut session).unwrap();

        assert_eq!(notice.title, "Quiz Submitted!");
        assert_eq!(notice.description.as_deref(), Some("You scored 1 out of 2."));
        assert!(session.submitted);
        assert_eq!(session.score, 1);
        assert!(controller.answer(&mut session, 1, "Paris".to_string()).is_err());
    }

    #[test]
    fn submit_requires_every_answer() {
        let controller = idle_controller();
        let mut session = quiz_session();
        controller.answer(&mut session, 0, "4".to_string()).unwrap();

        assert!(controller.submit(&mut session).is_err());
        assert!(!session.submitted);
    }

    #[test]
    fn answer_rejects_unknown_index() {
        let controller = idle_controller();
        let mut session = quiz_session();

        assert!(controller.answer(&mut session, 2, "4".to_string()).is_err());
    }

    #[test]
    fn answer_must_be_one_of_the_options() {
        let controller = idle_controller();
        let mut session = quiz_session();

        let result = controller.answer(&mut session, 0, "four".to_string());

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(session.user_answers.is_empty());
        controller.answer(&mut session, 0, "4".to_string()).unwrap();
        assert_eq!(session.user_answers.get(&0).map(String::as_str), Some("4"));
    }

    #[tokio::test]
    async fn load_url_validates_before_fetching() {
        let controller = idle_controller();
        let mut session = quiz_session();

        let notice = controller.load_url(&mut session, "  ".to_string()).await;
        assert_eq!(notice.title, "URL is empty");

        let notice = controller.load_url(&mut session, "example dot com".to_string()).await;
        assert_eq!(notice.title, "Invalid URL");
        assert_eq!(session.raw_content, "content");
    }

    #[tokio::test]
    async fn load_url_reports_fetch_errors() {
        let mut fetcher = MockPageFetcher::new();
        fetcher.expect_fetch().returning(|_| {
            Ok(FetchedPage {
                status: 500,
                body: "boom".to_string(),
            })
        });
        let controller = controller(MockModelClient::new(), fetcher);
        let mut session = quiz_session();

        let notice = controller
            .load_url(&mut session, "https://example.com".to_string())
            .await;

        assert_eq!(notice.title, "URL Fetching Failed");
        assert_eq!(
            notice.description.as_deref(),
            Some("Error: Could not fetch content from URL. Status: 500. boom")
        );
        assert!(session.raw_content.is_empty());
        assert!(session.summary.is_empty());
    }

    #[tokio::test]
    async fn load_url_loads_extracted_text() {
        let mut fetcher = MockPageFetcher::new();
        fetcher.expect_fetch().returning(|_| {
            Ok(FetchedPage {
                status: 200,
                body: "<p>Body</p>".to_string(),
            })
        });
        let mut model = MockModelClient::new();
        model
            .expect_generate()
            .returning(|_| Ok(r#"{"extractedText":"Body"}"#.to_string()));
        let controller = controller(model, fetcher);
        let mut session = QuizSession::new();

        let notice = controller
            .load_url(&mut session, "https://example.com".to_string())
            .await;

        assert_eq!(notice.title, "URL content fetched successfully!");
        assert_eq!(session.raw_content, "Body");
        assert_eq!(session.url_input, "https://example.com");
        assert_eq!(session.active_tab, ContentTab::Paste);
    }

    #[tokio::test]
    async fn load_pdf_rejects_non_pdf_uri() {
        let controller = idle_controller();
        let mut session = quiz_session();

        let notice = controller
            .load_pdf(&mut session, "data:text/plain;base64,aGk=".to_string())
            .await;

        assert_eq!(notice.title, "Invalid file type");
        assert_eq!(session.raw_content, "content");
    }

    #[tokio::test]
    async fn load_pdf_empty_extraction_is_reported() {
        let mut model = MockModelClient::new();
        model
            .expect_generate()
            .returning(|_| Ok(r#"{"extractedText":""}"#.to_string()));
        let controller = controller(model, MockPageFetcher::new());
        let mut session = quiz_session();

        let notice = controller
            .load_pdf(&mut session, "data:application/pdf;base64,JVBERi0=".to_string())
            .await;

        assert_eq!(notice.title, "PDF Processing Failed");
        assert!(session.raw_content.is_empty());
    }

    #[test]
    fn printable_requires_questions() {
        let controller = idle_controller();
        let session = QuizSession::new();

        assert!(matches!(
            controller.printable(&session),
            Err(AppError::NotFound(_))
        ));
        assert!(controller.printable(&quiz_session()).is_ok());
    }
}
