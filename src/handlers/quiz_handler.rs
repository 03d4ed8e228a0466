use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    errors::AppError,
    models::dto::request::{GradeQuizRequest, PrintQuizRequest},
    services::{
        print_service::{render_printable, PrintableQuiz},
        quiz_attempt_service::QuizAttemptService,
    },
};

#[post("/api/quiz/grade")]
pub async fn grade_quiz(request: web::Json<GradeQuizRequest>) -> Result<HttpResponse, AppError> {
    request.validate()?;
    if request.questions.is_empty() {
        return Err(AppError::ValidationError(
            "There are no questions to grade".to_string(),
        ));
    }

    let result = QuizAttemptService::grade(&request.questions, &request.answers);
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/quiz/print")]
pub async fn print_quiz(request: web::Json<PrintQuizRequest>) -> Result<HttpResponse, AppError> {
    request.validate()?;
    if request.questions.is_empty() {
        return Err(AppError::ValidationError(
            "There are no questions to print".to_string(),
        ));
    }

    let text = render_printable(&PrintableQuiz {
        subject: request.subject.as_deref(),
        questions: &request.questions,
        answers: &request.answers,
        submitted: request.submitted,
    });

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn quiz_body() -> serde_json::Value {
        json!({
            "questions": [
                {"question": "What is 2+2?", "options": ["3", "4", "5", "6"], "answer": "4"},
                {"question": "What is the capital of France?", "options": ["Paris", "London", "Rome", "Berlin"], "answer": "Paris"}
            ],
            "answers": {"0": "4", "1": "Rome"}
        })
    }

    #[actix_web::test]
    async fn test_grade_quiz() {
        let app = test::init_service(App::new().service(grade_quiz)).await;

        let req = test::TestRequest::post()
            .uri("/api/quiz/grade")
            .set_json(quiz_body())
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["score"], 1);
        assert_eq!(body["total"], 2);
        assert_eq!(body["feedback"], "Good effort, keep practicing!");
        assert_eq!(body["results"][1]["isCorrect"], false);
        assert_eq!(body["results"][1]["correctAnswer"], "Paris");
    }

    #[actix_web::test]
    async fn test_grade_without_questions_is_rejected() {
        let app = test::init_service(App::new().service(grade_quiz)).await;

        let req = test::TestRequest::post()
            .uri("/api/quiz/grade")
            .set_json(json!({"questions": [], "answers": {}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_print_quiz_after_submission() {
        let app = test::init_service(App::new().service(print_quiz)).await;

        let mut body = quiz_body();
        body["subject"] = json!("Trivia");
        body["submitted"] = json!(true);

        let req = test::TestRequest::post()
            .uri("/api/quiz/print")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(text.starts_with("Quiz - Trivia"));
        assert!(text.contains("Your Score: 1 / 2"));
        assert!(text.contains("[✗]"));
    }

    #[actix_web::test]
    async fn test_print_without_questions_is_rejected() {
        let app = test::init_service(App::new().service(print_quiz)).await;

        let req = test::TestRequest::post()
            .uri("/api/quiz/print")
            .set_json(json!({"questions": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
