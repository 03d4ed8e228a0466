use std::sync::Arc;

use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{
        ExtractContentFromUrlInput, ExtractTextFromPdfInput, GenerateQuizQuestionsInput,
        SummarizeContentInput,
    },
};

#[post("/api/flows/summarize-content")]
pub async fn summarize_content(
    state: web::Data<Arc<AppState>>,
    input: web::Json<SummarizeContentInput>,
) -> Result<HttpResponse, AppError> {
    let output = state
        .flow_service
        .summarize_content(input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(output))
}

#[post("/api/flows/generate-quiz-questions")]
pub async fn generate_quiz_questions(
    state: web::Data<Arc<AppState>>,
    input: web::Json<GenerateQuizQuestionsInput>,
) -> Result<HttpResponse, AppError> {
    let output = state
        .flow_service
        .generate_quiz_questions(input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(output))
}

#[post("/api/flows/extract-text-from-pdf")]
pub async fn extract_text_from_pdf(
    state: web::Data<Arc<AppState>>,
    input: web::Json<ExtractTextFromPdfInput>,
) -> Result<HttpResponse, AppError> {
    let output = state
        .flow_service
        .extract_text_from_pdf(input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(output))
}

/// Fetch and model failures come back as 200 with an `Error:` text.
#[post("/api/flows/extract-content-from-url")]
pub async fn extract_content_from_url(
    state: web::Data<Arc<AppState>>,
    input: web::Json<ExtractContentFromUrlInput>,
) -> Result<HttpResponse, AppError> {
    let output = state
        .flow_service
        .extract_content_from_url(input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(output))
}
