use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{
        AnswerQuestionRequest, LoadPdfRequest, LoadTextFileRequest, LoadUrlRequest,
        SetContentRequest, UpdateQuizSettingsRequest,
    },
};

#[post("/api/sessions")]
pub async fn create_session(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let response = state.session_service.create_session().await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let response = state.session_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/api/sessions/{id}")]
pub async fn delete_session(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.session_service.delete_session(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/api/sessions/{id}/content")]
pub async fn set_content(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
    request: web::Json<SetContentRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .session_service
        .set_content(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/content/txt")]
pub async fn load_text_file(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
    request: web::Json<LoadTextFileRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let response = state
        .session_service
        .load_text_file(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/content/pdf")]
pub async fn load_pdf(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
    request: web::Json<LoadPdfRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .session_service
        .load_pdf(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/content/url")]
pub async fn load_url(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
    request: web::Json<LoadUrlRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .session_service
        .load_url(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/summarize")]
pub async fn summarize(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let response = state.session_service.summarize(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/api/sessions/{id}/settings")]
pub async fn update_settings(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
    request: web::Json<UpdateQuizSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .session_service
        .update_settings(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/quiz")]
pub async fn generate_quiz(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let response = state.session_service.generate_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/api/sessions/{id}/answers/{index}")]
pub async fn answer_question(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(Uuid, usize)>,
    request: web::Json<AnswerQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let (id, index) = path.into_inner();
    let response = state
        .session_service
        .answer(&id, index, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/submit")]
pub async fn submit_quiz(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let response = state.session_service.submit(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/reset")]
pub async fn start_over(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let response = state.session_service.start_over(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/sessions/{id}/print")]
pub async fn print_session(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let text = state.session_service.printable(&id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(text))
}
