use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Notice, QuizSession},
        dto::{
            request::{
                AnswerQuestionRequest, LoadPdfRequest, LoadTextFileRequest, LoadUrlRequest,
                SetContentRequest, UpdateQuizSettingsRequest,
            },
            response::SessionResponse,
        },
    },
    repositories::SessionRepository,
    services::quiz_controller::QuizController,
};

/// Hosts quiz sessions and serializes the operations on each one.
///
/// A session is locked for the whole of one operation, including any model
/// round trip. A second operation arriving meanwhile gets `Conflict`.
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    controller: QuizController,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository>, controller: QuizController) -> Self {
        Self {
            repository,
            controller,
        }
    }

    async fn acquire(&self, id: &Uuid) -> AppResult<OwnedMutexGuard<QuizSession>> {
        let shared = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz session with id '{}' not found", id)))?;

        shared.try_lock_owned().map_err(|_| {
            AppError::Conflict(format!(
                "Quiz session '{}' is busy with another operation",
                id
            ))
        })
    }

    fn respond(session: &mut QuizSession, notice: Option<Notice>) -> SessionResponse {
        session.touch();
        SessionResponse::new(session, notice)
    }

    pub async fn create_session(&self) -> AppResult<SessionResponse> {
        let shared = self.repository.create(QuizSession::new()).await?;
        let session = shared.lock().await;
        log::info!("Started quiz session {}", session.id);
        Ok(SessionResponse::new(&session, None))
    }

    pub async fn get_session(&self, id: &Uuid) -> AppResult<SessionResponse> {
        let session = self.acquire(id).await?;
        Ok(SessionResponse::new(&session, None))
    }

    pub async fn prune_expired(&self) -> AppResult<usize> {
        self.repository.prune_expired().await
    }

    pub async fn delete_session(&self, id: &Uuid) -> AppResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Quiz session with id '{}' not found",
                id
            )))
        }
    }

    pub async fn set_content(
        &self,
        id: &Uuid,
        request: SetContentRequest,
    ) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        self.controller.set_content(&mut session, request.content);
        Ok(Self::respond(&mut session, None))
    }

    pub async fn load_text_file(
        &self,
        id: &Uuid,
        request: LoadTextFileRequest,
    ) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        if let Some(file_name) = &request.file_name {
            log::info!("Loading text file {} into session {}", file_name, id);
        }
        let notice = self
            .controller
            .load_text_file(&mut session, &request.mime_type, request.text);
        Ok(Self::respond(&mut session, Some(notice)))
    }

    pub async fn load_pdf(&self, id: &Uuid, request: LoadPdfRequest) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        let notice = self
            .controller
            .load_pdf(&mut session, request.pdf_data_uri)
            .await;
        Ok(Self::respond(&mut session, Some(notice)))
    }

    pub async fn load_url(&self, id: &Uuid, request: LoadUrlRequest) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        let notice = self.controller.load_url(&mut session, request.url).await;
        Ok(Self::respond(&mut session, Some(notice)))
    }

    pub async fn summarize(&self, id: &Uuid) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        let notice = self.controller.summarize(&mut session).await;
        Ok(Self::respond(&mut session, Some(notice)))
    }

    pub async fn update_settings(
        &self,
        id: &Uuid,
        request: UpdateQuizSettingsRequest,
    ) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        self.controller.update_settings(&mut session, request)?;
        Ok(Self::respond(&mut session, None))
    }

    pub async fn generate_quiz(&self, id: &Uuid) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        let notice = self.controller.generate_quiz(&mut session).await;
        Ok(Self::respond(&mut session, Some(notice)))
    }

    pub async fn answer(
        &self,
        id: &Uuid,
        index: usize,
        request: AnswerQuestionRequest,
    ) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        self.controller.answer(&mut session, index, request.answer)?;
        Ok(Self::respond(&mut session, None))
    }

    pub async fn submit(&self, id: &Uuid) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        let notice = self.controller.submit(&mut session)?;
        Ok(Self::respond(&mut session, Some(notice)))
    }

    pub async fn start_over(&self, id: &Uuid) -> AppResult<SessionResponse> {
        let mut session = self.acquire(id).await?;
        self.controller.start_over(&mut session);
        Ok(Self::respond(&mut session, None))
    }

    pub async fn printable(&self, id: &Uuid) -> AppResult<String> {
        let session = self.acquire(id).await?;
        self.controller.printable(&session)
    }
}
