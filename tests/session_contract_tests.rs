use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use quizify_server::{
    errors::{AppError, AppResult},
    models::{domain::QuizSession, dto::request::SetContentRequest},
    repositories::{InMemorySessionRepository, SessionRepository, SharedSession},
    services::{
        flow_service::FlowService,
        model_service::{ModelClient, PromptRequest},
        page_fetcher::{FetchedPage, PageFetcher},
        quiz_controller::QuizController,
        session_service::SessionService,
    },
};

/// Keeps a history of every id ever created alongside the live sessions.
struct JournalingSessionRepository {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
    journal: RwLock<Vec<Uuid>>,
}

impl JournalingSessionRepository {
    fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            journal: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SessionRepository for JournalingSessionRepository {
    async fn create(&self, session: QuizSession) -> AppResult<SharedSession> {
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        self.journal.write().await.push(id);
        Ok(shared)
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<SharedSession>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.sessions.read().await.len())
    }
}

struct UnusedModel;

#[async_trait]
impl ModelClient for UnusedModel {
    async fn generate(&self, request: PromptRequest) -> AppResult<String> {
        Err(AppError::ModelError(format!(
            "unexpected prompt {}",
            request.name
        )))
    }
}

struct UnusedFetcher;

#[async_trait]
impl PageFetcher for UnusedFetcher {
    async fn fetch(&self, url: &str) -> AppResult<FetchedPage> {
        Err(AppError::InternalError(format!("unexpected fetch {}", url)))
    }
}

fn controller() -> QuizController {
    QuizController::new(Arc::new(FlowService::new(
        Arc::new(UnusedModel),
        Arc::new(UnusedFetcher),
    )))
}

async fn exercise_repository_contract(repo: &dyn SessionRepository) {
    assert_eq!(repo.count().await.expect("count should work"), 0);

    let first = QuizSession::new();
    let first_id = first.id;
    let second = QuizSession::new();
    let second_id = second.id;

    repo.create(first).await.expect("create first");
    repo.create(second).await.expect("create second");
    assert_eq!(repo.count().await.expect("count should work"), 2);

    let found = repo
        .find_by_id(&first_id)
        .await
        .expect("find should work")
        .expect("first session should exist");
    found.lock().await.raw_content = "edited".to_string();

    let again = repo
        .find_by_id(&first_id)
        .await
        .expect("find should work")
        .expect("first session should exist");
    assert_eq!(again.lock().await.raw_content, "edited");

    let missing = repo
        .find_by_id(&Uuid::new_v4())
        .await
        .expect("find should work");
    assert!(missing.is_none());

    assert!(repo.delete(&second_id).await.expect("delete should work"));
    assert!(!repo.delete(&second_id).await.expect("delete should work"));
    assert_eq!(repo.count().await.expect("count should work"), 1);
}

#[tokio::test]
async fn in_memory_repository_honours_contract() {
    exercise_repository_contract(&InMemorySessionRepository::new()).await;
}

#[tokio::test]
async fn journaling_repository_honours_contract() {
    let repo = JournalingSessionRepository::new();
    exercise_repository_contract(&repo).await;
    assert_eq!(repo.journal.read().await.len(), 2);
}

#[tokio::test]
async fn session_service_runs_on_any_repository() {
    let repo = Arc::new(JournalingSessionRepository::new());
    let service = SessionService::new(repo.clone(), controller());

    let id = service
        .create_session()
        .await
        .expect("create should work")
        .session
        .id;
    let response = service
        .set_content(
            &id,
            SetContentRequest {
                content: "Photosynthesis converts light into chemical energy.".to_string(),
            },
        )
        .await
        .expect("set content should work");

    assert_eq!(
        response.session.raw_content,
        "Photosynthesis converts light into chemical energy."
    );
    assert_eq!(repo.journal.read().await.as_slice(), &[id]);

    service.delete_session(&id).await.expect("delete should work");
    let gone = service.get_session(&id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn failed_summarize_leaves_session_usable() {
    let service = SessionService::new(Arc::new(InMemorySessionRepository::new()), controller());
    let id = service
        .create_session()
        .await
        .expect("create should work")
        .session
        .id;
    service
        .set_content(
            &id,
            SetContentRequest {
                content: "Some text".to_string(),
            },
        )
        .await
        .expect("set content should work");

    let response = service.summarize(&id).await.expect("summarize responds");
    let notice = response.notice.expect("a notice is always returned");

    assert!(notice.is_destructive());
    assert!(response.session.summary.is_empty());

    let again = service.get_session(&id).await.expect("session still usable");
    assert_eq!(again.session.raw_content, "Some text");
}
