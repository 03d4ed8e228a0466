use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::InMemorySessionRepository,
    services::{
        api_key_holder::ApiKeyHolder,
        flow_service::FlowService,
        model_service::{ModelClient, OpenAiModelClient},
        page_fetcher::{HttpPageFetcher, PageFetcher},
        quiz_controller::QuizController,
        session_service::SessionService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub api_keys: Arc<ApiKeyHolder>,
    pub flow_service: Arc<FlowService>,
    pub session_service: Arc<SessionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let api_keys = Arc::new(ApiKeyHolder::new(
            config.environment,
            config.google_api_key.clone(),
        ));
        let model: Arc<dyn ModelClient> = Arc::new(OpenAiModelClient::new(&config, api_keys.clone()));
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpPageFetcher::new(&config)?);

        Ok(Self::with_clients(config, api_keys, model, fetcher))
    }

    /// Builds the state around caller-supplied model and fetch clients.
    pub fn with_clients(
        config: Config,
        api_keys: Arc<ApiKeyHolder>,
        model: Arc<dyn ModelClient>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        let flow_service = Arc::new(FlowService::new(model, fetcher));
        let session_service = Arc::new(SessionService::new(
            Arc::new(InMemorySessionRepository::with_idle_timeout(
                chrono::Duration::minutes(i64::from(config.session_idle_timeout_minutes)),
            )),
            QuizController::new(flow_service.clone()),
        ));

        Self {
            api_keys,
            flow_service,
            session_service,
            config: Arc::new(config),
        }
    }
}
