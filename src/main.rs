use std::{sync::Arc, time::Duration};

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use quizify_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

fn cors(config: &Config) -> Cors {
    match &config.cors_allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![header::HeaderName::from_static(
                quizify_server::middleware::REQUEST_ID_HEADER,
            )])
            .max_age(3600),
        None if config.environment.is_development() => Cors::permissive(),
        None => Cors::default(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    config.warn_on_missing_credentials();

    let state = AppState::new(config.clone())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let state = web::Data::new(Arc::new(state));

    log::info!(
        "Starting quizify server ({}) on {}:{}",
        config.environment,
        config.web_server_host,
        config.web_server_port
    );
    log::info!(
        "Sessions expire after {} idle minutes",
        config.session_idle_timeout_minutes
    );
    log::info!(
        "Model: {} via {}",
        config.llm_model,
        config.llm_api_base_url
    );

    let pruned_state = state.clone();
    actix_web::rt::spawn(async move {
        let mut ticker = actix_web::rt::time::interval(Duration::from_secs(60));
        loop {
            ticker.tick().await;
            if let Err(e) = pruned_state.session_service.prune_expired().await {
                log::warn!("Failed to prune idle quiz sessions: {}", e);
            }
        }
    });

    let cors_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(cors(&cors_config))
            .configure(handlers::configure)
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
