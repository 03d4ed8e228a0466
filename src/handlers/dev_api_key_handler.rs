use std::sync::Arc;

use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::parse_dev_api_key_body, response::MessageResponse},
};

/// Overrides the model API key for the running process. Development only.
#[post("/api/set-dev-api-key")]
pub async fn set_dev_api_key(
    state: web::Data<Arc<AppState>>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    if !state.api_keys.environment().is_development() {
        return Err(AppError::Forbidden(
            "This endpoint is only available in development mode.".to_string(),
        ));
    }

    let api_key = parse_dev_api_key_body(&body)?;
    let message = match api_key.as_deref() {
        Some(key) if !key.is_empty() => "API key set for current development session.",
        _ => "API key cleared for current development session.",
    };

    state.api_keys.set_developer_api_key(api_key).await;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: message.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::test_utils::test_state::{app_state, app_state_with_config};
    use actix_web::{http::StatusCode, test, App};
    use secrecy::ExposeSecret;

    async fn post_body(
        state: Arc<AppState>,
        body: &'static str,
    ) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(set_dev_api_key),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/set-dev-api-key")
            .insert_header(("content-type", "application/json"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_sets_and_clears_key_in_development() {
        let state = Arc::new(app_state());

        let (status, body) = post_body(state.clone(), r#"{"apiKey":"dev-key"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "API key set for current development session."
        );
        assert_eq!(
            state.api_keys.resolve().await.unwrap().expose_secret(),
            "dev-key"
        );

        let (status, body) = post_body(state.clone(), r#"{"apiKey":null}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "API key cleared for current development session."
        );
        assert_eq!(
            state.api_keys.resolve().await.unwrap().expose_secret(),
            "env-test-key"
        );
    }

    #[actix_web::test]
    async fn test_empty_key_reads_as_cleared() {
        let (status, body) = post_body(Arc::new(app_state()), r#"{"apiKey":""}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "API key cleared for current development session."
        );
    }

    #[actix_web::test]
    async fn test_rejects_outside_development() {
        let config = Config {
            environment: Environment::Production,
            ..Config::test_config()
        };
        let (status, body) = post_body(
            Arc::new(app_state_with_config(config)),
            r#"{"apiKey":"dev-key"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["error"],
            "This endpoint is only available in development mode."
        );
    }

    #[actix_web::test]
    async fn test_rejects_wrong_type() {
        let (status, body) = post_body(Arc::new(app_state()), r#"{"apiKey":7}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Invalid API key provided. Must be a string or null."
        );
    }

    #[actix_web::test]
    async fn test_unreadable_body_is_server_error() {
        let (status, body) = post_body(Arc::new(app_state()), "{apiKey").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to set API key.");
        assert!(body["details"].is_string());
    }
}
