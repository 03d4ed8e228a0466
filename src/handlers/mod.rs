pub mod dev_api_key_handler;
pub mod flow_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod session_handler;

use actix_web::web;

use crate::errors::AppError;

pub use dev_api_key_handler::set_dev_api_key;
pub use flow_handler::{
    extract_content_from_url, extract_text_from_pdf, generate_quiz_questions, summarize_content,
};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{grade_quiz, print_quiz};
pub use session_handler::{
    answer_question, create_session, delete_session, generate_quiz, get_session, load_pdf,
    load_text_file, load_url, print_session, set_content, start_over, submit_quiz, summarize,
    update_settings,
};

/// PDF uploads arrive base64-encoded inside JSON bodies.
pub const JSON_PAYLOAD_LIMIT: usize = 20 * 1024 * 1024;

/// Body parsing failures are reported through `AppError` like every other 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_check)
        .service(health_check_ready)
        .service(health_check_live)
        .service(set_dev_api_key)
        .service(summarize_content)
        .service(generate_quiz_questions)
        .service(extract_text_from_pdf)
        .service(extract_content_from_url)
        .service(grade_quiz)
        .service(print_quiz)
        .service(create_session)
        .service(get_session)
        .service(delete_session)
        .service(set_content)
        .service(load_text_file)
        .service(load_pdf)
        .service(load_url)
        .service(summarize)
        .service(update_settings)
        .service(generate_quiz)
        .service(answer_question)
        .service(submit_quiz)
        .service(start_over)
        .service(print_session);
}
