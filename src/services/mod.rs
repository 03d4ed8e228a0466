pub mod api_key_holder;
pub mod flow_service;
pub mod flows;
pub mod model_service;
pub mod page_fetcher;
pub mod print_service;
pub mod quiz_attempt_service;
pub mod quiz_controller;
pub mod session_service;
pub mod structured_output;
