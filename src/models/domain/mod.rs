pub mod notice;
pub mod quiz_question;
pub mod quiz_session;
pub mod quiz_settings;
pub use notice::{Notice, NoticeVariant};
pub use quiz_question::{Difficulty, QuestionFormat, QuizQuestion};
pub use quiz_session::{ContentTab, QuizSession};
pub use quiz_settings::QuizSettings;
