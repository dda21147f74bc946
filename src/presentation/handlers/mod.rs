mod error;
mod health;
mod questions;
mod sessions;

pub use error::ErrorResponse;
pub use health::health_handler;
pub use questions::ask_question_handler;
pub use sessions::{create_session_handler, delete_session_handler, history_handler};
