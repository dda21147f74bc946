mod conversation_entry;
mod conversation_log;
mod document;
mod generation;
mod session_id;

pub use conversation_entry::ConversationEntry;
pub use conversation_log::ConversationLog;
pub use document::{ContentType, DocumentId, UploadedDocument};
pub use generation::{
    ANSWER_STOP_SEQUENCE, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationParams,
    GenerationRequest,
};
pub use session_id::SessionId;
