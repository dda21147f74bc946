use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEntry {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

impl ConversationEntry {
    pub fn new(question: String, answer: String) -> Self {
        Self {
            question,
            answer,
            asked_at: Utc::now(),
        }
    }
}
