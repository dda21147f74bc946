use super::ConversationEntry;

/// Append-only record of the questions answered within one session.
///
/// Entries are never edited or removed; their position is their submission order.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, question: String, answer: String) -> &ConversationEntry {
        let index = self.entries.len();
        self.entries.push(ConversationEntry::new(question, answer));
        &self.entries[index]
    }

    pub fn all(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
