//! Document Chat - View Model

use contracts::domain::a002_document_chat::aggregate::ChatRole;
use leptos::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryBody {
    /// Inserted as text (user questions)
    Text(String),
    /// Inserted as markup (rendered assistant replies)
    Html(String),
}

/// One message of the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub id: Uuid,
    pub role: ChatRole,
    pub body: EntryBody,
}

impl TranscriptEntry {
    pub fn user(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            body: EntryBody::Text(text),
        }
    }

    pub fn assistant(html: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::Assistant,
            body: EntryBody::Html(html),
        }
    }

    pub fn dom_id(&self) -> String {
        entry_dom_id(self.id)
    }
}

pub fn entry_dom_id(id: Uuid) -> String {
    format!("chat-entry-{}", id)
}

#[derive(Clone, Copy)]
pub struct DocumentChatVm {
    pub question: RwSignal<String>,
    pub transcript: RwSignal<Vec<TranscriptEntry>>,
    /// Entry to bring into view once rendered
    pub scroll_target: RwSignal<Option<Uuid>>,
}

impl DocumentChatVm {
    pub fn new() -> Self {
        Self {
            question: RwSignal::new(String::new()),
            transcript: RwSignal::new(Vec::new()),
            scroll_target: RwSignal::new(None),
        }
    }

    /// Append to the transcript (never reorders or removes)
    pub fn push(&self, entry: TranscriptEntry) {
        self.transcript.update(|entries| entries.push(entry));
    }
}

impl Default for DocumentChatVm {
    fn default() -> Self {
        Self::new()
    }
}
