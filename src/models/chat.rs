use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in a conversation. `timestamp` is absent on messages the
/// backend never stamped; the store assigns one to messages it creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Local identity tag for optimistically-appended messages, so a
    /// failed send removes exactly the entry it added. Never on the wire.
    #[serde(skip)]
    pub local_id: Option<Uuid>,
}

impl Message {
    pub fn from_wire(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: None,
            local_id: None,
        }
    }
}

/// Chat list entry as the backend sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One conversation held in the session. Messages are insertion-ordered
/// and never re-sorted; `is_messages_cached` gates the once-per-session
/// fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub name: String,
    pub messages: Vec<Message>,
    pub is_messages_cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Chat {
    /// Messages a renderer should show. Blank content stays in storage
    /// but is skipped for display.
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.content.trim().is_empty())
    }
}

impl From<ChatSummary> for Chat {
    fn from(summary: ChatSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            messages: Vec::new(),
            is_messages_cached: false,
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}
