use std::cell::{Cell, Ref, RefCell};

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ClientError;
use crate::models::{Chat, Message, Role};
use crate::services::api_client::ChatTransport;

/// In-memory session state for the chat view: the chat list, the active
/// selection, and the send lifecycle. All reads go through the transport
/// with a cache-once policy per chat.
///
/// The store is built for a single-threaded event loop. Operations take
/// `&self` and keep state in `Cell`/`RefCell` fields, so the rendering
/// layer can start a second operation while an earlier one is suspended
/// at the network boundary; no borrow is held across an await. Transport
/// failures never escape an operation — they are recorded in
/// `last_error` and prior state is left untouched. Only caller errors
/// (an unknown chat id) propagate as `Err`.
pub struct ChatStore<T> {
    transport: T,
    chats: RefCell<Vec<Chat>>,
    active_chat_id: RefCell<Option<String>>,
    is_loading_chats: Cell<bool>,
    is_sending: Cell<bool>,
    last_error: RefCell<Option<String>>,
}

impl<T: ChatTransport> ChatStore<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            chats: RefCell::new(Vec::new()),
            active_chat_id: RefCell::new(None),
            is_loading_chats: Cell::new(false),
            is_sending: Cell::new(false),
            last_error: RefCell::new(None),
        }
    }

    /// Chats in server order.
    pub fn chats(&self) -> Ref<'_, [Chat]> {
        Ref::map(self.chats.borrow(), Vec::as_slice)
    }

    pub fn chat(&self, chat_id: &str) -> Option<Ref<'_, Chat>> {
        Ref::filter_map(self.chats.borrow(), |chats| {
            chats.iter().find(|c| c.id == chat_id)
        })
        .ok()
    }

    pub fn active_chat_id(&self) -> Option<String> {
        self.active_chat_id.borrow().clone()
    }

    pub fn active_chat(&self) -> Option<Ref<'_, Chat>> {
        let id = self.active_chat_id()?;
        self.chat(&id)
    }

    pub fn is_loading_chats(&self) -> bool {
        self.is_loading_chats.get()
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending.get()
    }

    /// Most recent operation failure, if any. Cleared when the next
    /// attempt starts.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    fn contains(&self, chat_id: &str) -> bool {
        self.chats.borrow().iter().any(|c| c.id == chat_id)
    }

    fn with_chat_mut<R>(&self, chat_id: &str, f: impl FnOnce(&mut Chat) -> R) -> Option<R> {
        let mut chats = self.chats.borrow_mut();
        chats.iter_mut().find(|c| c.id == chat_id).map(f)
    }

    fn record_error(&self, context: &str, err: &ClientError) {
        warn!(error = %err, "{context}");
        *self.last_error.borrow_mut() = Some(format!("{context}: {err}"));
    }

    /// Fetch the chat list and select the first chat. Intended to run
    /// once when the session starts; calling it again fully replaces
    /// prior state, which is also the manual-reload path after a
    /// bootstrap failure. No automatic retry.
    pub async fn bootstrap(&self) {
        self.is_loading_chats.set(true);
        *self.last_error.borrow_mut() = None;

        match self.transport.fetch_chat_list().await {
            Ok(summaries) => {
                let chats: Vec<Chat> = summaries.into_iter().map(Chat::from).collect();
                debug!(count = chats.len(), "session bootstrapped");
                let first_id = chats.first().map(|c| c.id.clone());
                *self.chats.borrow_mut() = chats;
                *self.active_chat_id.borrow_mut() = first_id;
            }
            Err(err) => {
                self.chats.borrow_mut().clear();
                *self.active_chat_id.borrow_mut() = None;
                self.record_error("Failed to fetch chats", &err);
            }
        }

        self.is_loading_chats.set(false);
    }

    /// Make a chat the active one. Does not fetch anything itself; the
    /// caller follows a successful selection with
    /// [`ensure_messages_loaded`](Self::ensure_messages_loaded).
    pub fn select_chat(&self, chat_id: &str) -> Result<(), ClientError> {
        if !self.contains(chat_id) {
            return Err(ClientError::UnknownChat(chat_id.to_string()));
        }
        *self.active_chat_id.borrow_mut() = Some(chat_id.to_string());
        Ok(())
    }

    /// Fetch a chat's messages unless they are already cached for this
    /// session. On success the message list is replaced in one step and
    /// the chat marked cached. On failure the chat stays uncached (so the
    /// next visit retries) and existing messages are left alone.
    ///
    /// Two overlapping calls for the same chat may both fetch; the fetch
    /// is read-only, so last write wins.
    pub async fn ensure_messages_loaded(&self, chat_id: &str) -> Result<(), ClientError> {
        let cached = self
            .chat(chat_id)
            .ok_or_else(|| ClientError::UnknownChat(chat_id.to_string()))?
            .is_messages_cached;
        if cached {
            return Ok(());
        }

        *self.last_error.borrow_mut() = None;

        match self.transport.fetch_messages(chat_id).await {
            Ok(messages) => {
                debug!(chat_id, count = messages.len(), "messages loaded");
                self.with_chat_mut(chat_id, |chat| {
                    chat.messages = messages;
                    chat.is_messages_cached = true;
                });
            }
            Err(err) => {
                self.record_error("Failed to fetch chat messages", &err);
            }
        }

        Ok(())
    }

    /// Drop the cached flag so the next `ensure_messages_loaded` fetches
    /// again. Existing messages are kept until the refetch lands.
    pub fn invalidate_messages(&self, chat_id: &str) -> Result<(), ClientError> {
        self.with_chat_mut(chat_id, |chat| chat.is_messages_cached = false)
            .ok_or_else(|| ClientError::UnknownChat(chat_id.to_string()))
    }

    /// Send a user message with an optimistic append. Blank content and a
    /// send already in flight are silent no-ops; at most one send runs at
    /// a time across the whole session. The reply is appended to the chat
    /// captured here, not to whichever chat is active when it arrives.
    /// On failure the optimistic message is removed by its local id, so a
    /// duplicate-content message that was already present survives.
    pub async fn send_message(&self, chat_id: &str, content: &str) -> Result<(), ClientError> {
        if content.trim().is_empty() {
            return Ok(());
        }
        if self.is_sending.get() {
            debug!(chat_id, "send already in flight, ignoring");
            return Ok(());
        }
        if !self.contains(chat_id) {
            return Err(ClientError::UnknownChat(chat_id.to_string()));
        }

        let local_id = Uuid::new_v4();
        self.with_chat_mut(chat_id, |chat| {
            chat.messages.push(Message {
                role: Role::User,
                content: content.to_string(),
                timestamp: Some(Utc::now()),
                local_id: Some(local_id),
            });
        });

        self.is_sending.set(true);
        *self.last_error.borrow_mut() = None;

        match self.transport.send_message(chat_id, content).await {
            Ok(reply) => {
                self.with_chat_mut(chat_id, |chat| {
                    chat.messages.push(Message {
                        role: Role::Assistant,
                        content: reply,
                        timestamp: Some(Utc::now()),
                        local_id: None,
                    });
                });
            }
            Err(err) => {
                // Roll back exactly the entry this call appended.
                self.with_chat_mut(chat_id, |chat| {
                    chat.messages.retain(|m| m.local_id != Some(local_id));
                });
                self.record_error("Failed to send message", &err);
            }
        }

        self.is_sending.set(false);
        Ok(())
    }
}
