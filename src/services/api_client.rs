use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ConfigError};
use crate::models::{ChatSummary, Message};
use crate::services::config_service::Config;

/// `GET /user/info` response
#[derive(Debug, Deserialize)]
pub struct UserInfoResponse {
    pub chats: Vec<ChatSummary>,
}

/// `GET /chat?id=...` response. A missing `messages` field reads as an
/// empty conversation.
#[derive(Debug, Deserialize)]
pub struct ChatMessagesResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// `POST /chat?id=...` request and response bodies
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub message: String,
}

/// The three backend calls the chat store needs. Each implementation
/// issues exactly one outbound request per call: no retries, no caching.
/// `send_message` is not idempotent server-side, so callers must not
/// retry it blindly.
#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    async fn fetch_chat_list(&self) -> Result<Vec<ChatSummary>, ClientError>;
    async fn fetch_messages(&self, chat_id: &str) -> Result<Vec<Message>, ClientError>;
    async fn send_message(&self, chat_id: &str, content: &str) -> Result<String, ClientError>;
}

/// HTTP client for the chat backend
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.api_base.clone(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(&Config::from_env()?))
    }

    fn chat_url(&self, chat_id: &str) -> String {
        format!("{}/chat?id={}", self.base_url, urlencoding::encode(chat_id))
    }
}

impl ChatTransport for ApiClient {
    async fn fetch_chat_list(&self) -> Result<Vec<ChatSummary>, ClientError> {
        let url = format!("{}/user/info", self.base_url);
        debug!(%url, "fetching chat list");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }

        let info: UserInfoResponse = response.json().await?;
        Ok(info.chats)
    }

    async fn fetch_messages(&self, chat_id: &str) -> Result<Vec<Message>, ClientError> {
        let url = self.chat_url(chat_id);
        debug!(chat_id, "fetching messages");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }

        let body: ChatMessagesResponse = response.json().await?;
        Ok(body.messages)
    }

    async fn send_message(&self, chat_id: &str, content: &str) -> Result<String, ClientError> {
        if content.trim().is_empty() {
            return Err(ClientError::BlankMessage);
        }

        let url = self.chat_url(chat_id);
        debug!(chat_id, "sending message");

        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest { message: content })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }

        let body: SendMessageResponse = response.json().await?;
        Ok(body.message)
    }
}
