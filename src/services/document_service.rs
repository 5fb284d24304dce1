use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::{ClientError, ConfigError};
use crate::models::BucketListing;
use crate::services::config_service::Config;

#[derive(Debug, Serialize)]
struct UploadDocumentRequest<'a> {
    image: String,
    filename: &'a str,
}

/// HTTP client for the document bucket
pub struct DocumentClient {
    client: Client,
    base_url: String,
}

impl DocumentClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60)) // uploads can be slow
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

    pub async fn list_documents(&self) -> Result<BucketListing, ClientError> {
        let url = format!("{}/bucket", self.base_url);
        debug!(%url, "listing documents");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Upload a file as a base64 JSON payload. Returns the backend's
    /// success document as-is; the client never inspects it.
    pub async fn upload_document(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}/bucket", self.base_url);
        debug!(filename, size = bytes.len(), "uploading document");

        let request = UploadDocumentRequest {
            image: BASE64.encode(bytes),
            filename,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Direct view/download URL for an object. No request is made; the
    /// rendering layer uses this as a link href.
    pub fn document_url(&self, key: &str) -> String {
        format!("{}/bucket/{}", self.base_url, urlencoding::encode(key))
    }
}

/// Human-readable file size for the document list.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[exponent])
}
