mod api_client;
mod chat_store;
mod config_service;
mod document_service;

pub use api_client::*;
pub use chat_store::*;
pub use config_service::*;
pub use document_service::*;
