//! Non-visual core of the Paperchat client: the chat session store, the
//! HTTP transport for the chat backend, and a thin client for the
//! document bucket. A rendering layer drives the store through its
//! operations and reads its state back between them.

pub mod error;
pub mod models;
pub mod services;

pub use error::{ClientError, ConfigError};
pub use models::*;
pub use services::*;
