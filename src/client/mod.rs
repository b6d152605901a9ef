//! Client side of the auth flows: the login and registration forms, their
//! notifications, and where the issued token is kept.

pub mod alert;
pub mod api;
pub mod forms;
pub mod storage;

pub use alert::*;
pub use api::*;
pub use forms::*;
pub use storage::*;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced a response.
    Http(String),
    /// The server answered with a non-2xx status.
    Api { status: u16, message: Option<String> },
    Decode(String),
    Storage(String),
}

impl ClientError {
    /// Message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(msg) => write!(f, "HTTP error: {}", msg),
            ClientError::Api { status, message } => match message {
                Some(msg) => write!(f, "API error ({}): {}", status, msg),
                None => write!(f, "API error ({})", status),
            },
            ClientError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            ClientError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}
