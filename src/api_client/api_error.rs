use reqwest::Error as ReqwestError;
use std::io;
use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, refused connection, broken transfer).
    #[error("Connection error: {0}")]
    Connection(#[from] ReqwestError),

    /// Non-success status, or a body carrying an `error` field.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no reason given"))]
    Server { status: u16, message: Option<String> },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// The reason text supplied by the server, if any.
    pub fn server_reason(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Server reason when present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_reason().unwrap_or(fallback).to_string()
    }
}
