//! A barebones client for the Spotify Web API.
//!
//! Only covers what album ranking needs: app-level authentication through the
//! client-credentials flow, album search, and album lookup.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod album;
pub use album::*;

mod search;
pub use search::*;

mod request;

/// An error that can occur when interacting with the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An error that occurred when making a request.
    #[error("Reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    /// An error that occurred when deserializing a response.
    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),
    /// The server returned an error.
    #[error("Spotify error: {status}{}", message_suffix(.message))]
    SpotifyError {
        /// The HTTP status code.
        status: u16,
        /// The error message, if the server sent one.
        message: Option<String>,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

/// A result type for the client.
pub type ClientResult<T> = Result<T, ClientError>;
