//! Error types for the catalog client and the persistence layer.

use serde_json::Value;
use thiserror::Error;

/// Status codes the upstream API answers with on success.
pub const SUCCESS_STATUSES: [u16; 4] = [200, 201, 202, 204];

/// Error messages that the upstream API uses on a 401 for a token that can no
/// longer be used. A fresh client-credentials token fixes both.
const EXPIRED_TOKEN_MESSAGES: [&str; 2] = ["The access token expired", "Invalid access token"];

/// How a failed upstream response should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 401 with an expiry message; recoverable with one refresh.
    TokenExpired,
    /// Anything else; terminal.
    Other,
}

/// A non-success upstream response, classified once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: u16,
    pub body: String,
    pub kind: FailureKind,
}

impl ApiFailure {
    /// Classifies a non-success response from its status and raw body.
    ///
    /// The body is expected to look like
    /// `{"error": {"status": 401, "message": "The access token expired"}}`;
    /// bodies that are not JSON are kept verbatim and classified as
    /// [`FailureKind::Other`].
    pub fn classify(status: u16, body: String) -> Self {
        let kind = if status == 401 && is_expiry_message(&body) {
            FailureKind::TokenExpired
        } else {
            FailureKind::Other
        };

        Self { status, body, kind }
    }

    pub fn is_token_expired(&self) -> bool {
        self.kind == FailureKind::TokenExpired
    }
}

fn is_expiry_message(body: &str) -> bool {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return false;
    };

    json["error"]["message"]
        .as_str()
        .map(|message| EXPIRED_TOKEN_MESSAGES.contains(&message))
        .unwrap_or(false)
}

/// Main error type of the catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required configuration value is not set.
    #[error("Missing configuration value: {0}")]
    MissingConfig(&'static str),

    /// Client id or secret is empty.
    #[error("Client credentials must be non-empty")]
    EmptyCredentials,

    /// Upstream answered with a status outside the success set.
    #[error("Upstream returned status {}: {}", .0.status, .0.body)]
    Upstream(ApiFailure),

    /// HTTP request failed before a response arrived.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors of the file-backed persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Username or email already taken")]
    AlreadyTaken,

    #[error("Unknown user: {0}")]
    UnknownUser(u64),

    #[error("Unknown genre: {0}")]
    UnknownGenre(u64),

    #[error("Invalid favorite status: {0}")]
    InvalidStatus(String),
}
