//! Error type definitions
//!
//! Defines the main error types used throughout the relay. Graph API failures
//! carry the decoded error envelope so callers see the upstream message
//! instead of a bare status code.

use serde::Deserialize;
use thiserror::Error;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum Error {
    /// Outbound HTTP request errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// Error responses returned by the Graph API
    #[error("Graph API error ({status}): {message}")]
    Graph {
        /// HTTP status of the failed call
        status: u16,
        /// Upstream error message (or raw body when undecodable)
        message: String,
        /// Graph error type, e.g. `OAuthException`
        error_type: Option<String>,
        /// Graph error code
        code: Option<i64>,
        /// Trace id for Meta support
        fbtrace_id: Option<String>,
    },

    /// Token chain failures that are not Graph error envelopes
    #[error("Token exchange failed at {stage}: {detail}")]
    TokenExchange {
        /// Which step of the chain failed
        stage: String,
        /// What went wrong
        detail: String,
    },

    /// The Page has no linked Instagram Business Account
    #[error("No Instagram Business Account linked to page {page_id}")]
    MissingInstagramAccount {
        /// The Page that was queried
        page_id: String,
    },

    /// Media transfer failures outside the Graph API itself
    #[error("Media upload failed ({target}): {detail}")]
    MediaUpload {
        /// What was being transferred
        target: String,
        /// What went wrong
        detail: String,
    },

    /// The Graph API reported a failed media container
    #[error("Media processing failed for {creation_id}: {detail}")]
    Processing {
        /// Container that failed
        creation_id: String,
        /// Status detail from the API
        detail: String,
    },

    /// The media container never became ready
    #[error("Media processing timed out for {creation_id} after {attempts} attempts")]
    ProcessingTimeout {
        /// Container that was polled
        creation_id: String,
        /// Number of status probes made
        attempts: u32,
    },

    /// Hashtag search returned no results
    #[error("Hashtag '{hashtag}' not found")]
    HashtagNotFound {
        /// The hashtag that was searched
        hashtag: String,
    },

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

/// Graph API error envelope: `{"error": {"message", "type", "code", "fbtrace_id"}}`
#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<i64>,
    fbtrace_id: Option<String>,
}

impl Error {
    /// Create a new configuration error
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a token exchange error
    pub fn token_exchange(stage: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::TokenExchange {
            stage: stage.into(),
            detail: detail.into(),
        }
    }

    /// Create a missing Instagram account error
    pub fn missing_instagram_account(page_id: impl Into<String>) -> Self {
        Self::MissingInstagramAccount {
            page_id: page_id.into(),
        }
    }

    /// Create a media upload error
    pub fn media_upload(target: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MediaUpload {
            target: target.into(),
            detail: detail.into(),
        }
    }

    /// Create a media processing error
    pub fn processing(creation_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Processing {
            creation_id: creation_id.into(),
            detail: detail.into(),
        }
    }

    /// Create a media processing timeout error
    pub fn processing_timeout(creation_id: impl Into<String>, attempts: u32) -> Self {
        Self::ProcessingTimeout {
            creation_id: creation_id.into(),
            attempts,
        }
    }

    /// Create a hashtag not found error
    pub fn hashtag_not_found(hashtag: impl Into<String>) -> Self {
        Self::HashtagNotFound {
            hashtag: hashtag.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Build a Graph error from a failed response body
    ///
    /// Decodes the standard error envelope when present, otherwise keeps the
    /// raw body text as the message.
    pub fn graph_failure(status: u16, body: &str) -> Self {
        match serde_json::from_str::<GraphErrorEnvelope>(body) {
            Ok(envelope) => Self::Graph {
                status,
                message: envelope.error.message,
                error_type: envelope.error.error_type,
                code: envelope.error.code,
                fbtrace_id: envelope.error.fbtrace_id,
            },
            Err(_) => Self::Graph {
                status,
                message: body.trim().to_string(),
                error_type: None,
                code: None,
                fbtrace_id: None,
            },
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(..) => "http",
            Error::Json(..) => "json",
            Error::Toml(..) => "toml",
            Error::Io(..) => "io",
            Error::Config { .. } => "config",
            Error::Graph { .. } => "graph",
            Error::TokenExchange { .. } => "token_exchange",
            Error::MissingInstagramAccount { .. } => "instagram_account",
            Error::MediaUpload { .. } => "media_upload",
            Error::Processing { .. } => "processing",
            Error::ProcessingTimeout { .. } => "processing",
            Error::HashtagNotFound { .. } => "hashtag",
            Error::Internal(..) => "internal",
        }
    }
}
