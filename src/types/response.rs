//! Response type definitions
//!
//! Defines the JSON bodies returned by the relay's endpoints.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the process is serving
    pub status: String,

    /// Server uptime in seconds
    pub server_uptime: u64,

    /// Server version
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn new(server_uptime: u64, version: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            server_uptime,
            version: version.into(),
        }
    }
}

/// Error response for API errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response for Facebook multi-image feed posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPostResponse {
    /// Outcome of the batch post
    pub results: FeedPostSummary,
}

/// Outcome of a Facebook multi-image feed post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPostSummary {
    /// Published feed post id
    pub post_id: String,

    /// Ids of the photos attached to the post
    pub media_fbids: Vec<String>,

    /// How many images failed to upload and were left out
    pub skipped: u32,
}

impl FeedPostResponse {
    /// Create a new feed post response
    pub fn new(post_id: impl Into<String>, media_fbids: Vec<String>, skipped: u32) -> Self {
        Self {
            results: FeedPostSummary {
                post_id: post_id.into(),
                media_fbids,
                skipped,
            },
        }
    }
}

/// Response for Facebook reel uploads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelUploadResponse {
    /// Whether the reel was published
    pub success: bool,

    /// Graph video id of the uploaded reel
    pub video_id: String,
}

impl ReelUploadResponse {
    /// Create a successful reel upload response
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            success: true,
            video_id: video_id.into(),
        }
    }
}

/// Response for single Instagram image posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaPublishResponse {
    /// Media container id created for the image
    pub creation_id: String,

    /// Published media id
    pub media_id: String,
}

impl MediaPublishResponse {
    /// Create a new media publish response
    pub fn new(creation_id: impl Into<String>, media_id: impl Into<String>) -> Self {
        Self {
            creation_id: creation_id.into(),
            media_id: media_id.into(),
        }
    }
}

/// Response for Instagram carousel posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselPublishResponse {
    /// Carousel container id
    pub creation_id: String,

    /// Published media id
    pub media_id: String,

    /// Container ids of the carousel items, in publish order
    pub children: Vec<String>,

    /// How many items failed to upload and were left out
    pub skipped: u32,
}

impl CarouselPublishResponse {
    /// Create a new carousel publish response
    pub fn new(
        creation_id: impl Into<String>,
        media_id: impl Into<String>,
        children: Vec<String>,
        skipped: u32,
    ) -> Self {
        Self {
            creation_id: creation_id.into(),
            media_id: media_id.into(),
            children,
            skipped,
        }
    }
}

/// Response for Instagram reel uploads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelPublishResponse {
    /// Media container id created for the reel
    pub creation_id: String,

    /// Published media id
    pub media_id: String,

    /// How many status probes ran before the container was ready
    pub attempts: u32,
}

impl ReelPublishResponse {
    /// Create a new reel publish response
    pub fn new(creation_id: impl Into<String>, media_id: impl Into<String>, attempts: u32) -> Self {
        Self {
            creation_id: creation_id.into(),
            media_id: media_id.into(),
            attempts,
        }
    }
}

/// Response for the hashtag comment bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagCommentsResponse {
    /// Resolved hashtag id
    pub hashtag_id: String,

    /// Comments that were posted
    pub comments: Vec<CommentOutcome>,

    /// How many comment attempts failed
    pub failed: u32,
}

/// One posted comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentOutcome {
    /// Media the comment was posted under
    pub media_id: String,

    /// Id of the created comment
    pub comment_id: String,

    /// Permalink of the media, when the API returned one
    pub permalink: String,
}

impl HashtagCommentsResponse {
    /// Create a new hashtag comments response
    pub fn new(hashtag_id: impl Into<String>, comments: Vec<CommentOutcome>, failed: u32) -> Self {
        Self {
            hashtag_id: hashtag_id.into(),
            comments,
            failed,
        }
    }
}
