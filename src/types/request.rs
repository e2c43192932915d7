//! Request type definitions
//!
//! Defines the JSON bodies accepted by the publishing endpoints. Required
//! fields are modelled as `Option` so handlers can reject missing values with
//! the relay's own 400 messages instead of a generic decode rejection.

use serde::{Deserialize, Serialize};

/// One image entry in a batch or carousel post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostItem {
    /// Publicly reachable image URL
    pub image_url: String,

    /// Caption text for the post
    #[serde(default)]
    pub caption: String,
}

impl PostItem {
    /// Create a new post item for the given image URL
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            caption: String::new(),
        }
    }

    /// Set the caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }
}

/// Request for multi-image posts (Facebook feed and Instagram carousels)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostBatchRequest {
    /// Images to publish, in order
    pub posts: Option<Vec<PostItem>>,
}

impl PostBatchRequest {
    /// Create a new request with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the post list
    pub fn with_posts(mut self, posts: Vec<PostItem>) -> Self {
        self.posts = Some(posts);
        self
    }
}

/// Request for reel uploads (Facebook and Instagram)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReelUploadRequest {
    /// Publicly reachable video URL
    pub video_url: Option<String>,

    /// Caption text for the reel
    pub caption: Option<String>,
}

impl ReelUploadRequest {
    /// Create a new request with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the video URL
    pub fn with_video_url(mut self, video_url: impl Into<String>) -> Self {
        self.video_url = Some(video_url.into());
        self
    }

    /// Set the caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Request for single Instagram image posts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagePostRequest {
    /// Publicly reachable image URL
    pub image_url: Option<String>,

    /// Caption text for the post
    pub caption: Option<String>,
}

impl ImagePostRequest {
    /// Create a new request with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image URL
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Set the caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Request for the hashtag comment bot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashtagCommentsRequest {
    /// Hashtag to search, without the leading `#`
    pub hashtag: Option<String>,

    /// Comment text to post under each media
    pub message: Option<String>,

    /// How many top posts to comment on
    pub limit: Option<usize>,
}

impl HashtagCommentsRequest {
    /// Comment text used when the request does not provide one
    pub const DEFAULT_MESSAGE: &'static str = "Good post";

    /// Number of top posts commented on when the request does not say
    pub const DEFAULT_LIMIT: usize = 5;

    /// Create a new request with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hashtag
    pub fn with_hashtag(mut self, hashtag: impl Into<String>) -> Self {
        self.hashtag = Some(hashtag.into());
        self
    }

    /// Set the comment message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the number of posts to comment on
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Comment text, falling back to the default
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(Self::DEFAULT_MESSAGE)
    }

    /// Post count, falling back to the default
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}
