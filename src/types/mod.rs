//! Type definitions for the relay
//!
//! This module contains the data structures used for requests, responses
//! and Graph API payloads.

pub mod request;
pub mod response;
pub mod wire;

pub use request::{
    HashtagCommentsRequest, ImagePostRequest, PostBatchRequest, PostItem, ReelUploadRequest,
};
pub use response::{
    CarouselPublishResponse, CommentOutcome, ErrorResponse, FeedPostResponse, FeedPostSummary,
    HashtagCommentsResponse, HealthResponse, MediaPublishResponse, ReelPublishResponse,
    ReelUploadResponse,
};
