//! HTTP request handlers
//!
//! Implementation of the relay's HTTP endpoints. Every publishing
//! handler reads the page credentials from request headers, validates
//! the body the same way the endpoints always have, and maps operation
//! failures to a 500 with the error message in the body.

use crate::{
    graph::PageCredentials,
    server::app::AppState,
    types::{
        CarouselPublishResponse, ErrorResponse, FeedPostResponse, HashtagCommentsRequest,
        HashtagCommentsResponse, HealthResponse, ImagePostRequest, MediaPublishResponse,
        PostBatchRequest, ReelPublishResponse, ReelUploadRequest, ReelUploadResponse,
    },
    utils::version,
};
use axum::{
    Json as RequestJson,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use axum_macros::debug_handler;

/// Error message returned when a credential header is absent
pub const MISSING_HEADERS_MESSAGE: &str =
    "Missing one of required headers: X-APP-ID, X-APP-SECRET, X-PAGE-ID, X-ACCESS-TOKEN";

/// Rejection tuple shared by all handlers
type Rejection = (StatusCode, Json<ErrorResponse>);

/// Read the page credentials out of the request headers
///
/// All four headers must be present and readable as text; a blank value
/// counts as missing.
fn page_credentials(headers: &HeaderMap) -> Result<PageCredentials, Rejection> {
    let read = |name: &str| -> Option<String> {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    match (
        read("X-APP-ID"),
        read("X-APP-SECRET"),
        read("X-PAGE-ID"),
        read("X-ACCESS-TOKEN"),
    ) {
        (Some(app_id), Some(app_secret), Some(page_id), Some(user_token)) => Ok(
            PageCredentials::new(app_id, app_secret, page_id, user_token),
        ),
        _ => Err(bad_request(MISSING_HEADERS_MESSAGE)),
    }
}

/// Build a 400 rejection with the given message
fn bad_request(message: &str) -> Rejection {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

/// Build a 500 rejection from a failed operation
fn operation_failed(error: &crate::Error) -> Rejection {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format_error(error))),
    )
}

/// Format error for HTTP response
fn format_error(error: &crate::Error) -> String {
    match error {
        crate::Error::Http(e) => format!("HTTP request failed: {}", e),
        crate::Error::Json(e) => format!("JSON error: {}", e),
        crate::Error::Toml(e) => format!("TOML error: {}", e),
        crate::Error::Io(e) => format!("I/O error: {}", e),
        crate::Error::Config { field, message } => {
            format!("Configuration error in {}: {}", field, message)
        }
        crate::Error::Graph {
            status, message, ..
        } => format!("Graph API error ({}): {}", status, message),
        crate::Error::TokenExchange { stage, detail } => {
            format!("Token exchange failed at {}: {}", stage, detail)
        }
        crate::Error::MissingInstagramAccount { page_id } => {
            format!("No Instagram Business Account linked to page {}", page_id)
        }
        crate::Error::MediaUpload { target, detail } => {
            format!("Media upload failed ({}): {}", target, detail)
        }
        crate::Error::Processing {
            creation_id,
            detail,
        } => format!("Media processing failed for {}: {}", creation_id, detail),
        crate::Error::ProcessingTimeout {
            creation_id,
            attempts,
        } => format!(
            "Media processing timed out for {} after {} attempts",
            creation_id, attempts
        ),
        crate::Error::HashtagNotFound { hashtag } => format!("Hashtag '{}' not found", hashtag),
        crate::Error::Internal(msg) => format!("Internal error: {}", msg),
    }
}

/// Health check endpoint
///
/// GET /health
///
/// Returns server status and uptime information.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let response = HealthResponse::new(uptime, version::get_version());

    tracing::debug!(
        "Health response: uptime={}s, version={}",
        uptime,
        version::get_version()
    );
    Json(response)
}

/// Facebook multi-image feed post endpoint
///
/// POST /fb/post-images
///
/// Uploads each image unpublished and attaches them to a single feed post.
#[debug_handler]
pub async fn fb_post_images(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequestJson(request): RequestJson<PostBatchRequest>,
) -> Result<Json<FeedPostResponse>, Rejection> {
    let credentials = page_credentials(&headers)?;

    let posts = match request.posts {
        Some(posts) if !posts.is_empty() => posts,
        _ => return Err(bad_request("posts list is required")),
    };

    tracing::debug!("Received feed post request with {} item(s)", posts.len());

    match state.graph.fb_post_images(&credentials, &posts).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to publish feed post: {}", e);
            Err(operation_failed(&e))
        }
    }
}

/// Facebook reel upload endpoint
///
/// POST /fb/upload-reel
///
/// Runs the resumable upload flow and publishes the reel on the page.
#[debug_handler]
pub async fn fb_upload_reel(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequestJson(request): RequestJson<ReelUploadRequest>,
) -> Result<Json<ReelUploadResponse>, Rejection> {
    let credentials = page_credentials(&headers)?;

    let video_url = match request.video_url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => return Err(bad_request("video_url required")),
    };
    let caption = request.caption.as_deref().unwrap_or_default();

    match state
        .graph
        .fb_upload_reel(&credentials, video_url, caption)
        .await
    {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to upload reel to page: {}", e);
            Err(operation_failed(&e))
        }
    }
}

/// Instagram single image endpoint
///
/// POST /ig/post-image
///
/// Creates a media container for the image and publishes it.
#[debug_handler]
pub async fn ig_post_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequestJson(request): RequestJson<ImagePostRequest>,
) -> Result<Json<MediaPublishResponse>, Rejection> {
    let credentials = page_credentials(&headers)?;

    let image_url = match request.image_url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => return Err(bad_request("Image url required")),
    };
    let caption = request.caption.as_deref().unwrap_or_default();

    match state
        .graph
        .ig_post_image(&credentials, image_url, caption)
        .await
    {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to post Instagram image: {}", e);
            Err(operation_failed(&e))
        }
    }
}

/// Instagram carousel endpoint
///
/// POST /ig/post-carousel
///
/// Creates item containers for each image and publishes them as one carousel.
#[debug_handler]
pub async fn ig_post_carousel(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequestJson(request): RequestJson<PostBatchRequest>,
) -> Result<Json<CarouselPublishResponse>, Rejection> {
    let credentials = page_credentials(&headers)?;

    let posts = match request.posts {
        Some(posts) if !posts.is_empty() => posts,
        _ => return Err(bad_request("posts list required")),
    };

    tracing::debug!("Received carousel request with {} item(s)", posts.len());

    match state.graph.ig_post_carousel(&credentials, &posts).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to publish carousel: {}", e);
            Err(operation_failed(&e))
        }
    }
}

/// Instagram reel upload endpoint
///
/// POST /ig/upload-reel
///
/// Creates a reel container from the video URL, waits for processing
/// and publishes it.
#[debug_handler]
pub async fn ig_upload_reel(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequestJson(request): RequestJson<ReelUploadRequest>,
) -> Result<Json<ReelPublishResponse>, Rejection> {
    let credentials = page_credentials(&headers)?;

    let video_url = match request.video_url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => return Err(bad_request("video_url required")),
    };
    let caption = request.caption.as_deref().unwrap_or_default();

    match state
        .graph
        .ig_upload_reel(&credentials, video_url, caption)
        .await
    {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to upload Instagram reel: {}", e);
            Err(operation_failed(&e))
        }
    }
}

/// Hashtag comment bot endpoint
///
/// POST /ig/hashtag-comments
///
/// Comments on the most liked recent media of a hashtag.
#[debug_handler]
pub async fn ig_hashtag_comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequestJson(request): RequestJson<HashtagCommentsRequest>,
) -> Result<Json<HashtagCommentsResponse>, Rejection> {
    let credentials = page_credentials(&headers)?;

    let hashtag = match request.hashtag.as_deref() {
        Some(tag) if !tag.is_empty() => tag,
        _ => return Err(bad_request("hashtag required")),
    };

    match state
        .graph
        .ig_hashtag_comments(&credentials, hashtag, request.message(), request.limit())
        .await
    {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to run hashtag comments: {}", e);
            Err(operation_failed(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use axum::http::HeaderValue;

    fn create_test_state() -> AppState {
        AppState::new(Settings::default())
    }

    fn credential_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("X-APP-ID", HeaderValue::from_static("app-id"));
        headers.insert("X-APP-SECRET", HeaderValue::from_static("app-secret"));
        headers.insert("X-PAGE-ID", HeaderValue::from_static("12345"));
        headers.insert("X-ACCESS-TOKEN", HeaderValue::from_static("EAAG-token"));
        headers
    }

    #[tokio::test]
    async fn test_health_handler() {
        let state = create_test_state();
        let response = health(State(state)).await;

        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
        assert!(response.server_uptime < 1); // Should be very small for fresh state
    }

    #[test]
    fn test_page_credentials_complete() {
        let headers = credential_headers();
        let credentials = page_credentials(&headers).unwrap();

        assert_eq!(credentials.app_id, "app-id");
        assert_eq!(credentials.app_secret, "app-secret");
        assert_eq!(credentials.page_id, "12345");
        assert_eq!(credentials.user_token, "EAAG-token");
    }

    #[test]
    fn test_page_credentials_missing_header() {
        let mut headers = credential_headers();
        headers.remove("X-PAGE-ID");

        let rejection = page_credentials(&headers).unwrap_err();
        assert_eq!(rejection.0, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.1.error, MISSING_HEADERS_MESSAGE);
    }

    #[test]
    fn test_page_credentials_blank_header() {
        let mut headers = credential_headers();
        headers.insert("X-ACCESS-TOKEN", HeaderValue::from_static(""));

        let rejection = page_credentials(&headers).unwrap_err();
        assert_eq!(rejection.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fb_post_images_requires_posts() {
        let state = create_test_state();
        let request = PostBatchRequest::new();

        let result = fb_post_images(State(state), credential_headers(), RequestJson(request)).await;
        let rejection = result.unwrap_err();
        assert_eq!(rejection.0, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.1.error, "posts list is required");
    }

    #[tokio::test]
    async fn test_fb_post_images_rejects_empty_posts() {
        let state = create_test_state();
        let request = PostBatchRequest::new().with_posts(Vec::new());

        let result = fb_post_images(State(state), credential_headers(), RequestJson(request)).await;
        let rejection = result.unwrap_err();
        assert_eq!(rejection.1.error, "posts list is required");
    }

    #[tokio::test]
    async fn test_ig_post_carousel_requires_posts() {
        let state = create_test_state();
        let request = PostBatchRequest::new();

        let result =
            ig_post_carousel(State(state), credential_headers(), RequestJson(request)).await;
        let rejection = result.unwrap_err();
        assert_eq!(rejection.1.error, "posts list required");
    }

    #[tokio::test]
    async fn test_fb_upload_reel_requires_video_url() {
        let state = create_test_state();
        let request = ReelUploadRequest::new();

        let result = fb_upload_reel(State(state), credential_headers(), RequestJson(request)).await;
        let rejection = result.unwrap_err();
        assert_eq!(rejection.1.error, "video_url required");
    }

    #[tokio::test]
    async fn test_ig_upload_reel_rejects_blank_video_url() {
        let state = create_test_state();
        let request = ReelUploadRequest::new().with_video_url("");

        let result = ig_upload_reel(State(state), credential_headers(), RequestJson(request)).await;
        let rejection = result.unwrap_err();
        assert_eq!(rejection.1.error, "video_url required");
    }

    #[tokio::test]
    async fn test_ig_post_image_requires_image_url() {
        let state = create_test_state();
        let request = ImagePostRequest::new();

        let result = ig_post_image(State(state), credential_headers(), RequestJson(request)).await;
        let rejection = result.unwrap_err();
        assert_eq!(rejection.1.error, "Image url required");
    }

    #[tokio::test]
    async fn test_ig_hashtag_comments_requires_hashtag() {
        let state = create_test_state();
        let request = HashtagCommentsRequest::new();

        let result =
            ig_hashtag_comments(State(state), credential_headers(), RequestJson(request)).await;
        let rejection = result.unwrap_err();
        assert_eq!(rejection.1.error, "hashtag required");
    }

    #[tokio::test]
    async fn test_missing_headers_rejected_before_body_validation() {
        let state = create_test_state();
        let request = PostBatchRequest::new();

        let result = fb_post_images(State(state), HeaderMap::new(), RequestJson(request)).await;
        let rejection = result.unwrap_err();
        assert_eq!(rejection.0, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.1.error, MISSING_HEADERS_MESSAGE);
    }

    #[test]
    fn test_format_error_graph() {
        let error = crate::Error::graph_failure(
            400,
            r#"{"error":{"message":"Unsupported post request.","type":"GraphMethodException","code":100,"fbtrace_id":"XyZ"}}"#,
        );
        let formatted = format_error(&error);
        assert_eq!(
            formatted,
            "Graph API error (400): Unsupported post request."
        );
    }

    #[test]
    fn test_format_error_token_exchange() {
        let error = crate::Error::token_exchange("page token", "page node carried no access_token");
        let formatted = format_error(&error);
        assert_eq!(
            formatted,
            "Token exchange failed at page token: page node carried no access_token"
        );
    }

    #[test]
    fn test_format_error_missing_instagram_account() {
        let error = crate::Error::missing_instagram_account("12345");
        let formatted = format_error(&error);
        assert_eq!(
            formatted,
            "No Instagram Business Account linked to page 12345"
        );
    }

    #[test]
    fn test_format_error_media_upload() {
        let error = crate::Error::media_upload("photos", "no images were uploaded");
        let formatted = format_error(&error);
        assert_eq!(formatted, "Media upload failed (photos): no images were uploaded");
    }

    #[test]
    fn test_format_error_processing_timeout() {
        let error = crate::Error::processing_timeout("17900001", 50);
        let formatted = format_error(&error);
        assert_eq!(
            formatted,
            "Media processing timed out for 17900001 after 50 attempts"
        );
    }

    #[test]
    fn test_format_error_hashtag_not_found() {
        let error = crate::Error::hashtag_not_found("sunset");
        let formatted = format_error(&error);
        assert_eq!(formatted, "Hashtag 'sunset' not found");
    }

    #[test]
    fn test_format_error_internal() {
        let error = crate::Error::internal("Unexpected internal state");
        let formatted = format_error(&error);
        assert_eq!(formatted, "Internal error: Unexpected internal state");
    }
}
