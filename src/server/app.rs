//! Axum application setup
//!
//! Creates and configures the Axum application with routes and middleware.

use crate::{config::Settings, graph::GraphClient};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Graph API client shared by all publishing operations
    pub graph: Arc<GraphClient>,
    /// Application settings
    pub settings: Arc<Settings>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state from settings
    pub fn new(settings: Settings) -> Self {
        let graph = Arc::new(GraphClient::new(&settings));

        Self {
            graph,
            settings: Arc::new(settings),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Create the main Axum application with routes and middleware
pub fn create_app(settings: Settings) -> Router {
    let state = AppState::new(settings);

    Router::new()
        .route("/health", get(super::handlers::health))
        .route("/fb/post-images", post(super::handlers::fb_post_images))
        .route("/fb/upload-reel", post(super::handlers::fb_upload_reel))
        .route("/ig/post-image", post(super::handlers::ig_post_image))
        .route("/ig/post-carousel", post(super::handlers::ig_post_carousel))
        .route("/ig/upload-reel", post(super::handlers::ig_upload_reel))
        .route(
            "/ig/hashtag-comments",
            post(super::handlers::ig_hashtag_comments),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_app() {
        let settings = Settings::default();
        let _app = create_app(settings);
    }

    #[test]
    fn test_app_state_shares_settings() {
        let mut settings = Settings::default();
        settings.server.port = 4100;

        let state = AppState::new(settings);
        assert_eq!(state.settings.server.port, 4100);
        assert_eq!(state.graph.base_url(), "https://graph.facebook.com");
    }
}
