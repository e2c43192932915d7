//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)] // Not every test binary uses every helper

/// Test helper functions
pub mod helpers {
    use axum::{
        body::Body,
        http::{Request, header::CONTENT_TYPE},
    };
    use graph_page_relay::config::Settings;
    use std::time::Duration;

    /// Page id used by the mock Graph API
    pub const PAGE_ID: &str = "1234567890";

    /// Instagram Business Account id linked to the mock page
    pub const IG_ACCOUNT_ID: &str = "178414";

    /// Long-lived user token supplied by the caller
    pub const USER_TOKEN: &str = "EAAG-long-lived";

    /// Page access token handed out by the mock token chain
    pub const PAGE_TOKEN: &str = "page-token";

    /// Create settings pointed at a mock Graph API
    ///
    /// Polling is tightened so reel tests finish quickly.
    pub fn test_settings(base_url: &str) -> Settings {
        let mut settings = Settings::default();
        settings.server.port = 0;
        settings.graph.base_url = base_url.to_string();
        settings.graph.connect_timeout = 5;
        settings.graph.request_timeout = 10;
        settings.graph.status_poll_attempts = 3;
        settings.graph.status_poll_interval = Duration::ZERO;
        settings
    }

    /// Build a POST request with credential headers and a JSON body
    pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header("X-APP-ID", "app-id")
            .header("X-APP-SECRET", "app-secret")
            .header("X-PAGE-ID", PAGE_ID)
            .header("X-ACCESS-TOKEN", USER_TOKEN)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Build a POST request carrying a JSON body but no credential headers
    pub fn post_json_without_credentials(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Read a response body as JSON
    pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Mock Graph API endpoints
pub mod mocks {
    use super::helpers::{IG_ACCOUNT_ID, PAGE_ID, PAGE_TOKEN};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    /// Mount the token exchange and page token endpoints
    pub async fn mount_token_chain(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/oauth/access_token"))
            .and(query_param("grant_type", "fb_exchange_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh-user-token",
                "token_type": "bearer",
                "expires_in": 5_184_000,
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/{}", PAGE_ID)))
            .and(query_param("fields", "access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": PAGE_TOKEN,
                "id": PAGE_ID,
            })))
            .mount(server)
            .await;
    }

    /// Mount the Instagram Business Account lookup
    pub async fn mount_instagram_account(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", PAGE_ID)))
            .and(query_param("fields", "instagram_business_account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instagram_business_account": { "id": IG_ACCOUNT_ID },
                "id": PAGE_ID,
            })))
            .mount(server)
            .await;
    }

    /// Mount a page whose Instagram link is absent
    pub async fn mount_page_without_instagram(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", PAGE_ID)))
            .and(query_param("fields", "instagram_business_account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": PAGE_ID,
            })))
            .mount(server)
            .await;
    }
}
