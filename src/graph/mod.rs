//! Graph API integration
//!
//! This module holds the shared HTTP client, the token acquisition
//! chain, and the publishing operations for Facebook pages and their
//! linked Instagram Business Accounts.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use graph_page_relay::config::Settings;
//! use graph_page_relay::graph::{GraphClient, PageCredentials};
//!
//! # let _ = tokio_test::block_on(async {
//! let settings = Settings::default();
//! let client = GraphClient::new(&settings);
//!
//! let credentials = PageCredentials::new("app-id", "app-secret", "page-id", "user-token");
//! let page_token = client.acquire_page_token(&credentials).await?;
//! println!("Holding page token ({} chars)", page_token.len());
//! # Ok::<(), graph_page_relay::Error>(())
//! # });
//! ```

pub mod auth;
pub mod client;
pub mod facebook;
pub mod hashtag;
pub mod instagram;

pub use auth::{InstagramSession, PageCredentials};
pub use client::GraphClient;
