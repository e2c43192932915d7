//! Graph Page Relay
//!
//! A small HTTP service that relays publishing requests to the Facebook Graph
//! API on behalf of a single Facebook Page and its linked Instagram Business
//! Account. Callers supply app credentials and a long-lived user token as
//! request headers; the relay refreshes the token, resolves the Page and
//! Instagram account, uploads the media and publishes it.
//!
//! # Architecture
//!
//! Every publishing request runs the same outbound call sequence against the
//! Graph API:
//! 1. Exchange the long-lived user token for a fresh one
//! 2. Fetch the Page Access Token
//! 3. (Instagram flows) Resolve the linked Instagram Business Account
//! 4. Upload media containers and publish them
//!
//! Nothing is cached between requests. All Graph entities (tokens, creation
//! IDs, video IDs) are opaque strings owned by the remote API.
//!
//! # Usage
//!
//! ```bash
//! graph-relay --port 4000 --host 0.0.0.0
//! ```
//!
//! # Examples
//!
//! ```rust
//! use graph_page_relay::{GraphClient, Settings};
//!
//! # fn example() -> anyhow::Result<()> {
//! let settings = Settings::default();
//! let client = GraphClient::new(&settings);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod server;
pub mod types;
pub mod utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use graph::{GraphClient, PageCredentials};
pub use types::{ErrorResponse, HealthResponse};
