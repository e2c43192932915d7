//! HTTP server
//!
//! Axum application setup and the request handlers behind the relay's
//! endpoints.

pub mod app;
pub mod handlers;

pub use app::{AppState, create_app};
