//! Configuration management for the relay
//!
//! This module handles loading and managing configuration settings
//! for the HTTP server and the outbound Graph API client.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::Settings;
