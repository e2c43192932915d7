//! Utility functions and helpers
//!
//! Small helpers shared across the relay.

pub mod version;

pub use version::get_version;
