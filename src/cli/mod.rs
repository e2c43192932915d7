//! Command line interface
//!
//! Argument handling and the server runner behind the `graph-relay`
//! binary.

pub mod server;

pub use server::{ServerArgs, run_server_mode};
