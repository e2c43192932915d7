//! HTTP relay binary for Facebook and Instagram publishing
//!
//! Starts an HTTP server that relays publishing requests to the Graph
//! API for the page named in each request's credential headers.
//!
//! # Usage
//!
//! ```bash
//! graph-relay --port 4000 --host 0.0.0.0
//! ```
//!
//! # API Endpoints
//!
//! - `GET /health`: Health check endpoint
//! - `POST /fb/post-images`: Publish a multi-image feed post
//! - `POST /fb/upload-reel`: Upload and publish a page reel
//! - `POST /ig/post-image`: Publish a single Instagram image
//! - `POST /ig/post-carousel`: Publish an Instagram carousel
//! - `POST /ig/upload-reel`: Upload and publish an Instagram reel
//! - `POST /ig/hashtag-comments`: Comment on top media of a hashtag

use clap::Parser;
use graph_page_relay::cli::{ServerArgs, run_server_mode};

/// HTTP relay for Facebook and Instagram publishing
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to listen on (defaults to PORT env or 4000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (defaults to "::")
    #[arg(long)]
    host: Option<String>,

    /// Path to a configuration file
    #[arg(long)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    run_server_mode(ServerArgs {
        port: cli.port,
        host: cli.host,
        config: cli.config,
        verbose: cli.verbose,
    })
    .await
}
