//! Server mode CLI logic
//!
//! Contains the core logic for running the HTTP server mode.

use crate::{Settings, config::ConfigLoader, server::app, utils::version};
use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Arguments for server mode
#[derive(Debug)]
pub struct ServerArgs {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Run server mode with the given arguments
pub async fn run_server_mode(args: ServerArgs) -> Result<()> {
    // Load configuration FIRST, before initializing logging
    // This ensures we can use the logging.level from config file
    //
    // Configuration precedence:
    // 1. Command line arguments (highest priority)
    // 2. Environment variables
    // 3. Configuration file (from --config, GRAPH_RELAY_CONFIG or default location)
    // 4. Default values (lowest priority)
    let config_loader = ConfigLoader::new();

    // Determine config path: CLI arg > environment variable > default location
    let config_path = if let Some(config) = &args.config {
        Some(std::path::PathBuf::from(config))
    } else {
        ConfigLoader::get_config_path()
    };

    let mut settings = config_loader
        .load(config_path.as_deref())
        .unwrap_or_else(|e| {
            // Can't use tracing here since it's not initialized yet
            eprintln!(
                "Warning: Failed to load configuration: {}. Using defaults.",
                e
            );
            Settings::default()
        });

    // Override with CLI arguments if provided (highest priority)
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.logging.verbose = args.verbose;

    // Initialize logging with proper precedence:
    // 1. CLI --verbose flag (highest priority) -> debug level
    // 2. RUST_LOG environment variable
    // 3. Config file logging.level
    // 4. Default: info (lowest priority)
    let env_filter = if args.verbose {
        // CLI --verbose flag takes highest priority
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        // RUST_LOG environment variable takes second priority
        EnvFilter::from_default_env()
    } else {
        // Use config file logging.level or default to "info"
        EnvFilter::new(&settings.logging.level)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting relay server v{}", version::get_version());
    tracing::info!("Relaying to {}", settings.graph.base_url);

    // Create the Axum application
    let app = app::create_app(settings.clone());

    // Parse address, preferring IPv6 with an IPv4 fallback
    let addr = parse_and_bind_address(&settings.server.host, settings.server.port).await?;

    tracing::info!(
        "Relay server v{} listening on {}",
        version::get_version(),
        addr
    );

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse host string and attempt to bind to the address
///
/// Binding prefers the IPv6 any address; when the host has IPv6
/// disabled, it falls back to IPv4 any.
pub async fn parse_and_bind_address(host: &str, port: u16) -> Result<std::net::SocketAddr> {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

    // Try to parse as IP address first
    if let Ok(ip) = host.parse::<IpAddr>() {
        let addr = SocketAddr::new(ip, port);
        tracing::debug!("Parsed address: {}", addr);
        return Ok(addr);
    }

    // Handle special cases like "::" for IPv6 any
    match host {
        "::" => {
            let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port);
            tracing::debug!("Using IPv6 any address: {}", addr);

            // Test if we can bind to IPv6
            match tokio::net::TcpListener::bind(addr).await {
                Ok(_) => {
                    tracing::info!("Successfully bound to IPv6 address {}", addr);
                    Ok(addr)
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not listen on [::]:{} (Caused by {}), falling back to 0.0.0.0",
                        port,
                        e
                    );
                    let fallback_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
                    tracing::info!("Using IPv4 fallback address: {}", fallback_addr);
                    Ok(fallback_addr)
                }
            }
        }
        "0.0.0.0" => {
            let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
            tracing::info!("Using IPv4 any address: {}", addr);
            Ok(addr)
        }
        _ => {
            anyhow::bail!(
                "Invalid host address: {}. Use '::' for IPv6 or '0.0.0.0' for IPv4",
                host
            );
        }
    }
}
