//! Standalone deck API server
//!
//! Usage: cargo run -p croupier_web --bin croupier-web-server -- --port 8080

use clap::Parser;
use croupier_web::server::{DEFAULT_HOST, DEFAULT_PORT};
use croupier_web::{LogFormat, ServerConfig, WebServer};

#[derive(Debug, Parser)]
#[command(name = "croupier-web-server", about = "HTTP API for creating and drawing from card decks")]
struct Args {
    /// Host or address to bind to
    #[arg(short = 'H', long, env = "CROUPIER_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind to
    #[arg(short, long, env = "CROUPIER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log output format: pretty or json
    #[arg(long, env = "CROUPIER_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    croupier_web::init_logging(args.log_format)?;

    let config = ServerConfig::new(args.host, args.port);
    tracing::info!(host = config.host(), port = config.port(), "starting croupier web server");

    let handle = WebServer::new(config).start().await?;
    println!("Server running at http://{}", handle.address());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down server");
    handle.shutdown().await?;
    Ok(())
}
