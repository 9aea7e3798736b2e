//! Terminal group chat client.
//!
//! Connects to a chat server, logs in with a username and lets you join
//! groups and chat in them. Any disconnect returns to the login prompt.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-client
//! cargo run --bin kaiwa-client -- --username alice --url ws://localhost:8765
//! ```

use clap::Parser;

use kaiwa_client::{ClientConfig, run_client, runner::DEFAULT_URL};
use kaiwa_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kaiwa-client")]
#[command(about = "Terminal group chat client over WebSocket", long_about = None)]
struct Args {
    /// Username for the first login (asked interactively when omitted)
    #[arg(short = 'n', long)]
    username: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = DEFAULT_URL)]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME")], "info");

    let args = Args::parse();

    let config = ClientConfig {
        url: args.url,
        username: args.username,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
