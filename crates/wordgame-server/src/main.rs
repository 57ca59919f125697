//! Word-guessing game server entry point.

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use wordgame_server::config::{Config, ListenMode};
use wordgame_server::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG controls log level, e.g. RUST_LOG=wordgame_server=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wordgame_server=info")),
        )
        .init();

    // `local` as the first argument selects the Unix-domain socket.
    let mode = ListenMode::from_arg(env::args().nth(1).as_deref());
    let config = Config::from_env(mode)?;

    info!(
        mode = ?config.mode,
        max_clients = config.max_clients,
        "starting wordgame-server"
    );

    server::run(config).await?;
    Ok(())
}
