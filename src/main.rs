//! Match relay (default binary).
//!
//! Pairs two peers and forwards their lines. Configured through the
//! `DUEL_RELAY_*` environment variables; stops on Ctrl-C.

use anyhow::Result;
use tracing::info;

use duel_tetris::netplay::{run_relay, RelayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    duel_tetris::init_logging();

    let config = RelayConfig::from_env();
    tokio::select! {
        result = run_relay(config, None) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("[Relay] Shutting down");
            Ok(())
        }
    }
}
