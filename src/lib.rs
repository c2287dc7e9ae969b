//! Duel Tetris (workspace facade crate).
//!
//! Re-exports the member crates as `duel_tetris::{core, netplay, types}` so
//! binaries, tests and benches depend on one package.

pub use duel_tetris_core as core;
pub use duel_tetris_netplay as netplay;
pub use duel_tetris_types as types;

/// Install the global `tracing` subscriber used by the binaries.
///
/// Filtering follows `RUST_LOG` and defaults to `info`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
