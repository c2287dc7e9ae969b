//! Netplay module - keeps two independently running engines in sync
//!
//! Two players never share an engine. Each runs its own [`GameState`] and
//! streams what the other needs to draw it, plus attacks, through a relay
//! that only pairs connections and copies bytes.
//!
//! # Protocol Overview
//!
//! **Line-delimited JSON** over TCP, one object per line, tagged by `type`:
//!
//! | type | fields | sent by |
//! |------|--------|---------|
//! | `start` | - | relay, to both peers once two are connected |
//! | `player_info` | `name` | each peer after `start` |
//! | `game_state` | `board`, `hold`, `next_queue` | a peer whenever its engine changes |
//! | `attack` | `lines` | a peer that cleared two or more rows |
//! | `game_over` | - | a peer that topped out, or the relay when the opponent left |
//!
//! Unreadable lines are dropped without effect, as is any line longer than
//! [`MAX_LINE_BYTES`].
//!
//! # Components
//!
//! - [`protocol`]: message enum and line codec
//! - [`mirror`]: the opponent's board as last reported
//! - [`session`]: match phases around one local engine
//! - [`link`]: async/blocking client connection to the relay
//! - [`relay`]: the two-peer forwarding server
//!
//! # Environment Variables
//!
//! - `DUEL_RELAY_HOST`: relay bind address (default "0.0.0.0"), or the address
//!   peers connect to (default "127.0.0.1")
//! - `DUEL_RELAY_PORT`: port number (default: 12345)
//! - `DUEL_RELAY_QUEUE`: outbound queue length per connection (default: 64)
//! - `DUEL_RELAY_IDLE_SECS`: drop silent peers after this many seconds (unset: never)
//! - `DUEL_PLAYER_NAME`: name announced in `player_info` (default: "Player")
//!
//! # Testing
//!
//! Two netcat sessions are enough to see the relay work:
//!
//! ```bash
//! nc 127.0.0.1 12345
//! {"type":"attack","lines":2}
//! ```
//!
//! [`GameState`]: duel_tetris_core::GameState

pub mod link;
pub mod mirror;
pub mod protocol;
pub mod relay;
pub mod session;

pub use duel_tetris_core as core;
pub use duel_tetris_types as types;

pub use link::{PeerConfig, PeerLink};
pub use mirror::OpponentMirror;
pub use protocol::{
    decode_bytes, decode_line, encode_line, read_frame, Frame, Message, MAX_LINE_BYTES,
};
pub use relay::{run_relay, RelayConfig};
pub use session::{MatchPhase, Session};
