//! Protocol module - line-delimited JSON messages exchanged between peers
//!
//! Every message is one JSON object on one line with a `type` discriminator.
//! Decoding never fails: anything malformed, partial or of an unknown type
//! becomes [`Message::Unknown`], which every consumer treats as a no-op.

use std::io;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::core::GameSnapshot;
use crate::types::{PieceKind, GARBAGE_VALUE, WIRE_PREVIEW_LEN};

/// Longest line either end accepts, newline included. A full 127x127
/// `game_state` still fits.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Relay to both peers once the second one connects
    Start,
    /// Display name, sent by each peer right after `start`
    PlayerInfo { name: String },
    /// Full board with the falling piece merged in, row-major, values 0..=8
    GameState {
        board: Vec<u8>,
        hold: u8,
        next_queue: Vec<u8>,
    },
    /// Garbage rows for the receiver
    Attack { lines: u32 },
    /// Sender topped out or left; from the relay, the opponent disconnected
    GameOver,
    #[serde(other)]
    Unknown,
}

impl Message {
    /// Build the state message a peer sends after its engine changed
    pub fn game_state_from(snapshot: &GameSnapshot) -> Self {
        Message::GameState {
            board: snapshot.merged_board(),
            hold: snapshot.hold_id(),
            next_queue: snapshot
                .next_queue
                .iter()
                .take(WIRE_PREVIEW_LEN)
                .map(|kind| kind.id())
                .collect(),
        }
    }

    /// Wire name of the message type
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Start => "start",
            Message::PlayerInfo { .. } => "player_info",
            Message::GameState { .. } => "game_state",
            Message::Attack { .. } => "attack",
            Message::GameOver => "game_over",
            Message::Unknown => "unknown",
        }
    }

    /// Check the payload against a `width` x `height` board.
    ///
    /// Only `game_state` carries anything that can be out of range.
    pub fn is_well_formed(&self, width: u8, height: u8) -> bool {
        match self {
            Message::GameState {
                board,
                hold,
                next_queue,
            } => {
                board.len() == width as usize * height as usize
                    && board.iter().all(|&v| v <= GARBAGE_VALUE)
                    && (*hold == 0 || PieceKind::from_id(*hold).is_some())
                    && next_queue.len() <= WIRE_PREVIEW_LEN
                    && next_queue.iter().all(|&id| PieceKind::from_id(id).is_some())
            }
            Message::Unknown => false,
            _ => true,
        }
    }
}

/// Serialize one message followed by a newline
pub fn encode_line(msg: &Message) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(msg)?;
    line.push('\n');
    Ok(line)
}

/// Parse one received line. Surrounding whitespace is ignored.
pub fn decode_line(line: &str) -> Message {
    serde_json::from_str(line.trim()).unwrap_or(Message::Unknown)
}

/// Parse raw bytes as forwarded by the relay
pub fn decode_bytes(bytes: &[u8]) -> Message {
    match std::str::from_utf8(bytes) {
        Ok(line) => decode_line(line),
        Err(_) => Message::Unknown,
    }
}

/// Result of reading one newline-delimited line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// `buf` holds a line, newline included unless it was cut off by EOF
    Line,
    /// The line ran past the limit; it was consumed and discarded
    Oversized,
    Eof,
}

/// Read the next line into `buf`, holding at most `max` bytes of it.
///
/// An over-long line is skipped up to and including its newline, so the
/// stream stays in sync. Bytes are not checked for UTF-8 here.
pub async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>, max: usize) -> io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let read = (&mut *reader)
        .take(max as u64)
        .read_until(b'\n', buf)
        .await?;
    if read == 0 {
        return Ok(Frame::Eof);
    }
    if buf.last() == Some(&b'\n') || read < max {
        return Ok(Frame::Line);
    }

    buf.clear();
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                break;
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
    Ok(Frame::Oversized)
}
