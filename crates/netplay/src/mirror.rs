//! Opponent mirror - read-only copy of the peer's visible state
//!
//! Each accepted `game_state` replaces the mirror wholesale; nothing is merged
//! or validated beyond shape, so the last message received always wins.

use crate::protocol::Message;
use crate::types::{Cell, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentMirror {
    width: u8,
    height: u8,
    name: Option<String>,
    board: Vec<u8>,
    hold: u8,
    next_queue: Vec<u8>,
    updates: u64,
}

impl OpponentMirror {
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            name: None,
            board: vec![0; width as usize * height as usize],
            hold: 0,
            next_queue: Vec::new(),
            updates: 0,
        }
    }

    /// Apply an inbound message. Returns true if the mirror changed.
    ///
    /// `game_state` with the wrong board size or out-of-range values is dropped.
    pub fn apply(&mut self, msg: &Message) -> bool {
        match msg {
            Message::PlayerInfo { name } => {
                self.name = Some(name.clone());
                true
            }
            Message::GameState {
                board,
                hold,
                next_queue,
            } => {
                if !msg.is_well_formed(self.width, self.height) {
                    return false;
                }
                self.board.clone_from(board);
                self.hold = *hold;
                self.next_queue.clone_from(next_queue);
                self.updates += 1;
                true
            }
            _ => false,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Row-major wire values as last received
    pub fn board(&self) -> &[u8] {
        &self.board
    }

    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return None;
        }
        Cell::from_u8(self.board[y as usize * self.width as usize + x as usize])
    }

    pub fn hold(&self) -> Option<PieceKind> {
        PieceKind::from_id(self.hold)
    }

    pub fn next_queue(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.next_queue.iter().filter_map(|&id| PieceKind::from_id(id))
    }

    /// Number of `game_state` messages accepted so far
    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }
}
