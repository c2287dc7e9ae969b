//! Read-only copies of engine state handed to renderers and the sync codec.
//!
//! The live board never leaves the engine; collaborators get a `GameSnapshot`
//! so drawing or encoding can't race with a lock or line clear.

use crate::game_state::{EnginePhase, Tetromino};
use crate::pieces::cells_of;
use crate::types::{PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Locked cells only, row-major wire values
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub hold: Option<PieceKind>,
    pub next_queue: Vec<PieceKind>,
    pub can_hold: bool,
    pub paused: bool,
    pub game_over: bool,
    pub phase: EnginePhase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    /// Board with the falling piece painted in, as sent to the opponent.
    ///
    /// Minos above the top edge are skipped.
    pub fn merged_board(&self) -> Vec<u8> {
        let mut out = self.board.clone();
        if let Some(active) = self.active {
            for (dx, dy) in cells_of(active.kind, active.rotation) {
                let x = active.x + dx;
                let y = active.y + dy;
                if x < 0 || y < 0 || x >= self.width as i8 || y >= self.height as i8 {
                    continue;
                }
                out[y as usize * self.width as usize + x as usize] = active.kind.id();
            }
        }
        out
    }

    /// Hold slot as a wire id (0 = empty)
    pub fn hold_id(&self) -> u8 {
        self.hold.map(PieceKind::id).unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
