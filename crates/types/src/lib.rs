//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the engine, the sync
//! protocol and the relay. All types are plain data with no external
//! dependencies, so they can be shared by the core logic, the network layer and
//! any rendering collaborator.
//!
//! # Board Dimensions
//!
//! The reference playfield is 10 columns by 20 rows. Engines can be built with
//! other dimensions, but both peers of a match must agree on them.
//!
//! # Cell Values
//!
//! Board cells travel over the wire as small integers:
//!
//! | Value | Meaning |
//! |-------|---------|
//! | 0 | empty |
//! | 1-7 | locked piece (I, O, T, S, Z, J, L) |
//! | 8 | garbage injected by an opponent attack |
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep used by the game loop |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity floor |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a landed piece locks |
//!
//! # Examples
//!
//! ```
//! use duel_tetris_types::{Cell, PieceKind, Rotation, GameAction};
//!
//! assert_eq!(PieceKind::from_id(1), Some(PieceKind::I));
//! assert_eq!(PieceKind::T.id(), 3);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Cell::from_u8(8), Some(Cell::Garbage));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! ```

/// Reference board width in cells
pub const BOARD_WIDTH: u8 = 10;

/// Reference board height in cells
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 100;

/// Fastest gravity interval
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lock delay once a falling piece is blocked (single window per landing)
pub const LOCK_DELAY_MS: u32 = 500;

/// Minimum length of the next-piece preview kept by the engine
pub const NEXT_QUEUE_LEN: usize = 5;

/// Number of preview entries carried in a `game_state` message
pub const WIRE_PREVIEW_LEN: usize = 3;

/// Points awarded per level for clearing 1..=4 rows in a single lock.
///
/// Index 0 is unused (no rows cleared).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Score needed per level step
pub const LEVEL_SCORE_STEP: u32 = 1000;

/// Wire value of a garbage cell
pub const GARBAGE_VALUE: u8 = 8;

/// The seven tetromino piece kinds
///
/// Wire ids follow declaration order starting at 1; 0 is reserved for "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Numeric id used on the board and on the wire (1..=7)
    pub fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. Returns `None` for 0 and anything above 7.
    ///
    /// ```
    /// use duel_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(7), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(8), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Display color as RGB, consumed by the opponent preview renderer
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 240, 240),
            PieceKind::O => (240, 240, 0),
            PieceKind::T => (160, 0, 240),
            PieceKind::S => (0, 240, 0),
            PieceKind::Z => (240, 0, 0),
            PieceKind::J => (0, 0, 240),
            PieceKind::L => (240, 160, 0),
        }
    }
}

/// Rotation states, numbered 0..=3 clockwise from the spawn orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use duel_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index 0..=3
    pub fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rotation::North),
            1 => Some(Rotation::East),
            2 => Some(Rotation::South),
            3 => Some(Rotation::West),
            _ => None,
        }
    }
}

/// A board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(PieceKind),
    Garbage,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Wire value (0 empty, 1..=7 piece, 8 garbage)
    pub fn as_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(kind) => kind.id(),
            Cell::Garbage => GARBAGE_VALUE,
        }
    }

    /// Parse a wire value. Anything above 8 is rejected.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            GARBAGE_VALUE => Some(Cell::Garbage),
            id => PieceKind::from_id(id).map(Cell::Piece),
        }
    }
}

/// Input commands delivered to an engine
///
/// How they are captured (keyboard, test script, bot) is not the engine's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop to the lowest legal row and lock immediately
    HardDrop,
    /// Rotate clockwise with a one-column wall kick
    Rotate,
    /// Store or swap the active piece (once per spawn)
    Hold,
    /// Toggle pause
    Pause,
    /// Forfeit the game
    Quit,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase names)
    ///
    /// ```
    /// use duel_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Quit => "quit",
        }
    }
}
