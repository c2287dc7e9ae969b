//! Game state module - one player's engine
//!
//! Ties together the board, the shape catalog, the bag and scoring. The engine
//! is driven by two inputs only: `tick(elapsed_ms)` for gravity and lock delay,
//! and `apply_action` for player commands. Both run on the caller's loop, so
//! there is no interior locking.
//!
//! Phases: `Falling` → (blocked on a gravity step) `LockPending` → lock →
//! spawn → `Falling`, with `GameOver` terminal and pause freezing everything.
//! Spawning and locking happen inside a single call and are never observed
//! from outside.

use std::collections::VecDeque;

use crate::board::Board;
use crate::pieces::{cells_of, spawn_anchor, WALL_KICKS};
use crate::rng::{Bag, SimpleRng};
use crate::scoring::{attack_for_lines, drop_interval_ms, level_for_score, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Mixed into the seed so garbage holes don't mirror the bag shuffle
const GARBAGE_SEED_SALT: u32 = 0x9E37_79B9;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor of a board `width` wide
    pub fn spawn(kind: PieceKind, width: u8) -> Self {
        let (x, y) = spawn_anchor(width);
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> [(i8, i8); 4] {
        cells_of(self.kind, self.rotation)
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(self.kind, self.rotation, self.x, self.y)
    }

    fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

/// Externally visible engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnginePhase {
    /// Constructed but `start` not called yet
    NotStarted,
    Falling,
    /// Blocked below; the piece locks when the delay runs out
    LockPending,
    Paused,
    GameOver,
}

/// Something the session layer has to react to, drained after each call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A piece was written to the board
    Locked { lines_cleared: u32, score_delta: u32 },
    /// Garbage rows owed to the opponent
    Attack { lines: u32 },
    /// The engine topped out or forfeited
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NotStarted,
    Falling,
    LockPending { remaining_ms: u32 },
    GameOver,
}

/// Complete engine state for one player
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    can_hold: bool,
    next_queue: VecDeque<PieceKind>,
    bag: Bag,
    garbage_rng: SimpleRng,
    seed: u32,
    score: u32,
    level: u32,
    lines: u32,
    drop_timer_ms: u32,
    phase: Phase,
    paused: bool,
    events: Vec<EngineEvent>,
}

impl GameState {
    /// Create a new 10x20 game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_dimensions(BOARD_WIDTH, BOARD_HEIGHT, seed)
    }

    /// Create a game on a board of custom size
    pub fn with_dimensions(width: u8, height: u8, seed: u32) -> Self {
        let mut state = Self {
            board: Board::new(width, height),
            active: None,
            hold: None,
            can_hold: true,
            next_queue: VecDeque::with_capacity(NEXT_QUEUE_LEN + 1),
            bag: Bag::new(seed),
            garbage_rng: SimpleRng::new(seed ^ GARBAGE_SEED_SALT),
            seed,
            score: 0,
            level: level_for_score(0),
            lines: 0,
            drop_timer_ms: 0,
            phase: Phase::NotStarted,
            paused: false,
            events: Vec::new(),
        };
        state.refill_preview();
        state
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            return;
        }
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::NotStarted
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_queue(&self) -> &VecDeque<PieceKind> {
        &self.next_queue
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> EnginePhase {
        match self.phase {
            Phase::GameOver => EnginePhase::GameOver,
            Phase::NotStarted => EnginePhase::NotStarted,
            _ if self.paused => EnginePhase::Paused,
            Phase::Falling => EnginePhase::Falling,
            Phase::LockPending { .. } => EnginePhase::LockPending,
        }
    }

    /// Get current drop interval based on level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            board: self.board.to_u8_vec(),
            active: self.active.map(ActiveSnapshot::from),
            hold: self.hold,
            next_queue: self.next_queue.iter().copied().collect(),
            can_hold: self.can_hold,
            paused: self.paused,
            game_over: self.game_over(),
            phase: self.phase(),
            score: self.score,
            level: self.level,
            lines: self.lines,
            drop_interval_ms: self.drop_interval_ms(),
        }
    }

    fn refill_preview(&mut self) {
        while self.next_queue.len() < NEXT_QUEUE_LEN {
            self.next_queue.push_back(self.bag.take());
        }
    }

    fn top_out(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        self.active = None;
        self.events.push(EngineEvent::GameOver);
    }

    /// Pieces only react to commands and gravity while actually in play
    fn in_play(&self) -> bool {
        !self.paused
            && matches!(self.phase, Phase::Falling | Phase::LockPending { .. })
            && self.active.is_some()
    }

    /// Spawn a new piece from the preview queue
    pub fn spawn_piece(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }

        self.refill_preview();
        let Some(kind) = self.next_queue.pop_front() else {
            return false;
        };
        self.refill_preview();

        let piece = Tetromino::spawn(kind, self.board.width());
        self.can_hold = true;
        self.drop_timer_ms = 0;

        if !piece.fits(&self.board) {
            self.top_out();
            return false;
        }

        self.active = Some(piece);
        self.phase = Phase::Falling;
        true
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.in_play() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if !moved.fits(&self.board) {
            return false;
        }
        self.active = Some(moved);

        // Sliding off a ledge and dropping again puts the piece back under gravity.
        if dy > 0 {
            self.phase = Phase::Falling;
        }
        true
    }

    /// Rotate clockwise: in place, then one column right, then one column left
    pub(crate) fn try_rotate(&mut self) -> bool {
        if !self.in_play() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotation = active.rotation.rotate_cw();
        for dx in WALL_KICKS {
            let candidate = Tetromino {
                rotation,
                x: active.x + dx,
                ..active
            };
            if candidate.fits(&self.board) {
                self.active = Some(candidate);
                return true;
            }
        }

        false
    }

    /// Swap active piece with hold piece
    pub fn hold(&mut self) -> bool {
        if !self.can_hold || !self.in_play() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            Some(held) => {
                let piece = Tetromino::spawn(held, self.board.width());
                self.drop_timer_ms = 0;
                self.phase = Phase::Falling;
                if !piece.fits(&self.board) {
                    self.can_hold = false;
                    self.top_out();
                    return false;
                }
                self.active = Some(piece);
            }
            None => {
                self.active = None;
                if !self.spawn_piece() {
                    return false;
                }
            }
        }

        self.can_hold = false;
        true
    }

    /// Hard drop the active piece to the bottom and lock it.
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.in_play() {
            return 0;
        }
        let mut distance = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.lock_piece();
        distance
    }

    /// Lock the active piece onto the board and handle line clears
    ///
    /// If the piece can still fall the lock is cancelled and gravity resumes.
    pub fn lock_piece(&mut self) {
        if !self.in_play() {
            return;
        }
        let Some(active) = self.active else {
            return;
        };

        if active.shifted(0, 1).fits(&self.board) {
            self.phase = Phase::Falling;
            self.drop_timer_ms = 0;
            return;
        }

        // Pushed into occupied cells by garbage and never resolved.
        if !active.fits(&self.board) {
            self.top_out();
            return;
        }

        self.board
            .place(active.kind, active.rotation, active.x, active.y);
        self.active = None;

        let lines_cleared = self.board.clear_full_rows();
        let score_delta = line_clear_score(lines_cleared, self.level);
        self.score = self.score.saturating_add(score_delta);
        self.lines += lines_cleared as u32;
        self.level = level_for_score(self.score);

        self.events.push(EngineEvent::Locked {
            lines_cleared: lines_cleared as u32,
            score_delta,
        });
        let attack = attack_for_lines(lines_cleared);
        if attack > 0 {
            self.events.push(EngineEvent::Attack { lines: attack });
        }

        self.spawn_piece();
    }

    /// Apply an opponent attack: push `lines` garbage rows in from the bottom.
    ///
    /// If the active piece now overlaps the board it is moved up by the same
    /// amount. That correction is not re-checked; an unresolved overlap ends
    /// the game at the next lock. Returns the rows actually injected.
    pub fn receive_garbage(&mut self, lines: u32) -> u32 {
        if !self.started() || self.game_over() {
            return 0;
        }
        let injected = self
            .board
            .inject_garbage(lines as usize, &mut self.garbage_rng);

        if let Some(active) = self.active {
            if !active.fits(&self.board) {
                let push = i8::try_from(injected).unwrap_or(i8::MAX);
                self.active = Some(active.shifted(0, -push));
            }
        }
        injected as u32
    }

    /// Main game tick - advance gravity or the lock countdown.
    /// Returns true when the visible state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.in_play() {
            return false;
        }

        match self.phase {
            Phase::Falling => {
                let interval = self.drop_interval_ms();
                self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);

                let mut changed = false;
                while self.drop_timer_ms >= interval {
                    self.drop_timer_ms -= interval;
                    if !self.try_move(0, 1) {
                        self.phase = Phase::LockPending {
                            remaining_ms: LOCK_DELAY_MS,
                        };
                        self.drop_timer_ms = 0;
                        break;
                    }
                    changed = true;
                }
                changed
            }
            Phase::LockPending { remaining_ms } => {
                if elapsed_ms >= remaining_ms {
                    self.lock_piece();
                    true
                } else {
                    self.phase = Phase::LockPending {
                        remaining_ms: remaining_ms - elapsed_ms,
                    };
                    false
                }
            }
            Phase::NotStarted | Phase::GameOver => false,
        }
    }

    /// Apply a game action. Illegal moves return false and change nothing.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if !self.started() || self.game_over() {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Quit => {
                if self.game_over() {
                    return false;
                }
                self.top_out();
                true
            }
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::HardDrop => {
                if !self.in_play() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.try_rotate(),
            GameAction::Hold => self.hold(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
