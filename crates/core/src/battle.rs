//! Local battle - two engines on one machine
//!
//! Both sides draw from identically seeded bags, so they see the same piece
//! sequence. Attacks produced by one side's locks are injected into the other
//! side on the same call. The battle ends as soon as either engine is over.

use crate::game_state::{EngineEvent, GameState};
use crate::types::GameAction;

/// One of the two players in a local battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalBattle {
    left: GameState,
    right: GameState,
    winner: Option<Side>,
}

impl LocalBattle {
    /// Two reference-size engines sharing `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            left: GameState::new(seed),
            right: GameState::new(seed),
            winner: None,
        }
    }

    pub fn with_dimensions(width: u8, height: u8, seed: u32) -> Self {
        Self {
            left: GameState::with_dimensions(width, height, seed),
            right: GameState::with_dimensions(width, height, seed),
            winner: None,
        }
    }

    pub fn start(&mut self) {
        self.left.start();
        self.right.start();
        self.route_events();
    }

    pub fn player(&self, side: Side) -> &GameState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn player_mut(&mut self, side: Side) -> &mut GameState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Advance both engines by the same elapsed time
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.is_over() {
            return false;
        }
        let left = self.left.tick(elapsed_ms);
        let right = self.right.tick(elapsed_ms);
        self.route_events();
        left || right
    }

    /// Apply one player's command
    ///
    /// Pause is shared: toggling it on one side toggles both.
    pub fn apply_action(&mut self, side: Side, action: GameAction) -> bool {
        if self.is_over() {
            return false;
        }
        let applied = match action {
            GameAction::Pause => {
                let toggled = self.left.apply_action(GameAction::Pause);
                self.right.apply_action(GameAction::Pause) && toggled
            }
            _ => self.player_mut(side).apply_action(action),
        };
        self.route_events();
        applied
    }

    /// Side that is still standing once the other has topped out or quit
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some() || (self.left.game_over() && self.right.game_over())
    }

    fn route_events(&mut self) {
        for side in [Side::Left, Side::Right] {
            let events = self.player_mut(side).drain_events();
            for event in events {
                match event {
                    EngineEvent::Attack { lines } => {
                        self.player_mut(side.opponent()).receive_garbage(lines);
                    }
                    EngineEvent::GameOver => {
                        if self.winner.is_none() && !self.player(side.opponent()).game_over() {
                            self.winner = Some(side.opponent());
                        }
                    }
                    EngineEvent::Locked { .. } => {}
                }
            }
        }
    }
}
