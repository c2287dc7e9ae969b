//! Online session - one local engine plus the opponent mirror
//!
//! The session is transport-agnostic and synchronous. Feed it inbound
//! messages with [`Session::handle_message`], local input with
//! [`Session::apply_action`] and time with [`Session::tick`], then send
//! whatever [`Session::drain_outbound`] returns.

use tracing::info;

use crate::core::{EngineEvent, GameState};
use crate::mirror::OpponentMirror;
use crate::protocol::Message;
use crate::types::{GameAction, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchPhase {
    /// Connected, waiting for the relay's `start`
    WaitingForOpponent,
    Playing,
    /// The opponent topped out, quit or disconnected
    Won,
    /// The local engine topped out or quit
    Lost,
}

impl MatchPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, MatchPhase::Won | MatchPhase::Lost)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    name: String,
    engine: GameState,
    mirror: OpponentMirror,
    phase: MatchPhase,
    outbound: Vec<Message>,
}

impl Session {
    /// Reference-size session for a player called `name`
    pub fn new(name: impl Into<String>, seed: u32) -> Self {
        Self::with_engine(name, GameState::with_dimensions(BOARD_WIDTH, BOARD_HEIGHT, seed))
    }

    /// Wrap an engine that has not been started yet
    pub fn with_engine(name: impl Into<String>, engine: GameState) -> Self {
        let board = engine.board();
        let mirror = OpponentMirror::new(board.width(), board.height());
        Self {
            name: name.into(),
            engine,
            mirror,
            phase: MatchPhase::WaitingForOpponent,
            outbound: Vec::new(),
        }
    }

    /// React to a message from the relay or the opponent
    pub fn handle_message(&mut self, msg: Message) -> bool {
        match msg {
            Message::Start => {
                if self.phase != MatchPhase::WaitingForOpponent {
                    return false;
                }
                info!("[Peer] Match started");
                self.phase = MatchPhase::Playing;
                self.outbound.push(Message::PlayerInfo {
                    name: self.name.clone(),
                });
                self.engine.start();
                self.after_engine_change(true);
                true
            }
            Message::PlayerInfo { .. } | Message::GameState { .. } => self.mirror.apply(&msg),
            Message::Attack { lines } => {
                if self.phase != MatchPhase::Playing {
                    return false;
                }
                let injected = self.engine.receive_garbage(lines);
                self.after_engine_change(injected > 0);
                injected > 0
            }
            Message::GameOver => {
                if self.phase != MatchPhase::Playing {
                    return false;
                }
                info!("[Peer] Opponent is out, match won");
                self.phase = MatchPhase::Won;
                true
            }
            Message::Unknown => false,
        }
    }

    /// Apply a local command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        let changed = self.engine.apply_action(action);
        self.after_engine_change(changed);
        changed
    }

    /// Advance the local engine
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        let changed = self.engine.tick(elapsed_ms);
        self.after_engine_change(changed);
        changed
    }

    /// Messages queued for the opponent since the last drain, oldest first
    pub fn drain_outbound(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbound)
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn engine(&self) -> &GameState {
        &self.engine
    }

    pub fn mirror(&self) -> &OpponentMirror {
        &self.mirror
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue the state push and forward engine events.
    ///
    /// State goes first so the opponent sees the board that produced the attack.
    fn after_engine_change(&mut self, changed: bool) {
        let events = self.engine.drain_events();
        if changed || !events.is_empty() {
            self.outbound
                .push(Message::game_state_from(&self.engine.snapshot()));
        }

        for event in events {
            match event {
                EngineEvent::Attack { lines } => {
                    self.outbound.push(Message::Attack { lines });
                }
                EngineEvent::GameOver => {
                    if self.phase == MatchPhase::Playing {
                        info!("[Peer] Local engine is out, match lost");
                        self.phase = MatchPhase::Lost;
                        self.outbound.push(Message::GameOver);
                    }
                }
                EngineEvent::Locked { .. } => {}
            }
        }
    }
}
