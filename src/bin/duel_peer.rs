//! Headless peer for driving a match from a terminal or a script.
//!
//! Connects to the relay, waits for `start`, and plays one engine at a fixed
//! timestep. Commands arrive on stdin, one per line, by name (`moveLeft`,
//! `rotate`, `hardDrop`, ...). The outcome is printed when the match ends.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, warn};

use duel_tetris::netplay::{MatchPhase, PeerConfig, PeerLink, Session};
use duel_tetris::types::{GameAction, TICK_MS};

fn spawn_stdin_reader() -> mpsc::Receiver<GameAction> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match GameAction::from_str(trimmed) {
                Some(action) => {
                    if tx.send(action).is_err() {
                        break;
                    }
                }
                None => warn!("[Peer] Unknown command {:?}", trimmed),
            }
        }
    });
    rx
}

fn main() -> Result<()> {
    duel_tetris::init_logging();

    let config = PeerConfig::from_env();
    let mut link = PeerLink::connect_blocking(&config)?;
    let mut session = Session::new(config.name.clone(), rand::random::<u32>());
    let actions = spawn_stdin_reader();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    info!("[Peer] Waiting for an opponent as {}", session.name());

    loop {
        while let Some(msg) = link.try_recv() {
            session.handle_message(msg);
        }
        while let Ok(action) = actions.try_recv() {
            if !session.apply_action(action) {
                debug!("[Peer] {} had no effect", action.as_str());
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        link.send_all(session.drain_outbound())?;

        if session.phase().is_finished() {
            break;
        }
        if !link.is_connected() {
            warn!("[Peer] Relay went away");
            break;
        }

        thread::sleep(Duration::from_millis(1));
    }

    let opponent = session.mirror().name().unwrap_or("opponent").to_string();
    match session.phase() {
        MatchPhase::Won => println!("You beat {} with {} points", opponent, session.engine().score()),
        MatchPhase::Lost => println!("{} wins; you scored {}", opponent, session.engine().score()),
        _ => println!("Match abandoned"),
    }

    // Give the writer task a moment to flush the final game_over.
    thread::sleep(Duration::from_millis(50));
    Ok(())
}
