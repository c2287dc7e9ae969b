//! TCP relay pairing two peers
//!
//! Accepts connections until two are present, tells both to `start`, then
//! forwards every line one peer sends to the other, byte for byte. The relay
//! never looks inside forwarded lines. When a peer leaves, the one left behind
//! is sent `game_over`. A third concurrent connection is closed on accept.
//!
//! Each connection gets a reader task and a writer task. Writes go through a
//! bounded queue per connection; a line that doesn't fit is dropped so a slow
//! peer can never stall the other one.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::protocol::{encode_line, read_frame, Frame, Message, MAX_LINE_BYTES};

/// Number of peers in a match
pub const MATCH_SIZE: usize = 2;

/// Relay port used when nothing else is configured
pub const DEFAULT_PORT: u16 = 12345;

/// Relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Capacity of each connection's outbound queue
    pub queue_capacity: usize,
    /// Disconnect peers that send nothing for this long
    pub idle_timeout: Option<Duration>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            queue_capacity: 64,
            idle_timeout: None,
        }
    }
}

impl RelayConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("DUEL_RELAY_HOST").unwrap_or(defaults.host);
        let port = env::var("DUEL_RELAY_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let queue_capacity = env::var("DUEL_RELAY_QUEUE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.queue_capacity);
        let idle_timeout = env::var("DUEL_RELAY_IDLE_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs);

        Self {
            host,
            port,
            queue_capacity,
            idle_timeout,
        }
    }

    /// Loopback config on an OS-assigned port
    pub fn ephemeral() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

struct PeerHandle {
    id: usize,
    addr: SocketAddr,
    tx: mpsc::Sender<Arc<[u8]>>,
}

/// Shared relay state
struct RelayState {
    peers: RwLock<Vec<PeerHandle>>,
    start_line: Arc<[u8]>,
    game_over_line: Arc<[u8]>,
    idle_timeout: Option<Duration>,
}

fn queue_line(peer: &PeerHandle, line: Arc<[u8]>) {
    match peer.tx.try_send(line) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            warn!("[Relay] Peer {} queue full, dropping line", peer.id);
        }
        Err(TrySendError::Closed(_)) => {
            debug!("[Relay] Peer {} writer gone, dropping line", peer.id);
        }
    }
}

/// Run the relay until the listener fails.
///
/// `ready_tx` receives the bound address once the socket is listening, which
/// lets callers bind port 0 and learn the real port.
pub async fn run_relay(
    config: RelayConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding relay to {}", bind_addr))?;
    let bound = listener.local_addr()?;
    info!("[Relay] Listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(RelayState {
        peers: RwLock::new(Vec::with_capacity(MATCH_SIZE)),
        start_line: Arc::from(encode_line(&Message::Start)?.into_bytes()),
        game_over_line: Arc::from(encode_line(&Message::GameOver)?.into_bytes()),
        idle_timeout: config.idle_timeout,
    });
    let queue_capacity = config.queue_capacity.max(1);
    let mut peer_id_counter = 0usize;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        peer_id_counter += 1;
        let peer_id = peer_id_counter;

        let (tx, rx) = mpsc::channel::<Arc<[u8]>>(queue_capacity);
        {
            let mut peers = state.peers.write().await;
            if peers.len() >= MATCH_SIZE {
                warn!(
                    "[Relay] Refusing peer {} from {}: match is full",
                    peer_id, addr
                );
                drop(socket);
                continue;
            }

            peers.push(PeerHandle {
                id: peer_id,
                addr,
                tx,
            });
            info!("[Relay] Peer {} connected from {}", peer_id, addr);

            if peers.len() == MATCH_SIZE {
                info!("[Relay] Both peers present, starting match");
                for peer in peers.iter() {
                    queue_line(peer, Arc::clone(&state.start_line));
                }
            }
        }

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_peer(socket, peer_id, state, rx).await {
                warn!("[Relay] Peer {} error: {}", peer_id, e);
            }
        });
    }
}

/// Drop a peer and tell whoever is left that the match is over
async fn remove_peer(state: &RelayState, peer_id: usize) {
    let mut peers = state.peers.write().await;
    let Some(pos) = peers.iter().position(|p| p.id == peer_id) else {
        return;
    };
    let gone = peers.remove(pos);
    info!("[Relay] Peer {} ({}) disconnected", gone.id, gone.addr);

    for peer in peers.iter() {
        info!("[Relay] Notifying peer {} that its opponent left", peer.id);
        queue_line(peer, Arc::clone(&state.game_over_line));
    }
}

/// Handle a single peer connection
async fn handle_peer(
    socket: TcpStream,
    peer_id: usize,
    state: Arc<RelayState>,
    rx: mpsc::Receiver<Arc<[u8]>>,
) -> anyhow::Result<()> {
    if let Err(e) = socket.set_nodelay(true) {
        debug!("[Relay] Peer {} nodelay: {}", peer_id, e);
    }
    let (reader, writer) = socket.into_split();

    let write_task = tokio::spawn(write_loop(writer, rx));
    let result = read_loop(reader, peer_id, &state).await;

    // Removing the handle closes the queue, which ends the writer.
    remove_peer(&state, peer_id).await;
    let _ = write_task.await;
    result
}

async fn write_loop(mut writer: OwnedWriteHalf, mut rx: mpsc::Receiver<Arc<[u8]>>) {
    while let Some(line) = rx.recv().await {
        if writer.write_all(&line).await.is_err() {
            break;
        }
        if writer.flush().await.is_err() {
            break;
        }
    }
    let _ = writer.shutdown().await;
}

async fn read_loop(
    reader: OwnedReadHalf,
    peer_id: usize,
    state: &RelayState,
) -> anyhow::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    loop {
        let frame = read_frame(&mut reader, &mut buf, MAX_LINE_BYTES);
        let frame = match state.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, frame).await {
                Ok(read) => read?,
                Err(_) => {
                    info!("[Relay] Peer {} idle for {:?}, closing", peer_id, limit);
                    break;
                }
            },
            None => frame.await?,
        };

        match frame {
            // Peer disconnected
            Frame::Eof => break,
            Frame::Oversized => {
                warn!(
                    "[Relay] Peer {} sent a line over {} bytes, dropping it",
                    peer_id, MAX_LINE_BYTES
                );
                continue;
            }
            Frame::Line => {}
        }
        // A final line cut off by EOF is still forwarded as a whole line.
        if buf.last() != Some(&b'\n') {
            buf.push(b'\n');
        }

        let line: Arc<[u8]> = Arc::from(buf.as_slice());
        let peers = state.peers.read().await;
        for peer in peers.iter().filter(|p| p.id != peer_id) {
            queue_line(peer, Arc::clone(&line));
        }
    }

    Ok(())
}
