//! Peer link - a player's connection to the relay
//!
//! Bridges a game loop with the async socket. A reader task decodes inbound
//! lines into [`Message`]s; a writer task drains a bounded outbound queue.
//! Game loops that aren't async use [`PeerLink::connect_blocking`], which
//! starts and owns a tokio runtime for the link's tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::protocol::{decode_bytes, encode_line, read_frame, Frame, Message, MAX_LINE_BYTES};
use crate::relay::DEFAULT_PORT;

/// Client side configuration
#[derive(Debug, Clone)]
pub struct PeerConfig {
    pub host: String,
    pub port: u16,
    /// Display name announced in `player_info`
    pub name: String,
    pub queue_capacity: usize,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            name: "Player".to_string(),
            queue_capacity: 64,
        }
    }
}

impl PeerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("DUEL_RELAY_HOST").unwrap_or(defaults.host);
        let port = env::var("DUEL_RELAY_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let name = env::var("DUEL_PLAYER_NAME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.name);
        let queue_capacity = env::var("DUEL_RELAY_QUEUE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.queue_capacity);

        Self {
            host,
            port,
            name,
            queue_capacity,
        }
    }

    pub fn with_addr(mut self, addr: std::net::SocketAddr) -> Self {
        self.host = addr.ip().to_string();
        self.port = addr.port();
        self
    }

    pub fn relay_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Running connection to the relay
pub struct PeerLink {
    out_tx: mpsc::Sender<String>,
    in_rx: mpsc::UnboundedReceiver<Message>,
    connected: Arc<AtomicBool>,
    // Declared last so the channels close before the runtime shuts down.
    _rt: Option<Runtime>,
}

impl PeerLink {
    /// Connect from inside a tokio runtime
    pub async fn connect(config: &PeerConfig) -> anyhow::Result<Self> {
        let addr = config.relay_addr();
        let socket = TcpStream::connect(&addr)
            .await
            .with_context(|| format!("connecting to relay at {}", addr))?;
        if let Err(e) = socket.set_nodelay(true) {
            debug!("[Peer] nodelay: {}", e);
        }
        info!("[Peer] Connected to relay at {}", addr);

        let (reader, mut writer) = socket.into_split();
        let (out_tx, mut out_rx) = mpsc::channel::<String>(config.queue_capacity.max(1));
        let (in_tx, in_rx) = mpsc::unbounded_channel::<Message>();
        let connected = Arc::new(AtomicBool::new(true));

        tokio::spawn(async move {
            while let Some(line) = out_rx.recv().await {
                if writer.write_all(line.as_bytes()).await.is_err() {
                    break;
                }
                if writer.flush().await.is_err() {
                    break;
                }
            }
            let _ = writer.shutdown().await;
        });

        let reader_connected = Arc::clone(&connected);
        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = Vec::with_capacity(1024);
            loop {
                match read_frame(&mut reader, &mut line, MAX_LINE_BYTES).await {
                    Ok(Frame::Eof) => break,
                    Ok(Frame::Oversized) => {
                        debug!("[Peer] Ignoring line over {} bytes", MAX_LINE_BYTES);
                        continue;
                    }
                    Ok(Frame::Line) => {}
                    Err(e) => {
                        warn!("[Peer] Read error: {}", e);
                        break;
                    }
                }
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                let msg = decode_bytes(&line);
                if msg == Message::Unknown {
                    debug!("[Peer] Ignoring unreadable line");
                    continue;
                }
                if in_tx.send(msg).is_err() {
                    break;
                }
            }
            reader_connected.store(false, Ordering::Release);
            info!("[Peer] Relay connection closed");
        });

        Ok(Self {
            out_tx,
            in_rx,
            connected,
            _rt: None,
        })
    }

    /// Connect from synchronous code. The returned link owns its runtime.
    ///
    /// Must not be called from within an async context.
    pub fn connect_blocking(config: &PeerConfig) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("creating tokio runtime for peer link")?;
        let mut link = rt.block_on(Self::connect(config))?;
        link._rt = Some(rt);
        Ok(link)
    }

    /// Queue a message for the relay.
    ///
    /// A full queue drops the message; only a closed link is an error.
    pub fn send(&self, msg: &Message) -> anyhow::Result<()> {
        let line = encode_line(msg)?;
        match self.out_tx.try_send(line) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                warn!("[Peer] Outbound queue full, dropping {}", msg.kind());
                Ok(())
            }
            Err(TrySendError::Closed(_)) => Err(anyhow!("relay link closed")),
        }
    }

    pub fn send_all(&self, msgs: impl IntoIterator<Item = Message>) -> anyhow::Result<()> {
        for msg in msgs {
            self.send(&msg)?;
        }
        Ok(())
    }

    /// Next decoded message, if one has arrived
    pub fn try_recv(&mut self) -> Option<Message> {
        self.in_rx.try_recv().ok()
    }

    /// Wait for the next decoded message. `None` once the relay is gone and
    /// everything received has been drained.
    pub async fn recv(&mut self) -> Option<Message> {
        self.in_rx.recv().await
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}
