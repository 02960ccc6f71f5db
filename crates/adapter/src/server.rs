//! TCP input listener.
//!
//! Every connected client may press buttons; bytes are decoded one at a time
//! and pushed into the game's bounded input queue without waiting. Milestone
//! lines from the game are broadcast back to every client.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::types::Button;

/// Listener configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Capacity of the input queue shared with the tick loop
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 12345,
            max_pending_commands: 64,
        }
    }
}

impl ServerConfig {
    /// Read `SHOOTER_INPUT_HOST`, `SHOOTER_INPUT_PORT` and
    /// `SHOOTER_INPUT_MAX_PENDING`, falling back to defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("SHOOTER_INPUT_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("SHOOTER_INPUT_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let max_pending_commands = env::var("SHOOTER_INPUT_MAX_PENDING")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_pending_commands);

        Self {
            host,
            port,
            max_pending_commands,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    /// `SHOOTER_INPUT_DISABLED=1|true` turns the listener off
    pub fn is_disabled() -> bool {
        std::env::var("SHOOTER_INPUT_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

/// Lines queued per client before a slow reader starts missing them
pub const CLIENT_OUTBOUND_CAPACITY: usize = 32;

struct ClientHandle {
    id: usize,
    tx: mpsc::Sender<String>,
}

#[derive(Default)]
struct ServerState {
    clients: RwLock<Vec<ClientHandle>>,
}

/// Accept clients until the runtime shuts down.
///
/// `ready_tx` receives the bound address once the socket is listening, which
/// lets callers bind port 0 and learn the real port.
pub async fn run_server(
    config: ServerConfig,
    button_tx: mpsc::Sender<Button>,
    mut out_rx: mpsc::UnboundedReceiver<String>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind input listener on {addr}"))?;
    let bound = listener.local_addr()?;
    info!(%bound, "input listener ready");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::default());

    // Outbound dispatcher
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(line) = out_rx.recv().await {
                let clients = state.clients.read().await;
                broadcast_line(&clients, &line);
            }
        });
    }

    let mut next_id = 0usize;
    loop {
        let (socket, peer) = listener.accept().await?;
        next_id += 1;
        let id = next_id;
        info!(client = id, %peer, "client connected");

        let state = Arc::clone(&state);
        let button_tx = button_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, id, Arc::clone(&state), button_tx).await {
                debug!(client = id, error = %e, "client error");
            }
            state.clients.write().await.retain(|c| c.id != id);
            info!(client = id, "client disconnected");
        });
    }
}

async fn handle_client(
    socket: TcpStream,
    id: usize,
    state: Arc<ServerState>,
    button_tx: mpsc::Sender<Button>,
) -> Result<()> {
    let (mut reader, mut writer) = socket.into_split();
    let (tx, mut rx) = mpsc::channel::<String>(CLIENT_OUTBOUND_CAPACITY);
    state.clients.write().await.push(ClientHandle { id, tx });

    let write_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
    });

    let mut buf = [0u8; 256];
    let result = loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break Ok(()),
            Ok(n) => n,
            Err(e) => break Err(e.into()),
        };
        if !forward_bytes(&buf[..n], id, &button_tx) {
            break Ok(());
        }
    };

    write_task.abort();
    result
}

/// Queue `line` for every client without waiting on any of them.
fn broadcast_line(clients: &[ClientHandle], line: &str) {
    for c in clients {
        match c.tx.try_send(line.to_string()) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(client = c.id, "client outbound queue full, dropping line");
            }
            // Writer already gone; the accept task removes the handle.
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }
}

/// Decode and enqueue; false once the game has stopped listening.
fn forward_bytes(bytes: &[u8], id: usize, button_tx: &mpsc::Sender<Button>) -> bool {
    for &b in bytes {
        let Some(button) = Button::from_byte(b) else {
            if !b.is_ascii_whitespace() {
                debug!(client = id, byte = b, "ignoring unknown input byte");
            }
            continue;
        };
        match button_tx.try_send(button) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(client = id, button = button.as_str(), "input queue full, dropping");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_arcade_port() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:12345");
    }

    #[test]
    fn bad_host_is_an_error() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn only_button_bytes_are_forwarded() {
        let (tx, mut rx) = mpsc::channel(8);
        assert!(forward_bytes(b"L x\nRU?", 1, &tx));
        let got: Vec<Button> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(got, vec![Button::Left, Button::Right, Button::Fire]);
    }

    #[test]
    fn full_queue_drops_but_keeps_reading() {
        let (tx, mut rx) = mpsc::channel(1);
        assert!(forward_bytes(b"LR", 1, &tx));
        assert_eq!(rx.try_recv().unwrap(), Button::Left);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_queue_stops_the_client() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        assert!(!forward_bytes(b"L", 1, &tx));
    }

    #[test]
    fn stalled_client_misses_lines_without_blocking_others() {
        let (slow_tx, mut slow_rx) = mpsc::channel(1);
        let (fast_tx, mut fast_rx) = mpsc::channel(4);
        let clients = vec![
            ClientHandle { id: 1, tx: slow_tx },
            ClientHandle { id: 2, tx: fast_tx },
        ];

        broadcast_line(&clients, "a\n");
        broadcast_line(&clients, "b\n");

        assert_eq!(slow_rx.try_recv().unwrap(), "a\n");
        assert!(slow_rx.try_recv().is_err());
        assert_eq!(fast_rx.try_recv().unwrap(), "a\n");
        assert_eq!(fast_rx.try_recv().unwrap(), "b\n");
    }

    #[test]
    fn departed_client_does_not_stop_the_broadcast() {
        let (gone_tx, gone_rx) = mpsc::channel(1);
        drop(gone_rx);
        let (tx, mut rx) = mpsc::channel(1);
        let clients = vec![ClientHandle { id: 1, tx: gone_tx }, ClientHandle { id: 2, tx }];
        broadcast_line(&clients, "x\n");
        assert_eq!(rx.try_recv().unwrap(), "x\n");
    }
}
