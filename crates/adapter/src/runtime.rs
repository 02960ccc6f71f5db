//! Adapter runtime integration.
//!
//! Bridges the synchronous tick loop with the async TCP listener. The
//! adapter owns its own tokio runtime, so the game thread never awaits.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

use crate::core::{Milestone, Notifier};
use crate::protocol::NotificationMessage;
use crate::server::{run_server, ServerConfig};
use crate::types::Button;

/// Running listener.
pub struct Adapter {
    _rt: Runtime,
    local_addr: SocketAddr,
    out_tx: mpsc::UnboundedSender<String>,
}

impl Adapter {
    /// Bind and start accepting; returns once the socket is listening.
    pub fn start(config: ServerConfig, button_tx: mpsc::Sender<Button>) -> Result<Self> {
        let (out_tx, out_rx) = mpsc::unbounded_channel::<String>();
        let (ready_tx, ready_rx) = oneshot::channel();

        let rt = Runtime::new().context("failed to create adapter runtime")?;
        let server = rt.spawn(async move {
            let result = run_server(config, button_tx, out_rx, Some(ready_tx)).await;
            if let Err(e) = &result {
                error!(error = %e, "input listener stopped");
            }
            result
        });

        let local_addr = match rt.block_on(ready_rx) {
            Ok(addr) => addr,
            // Sender dropped before binding: surface the bind error.
            Err(_) => {
                return Err(match rt.block_on(server) {
                    Ok(Err(e)) => e,
                    Ok(Ok(())) => anyhow::anyhow!("input listener exited before binding"),
                    Err(e) => anyhow::Error::new(e).context("input listener panicked"),
                })
            }
        };

        Ok(Self {
            _rt: rt,
            local_addr,
            out_tx,
        })
    }

    /// Start from `SHOOTER_INPUT_*`; `None` when disabled.
    pub fn start_from_env(button_tx: mpsc::Sender<Button>) -> Result<Option<Self>> {
        if ServerConfig::is_disabled() {
            return Ok(None);
        }
        Self::start(ServerConfig::from_env(), button_tx).map(Some)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Notifier that broadcasts milestones to connected clients
    pub fn notifier(&self) -> BroadcastNotifier {
        BroadcastNotifier {
            out_tx: self.out_tx.clone(),
        }
    }
}

/// Sends each milestone as a JSON line to every client.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    out_tx: mpsc::UnboundedSender<String>,
}

impl BroadcastNotifier {
    pub fn new(out_tx: mpsc::UnboundedSender<String>) -> Self {
        Self { out_tx }
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&mut self, milestone: Milestone) {
        let line = match NotificationMessage::from(milestone).to_line() {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to encode notification");
                return;
            }
        };
        if self.out_tx.send(line).is_err() {
            warn!(?milestone, "notification dropped, listener is gone");
        }
    }
}
