//! Adapter module - arcade controller input over TCP
//!
//! External controllers connect to a TCP socket and send single-byte
//! commands. The adapter decodes them into [`Button`](crate::types::Button)s
//! and queues them for the tick loop; it never touches game state itself.
//!
//! # Protocol
//!
//! ## Client → Server
//!
//! One byte per press, no framing:
//!
//! - `L`: move left
//! - `R`: move right
//! - `U`: fire (also starts a game)
//!
//! Anything else, including newlines, is ignored.
//!
//! ## Server → Client
//!
//! Milestones as line-delimited JSON (see [`protocol`]):
//!
//! ```text
//! {"type":"gameStarted"}
//! {"type":"scoreChanged","score":1,"level":1}
//! {"type":"gameOver","score":12}
//! ```
//!
//! # Environment Variables
//!
//! - `SHOOTER_INPUT_HOST`: Bind address (default: "127.0.0.1")
//! - `SHOOTER_INPUT_PORT`: Port number (default: 12345)
//! - `SHOOTER_INPUT_MAX_PENDING`: Input queue capacity (default: 64)
//! - `SHOOTER_INPUT_DISABLED`: Set to "1" or "true" to disable the listener
//!
//! # Testing
//!
//! ```bash
//! printf 'UUL' | nc 127.0.0.1 12345
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use matrix_shooter_core as core;
pub use matrix_shooter_types as types;

pub use protocol::NotificationMessage;
pub use runtime::{Adapter, BroadcastNotifier};
pub use server::{run_server, ServerConfig};
