//! Terminal matrix shooter (default binary).
//!
//! Emulates the LED matrix in the terminal, takes keyboard input, and
//! listens for arcade controller bytes on TCP at the same time. Both input
//! sources feed one bounded queue that the tick loop drains.

use std::fs::OpenOptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tracing::{info, warn};

use matrix_shooter::adapter::{Adapter, ServerConfig};
use matrix_shooter::core::{Controller, FanoutNotifier, LogNotifier, ShooterConfig};
use matrix_shooter::engine::{input_channel_with_capacity, Runner};
use matrix_shooter::input::{handle_key_event, should_quit};
use matrix_shooter::term::TerminalSink;
use matrix_shooter::types::Button;

/// How often the keyboard thread rechecks the shutdown flag
const KEY_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    init_tracing()?;

    let config = ShooterConfig::from_env().context("invalid shooter configuration")?;
    let server_config = ServerConfig::from_env();
    let (input_tx, input_rx) = input_channel_with_capacity(server_config.max_pending_commands);

    let adapter = if ServerConfig::is_disabled() {
        info!("tcp input disabled");
        None
    } else {
        match Adapter::start(server_config, input_tx.clone()) {
            Ok(adapter) => Some(adapter),
            Err(e) => {
                // Keyboard play still works without the listener.
                warn!(error = %e, "tcp input unavailable");
                None
            }
        }
    };

    let mut notifier = FanoutNotifier::new().with(LogNotifier);
    if let Some(adapter) = &adapter {
        info!(addr = %adapter.local_addr(), "tcp input listening");
        notifier = notifier.with(adapter.notifier());
    }

    let controller = Controller::new(config, notifier)?;
    let mut sink = TerminalSink::new(
        controller.config().pixel_width(),
        controller.config().display_height(),
    );
    sink.enter()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let keyboard = {
        let shutdown = Arc::clone(&shutdown);
        thread::spawn(move || read_keyboard(input_tx, &shutdown))
    };

    let mut runner = Runner::new(controller, input_rx, sink);
    let result = runner.run(&shutdown);
    shutdown.store(true, Ordering::Relaxed);

    let (controller, mut sink) = runner.into_parts();
    sink.exit()?;

    match keyboard.join() {
        Ok(Err(e)) => warn!(error = %e, "keyboard reader failed"),
        Err(_) => warn!("keyboard reader panicked"),
        Ok(Ok(())) => {}
    }
    info!(score = controller.score(), ticks = controller.ticks(), "bye");
    drop(adapter);
    result
}

/// Forward key presses until quit is pressed or the loop stops.
fn read_keyboard(tx: mpsc::Sender<Button>, shutdown: &AtomicBool) -> Result<()> {
    while !shutdown.load(Ordering::Relaxed) {
        if !event::poll(KEY_POLL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if should_quit(key) {
            shutdown.store(true, Ordering::Relaxed);
            break;
        }
        if let Some(button) = handle_key_event(key) {
            if let Err(mpsc::error::TrySendError::Full(_)) = tx.try_send(button) {
                warn!(button = button.as_str(), "input queue full, dropping key");
            }
        }
    }
    Ok(())
}

/// Log to `SHOOTER_LOG_PATH` (the terminal belongs to the game).
///
/// Without a path nothing is installed and logging is off.
fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var_os("SHOOTER_LOG_PATH").filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.to_string_lossy()))?;
    let writer = Mutex::new(file);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}
