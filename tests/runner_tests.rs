//! Runner tests - input queue, tick loop and dirty-pixel forwarding

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use matrix_shooter::core::{Controller, NullNotifier, Phase, ShooterConfig};
use matrix_shooter::engine::{input_channel, MemorySink, Runner};
use matrix_shooter::types::{Button, Rgb, DEFENDER_COLOR, GRID_ROWS};

fn runner(framerate: u32) -> (tokio::sync::mpsc::Sender<Button>, Runner<MemorySink>) {
    let config = ShooterConfig {
        seed: Some(11),
        framerate,
        ..Default::default()
    };
    let sink = MemorySink::new(config.pixel_width(), config.display_height());
    let controller = Controller::new(config, NullNotifier).unwrap();
    let (tx, rx) = input_channel();
    (tx, Runner::new(controller, rx, sink))
}

#[test]
fn test_first_frame_sends_whole_display() {
    let (_tx, mut r) = runner(15);
    let report = r.step().unwrap();
    assert!(report.redraw);
    assert_eq!(r.sink().pixel_writes, 8 * (GRID_ROWS + 1));
    assert_eq!(r.sink().presents, 1);
    assert!(r.sink().text.is_some());
}

#[test]
fn test_later_frames_send_only_changes() {
    let (tx, mut r) = runner(15);
    r.step().unwrap();
    let after_first = r.sink().pixel_writes;

    tx.try_send(Button::Fire).unwrap();
    r.step().unwrap();
    // Defender appears: two pixels in the last row.
    assert_eq!(r.sink().pixel_writes - after_first, 2);

    let col = r.controller().board().defender();
    assert_eq!(r.sink().get(col * 2, GRID_ROWS), Some(DEFENDER_COLOR));
    assert_eq!(r.sink().pixels(), r.controller().display().pixels());
}

#[test]
fn test_sink_mirrors_display_through_a_game() {
    let (tx, mut r) = runner(15);
    tx.try_send(Button::Fire).unwrap();
    for t in 0..400 {
        if t % 5 == 0 {
            let _ = tx.try_send(Button::Fire);
        }
        let report = r.step().unwrap();
        if report.redraw {
            assert_eq!(r.sink().pixels(), r.controller().display().pixels());
        }
    }
    assert!(r.sink().pixels().len() == 8 * (GRID_ROWS + 1));
}

#[test]
fn test_ending_clear_reaches_sink() {
    let (tx, mut r) = runner(15);
    tx.try_send(Button::Fire).unwrap();
    r.step().unwrap();
    r.controller_mut().board_mut().place_ship(0, GRID_ROWS - 2, 1);

    while r.controller().phase() == Phase::Playing {
        r.step().unwrap();
    }
    r.step().unwrap();
    assert!(r.sink().pixels()[8..].iter().all(|p| *p == Rgb::BLACK));
}

#[test]
fn test_status_follows_controller() {
    let (tx, mut r) = runner(15);
    r.step().unwrap();
    assert_eq!(r.sink().status.unwrap().phase, Phase::Idle);
    tx.try_send(Button::Left).unwrap();
    r.step().unwrap();
    let status = r.sink().status.unwrap();
    assert_eq!(status.phase, Phase::Playing);
    assert_eq!(status.level, 1);
    assert!(r.sink().text.is_none());
}

#[test]
fn test_run_stops_on_shutdown_flag() {
    let (tx, mut r) = runner(200);
    let shutdown = Arc::new(AtomicBool::new(false));
    let stopper = {
        let shutdown = Arc::clone(&shutdown);
        thread::spawn(move || {
            tx.blocking_send(Button::Fire).unwrap();
            thread::sleep(Duration::from_millis(100));
            shutdown.store(true, std::sync::atomic::Ordering::Relaxed);
        })
    };
    r.run(&shutdown).unwrap();
    stopper.join().unwrap();

    assert!(r.controller().ticks() > 0);
    assert_eq!(r.controller().phase(), Phase::Playing);
}
