//! Terminal layout of a live game

use matrix_shooter::core::{Controller, NullNotifier, ShooterConfig};
use matrix_shooter::engine::{FrameForwarder, PresentationSink};
use matrix_shooter::term::{MatrixScreen, MatrixView, Viewport};
use matrix_shooter::types::{Button, DEFENDER_COLOR};

/// Adapts a bare `MatrixScreen` so the forwarder can fill it
struct ScreenSink(MatrixScreen);

impl PresentationSink for ScreenSink {
    fn set_pixel(&mut self, x: usize, y: usize, color: matrix_shooter::types::Rgb) {
        self.0.set_pixel(x, y, color);
    }

    fn set_overlay(
        &mut self,
        text: Option<&matrix_shooter::core::ScrollText>,
        status: matrix_shooter::core::Status,
    ) {
        self.0.set_overlay(text, status);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn test_defender_is_rendered_as_blocks_in_the_box() {
    let config = ShooterConfig {
        seed: Some(1),
        ..Default::default()
    };
    let mut c = Controller::new(config, NullNotifier).unwrap();
    c.on_button(Button::Fire);
    c.board_mut().set_defender(0);
    c.tick();

    let mut sink = ScreenSink(MatrixScreen::new(8, 15));
    FrameForwarder::new()
        .forward(c.display(), c.overlay_text().as_ref(), c.status(), &mut sink)
        .unwrap();

    let view = MatrixView::default();
    let (box_w, box_h) = view.box_size(&sink.0);
    assert_eq!((box_w, box_h), (18, 17));

    let fb = view.render(&sink.0, Viewport::new(box_w, box_h + 3));
    // Bottom matrix row is y = 15 inside the border; pixel 0 spans 4 columns.
    for x in 1..5 {
        let cell = fb.get(x, 15).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, DEFENDER_COLOR);
    }
    assert_eq!(fb.get(5, 15).unwrap().ch, ' ');
    assert_eq!(fb.get(0, 15).unwrap().ch, '│');
}

#[test]
fn test_idle_shows_play_ticker_and_prompt() {
    let config = ShooterConfig {
        seed: Some(1),
        ..Default::default()
    };
    let mut c = Controller::new(config, NullNotifier).unwrap();
    // Scroll until the text is fully inside the 16-column window.
    while c.overlay_text().map(|t| t.position) != Some(-4) {
        c.tick();
    }

    let mut screen = MatrixScreen::new(8, 15);
    screen.set_overlay(c.overlay_text().as_ref(), c.status());
    let fb = MatrixView::default().render(&screen, Viewport::new(18, 20));

    let ticker: String = (0..18).map(|x| fb.get(x, 17).unwrap().ch).collect();
    assert!(ticker.contains("P L A Y"), "ticker was {ticker:?}");
    let status: String = (0..18).map(|x| fb.get(x, 18).unwrap().ch).collect();
    assert!(status.contains("PRESS ANY KEY"));
}
