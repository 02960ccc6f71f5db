//! Milestone notifications.
//!
//! The controller reports game start, every kill, and game over to a
//! [`Notifier`]. Notifiers are fire-and-forget: they must return promptly and
//! must never fail the tick loop. Delivery problems are theirs to log.

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    GameStarted,
    ScoreChanged { score: u32, level: u32 },
    GameOver { score: u32 },
}

pub trait Notifier {
    fn notify(&mut self, milestone: Milestone);
}

/// Drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _milestone: Milestone) {}
}

/// Writes milestones to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, milestone: Milestone) {
        match milestone {
            Milestone::GameStarted => info!("game started"),
            Milestone::ScoreChanged { score, level } => info!(score, level, "score"),
            Milestone::GameOver { score } => info!(score, "game over"),
        }
    }
}

/// Collects milestones in memory (tests, replays)
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub events: std::sync::Arc<std::sync::Mutex<Vec<Milestone>>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<Milestone> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, milestone: Milestone) {
        if let Ok(mut events) = self.events.lock() {
            events.push(milestone);
        }
    }
}

/// Fan out to several notifiers
#[derive(Default)]
pub struct FanoutNotifier {
    targets: Vec<Box<dyn Notifier + Send>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: impl Notifier + Send + 'static) -> Self {
        self.targets.push(Box::new(target));
        self
    }
}

impl Notifier for FanoutNotifier {
    fn notify(&mut self, milestone: Milestone) {
        for target in &mut self.targets {
            target.notify(milestone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_shares_events_across_clones() {
        let rec = RecordingNotifier::default();
        let mut handle = rec.clone();
        handle.notify(Milestone::GameStarted);
        handle.notify(Milestone::GameOver { score: 3 });
        assert_eq!(
            rec.events(),
            vec![Milestone::GameStarted, Milestone::GameOver { score: 3 }]
        );
    }

    #[test]
    fn fanout_reaches_every_target() {
        let a = RecordingNotifier::default();
        let b = RecordingNotifier::default();
        let mut fan = FanoutNotifier::new().with(a.clone()).with(b.clone());
        fan.notify(Milestone::ScoreChanged { score: 1, level: 1 });
        assert_eq!(a.events().len(), 1);
        assert_eq!(b.events().len(), 1);
    }
}
