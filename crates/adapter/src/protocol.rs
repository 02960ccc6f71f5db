//! Wire formats for the adapter.
//!
//! Inbound traffic is raw bytes from the arcade controller (`L`, `R`, `U`),
//! decoded by [`Button::from_byte`](crate::types::Button::from_byte).
//! Outbound traffic is one JSON object per line.

use serde::{Deserialize, Serialize};

use crate::core::Milestone;

/// Milestone broadcast to every connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NotificationMessage {
    GameStarted,
    ScoreChanged { score: u32, level: u32 },
    GameOver { score: u32 },
}

impl From<Milestone> for NotificationMessage {
    fn from(m: Milestone) -> Self {
        match m {
            Milestone::GameStarted => Self::GameStarted,
            Milestone::ScoreChanged { score, level } => Self::ScoreChanged { score, level },
            Milestone::GameOver { score } => Self::GameOver { score },
        }
    }
}

impl NotificationMessage {
    /// Serialize as a newline-terminated JSON line.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_line_matches_wire_format() {
        let line = NotificationMessage::from(Milestone::GameOver { score: 12 })
            .to_line()
            .unwrap();
        assert_eq!(line, "{\"type\":\"gameOver\",\"score\":12}\n");
    }

    #[test]
    fn score_changed_uses_camel_case_tag() {
        let msg = NotificationMessage::from(Milestone::ScoreChanged { score: 10, level: 2 });
        let v: serde_json::Value = serde_json::from_str(msg.to_line().unwrap().trim()).unwrap();
        assert_eq!(v["type"], "scoreChanged");
        assert_eq!(v["level"], 2);
    }

    #[test]
    fn started_has_only_a_tag() {
        let line = NotificationMessage::GameStarted.to_line().unwrap();
        assert_eq!(line.trim(), "{\"type\":\"gameStarted\"}");
        let back: NotificationMessage = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(back, NotificationMessage::GameStarted);
    }
}
