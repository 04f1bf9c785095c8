// Wire protocol DTOs and conversions for the line-delimited JSON game protocol.

use crate::domain::{Classification, Direction, OutboundCommand, Status, classify};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Commands the client sends to the server, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CommandDto {
    Greet { name: String },
    SetSpeed { speed: u8 },
    Rotate { direction: DirectionDto },
    Shoot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionDto {
    Up,
    Down,
    Left,
    Right,
}

impl From<Direction> for DirectionDto {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => DirectionDto::Up,
            Direction::Down => DirectionDto::Down,
            Direction::Left => DirectionDto::Left,
            Direction::Right => DirectionDto::Right,
        }
    }
}

impl From<&OutboundCommand> for CommandDto {
    fn from(command: &OutboundCommand) -> Self {
        match command {
            OutboundCommand::Greet { name } => CommandDto::Greet { name: name.clone() },
            OutboundCommand::SetSpeed { speed } => CommandDto::SetSpeed { speed: speed.get() },
            OutboundCommand::Rotate { direction } => CommandDto::Rotate {
                direction: (*direction).into(),
            },
            OutboundCommand::Shoot => CommandDto::Shoot,
        }
    }
}

/// A decoded server notification.
///
/// Only `status` and `action` drive behaviour; the full body is kept for display.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub status: Status,
    pub action: Option<String>,
    pub body: Value,
}

impl InboundMessage {
    pub fn classify(&self) -> Classification {
        classify(self.status, self.action.as_deref())
    }

    /// Anything other than a JSON object falls outside the protocol shape.
    pub fn is_well_formed(&self) -> bool {
        self.body.is_object()
    }
}

impl From<Value> for InboundMessage {
    fn from(body: Value) -> Self {
        // Non-string or missing fields degrade to "unknown" rather than failing the frame.
        let status = body
            .get("status")
            .and_then(Value::as_str)
            .map(Status::parse)
            .unwrap_or(Status::Unknown);
        let action = body
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            status,
            action,
            body,
        }
    }
}
