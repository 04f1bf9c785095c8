// Commands the client can issue to the game server.

/// Tank facing accepted by the `rotate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Tank speed level, always within `0..=Speed::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Speed(u8);

impl Speed {
    pub const MAX: u8 = 2;

    pub fn clamped(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundCommand {
    // One-time identification sent on the first tick.
    Greet { name: String },
    SetSpeed { speed: Speed },
    Rotate { direction: Direction },
    Shoot,
}

impl OutboundCommand {
    /// Wire discriminator, also used as a log field.
    pub fn action(&self) -> &'static str {
        match self {
            OutboundCommand::Greet { .. } => "greet",
            OutboundCommand::SetSpeed { .. } => "set_speed",
            OutboundCommand::Rotate { .. } => "rotate",
            OutboundCommand::Shoot => "shoot",
        }
    }

    pub fn is_greeting(&self) -> bool {
        matches!(self, OutboundCommand::Greet { .. })
    }
}
