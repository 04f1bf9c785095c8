use crate::domain::{Direction, GameState, OutboundCommand, Speed};
use rand::Rng;

/// Commands produced by a single tick, greeting first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickDecision {
    pub greeting: Option<OutboundCommand>,
    pub action: Option<OutboundCommand>,
}

impl TickDecision {
    pub fn commands(self) -> impl Iterator<Item = OutboundCommand> {
        self.greeting.into_iter().chain(self.action)
    }
}

/// Picks one command with probability 1/3 per branch; speed and direction are uniform too.
pub fn random_command<R: Rng>(rng: &mut R) -> OutboundCommand {
    match rng.gen_range(0..3u8) {
        0 => OutboundCommand::SetSpeed {
            speed: Speed::clamped(rng.gen_range(0..=Speed::MAX)),
        },
        1 => OutboundCommand::Rotate {
            direction: Direction::ALL[rng.gen_range(0..Direction::ALL.len())],
        },
        _ => OutboundCommand::Shoot,
    }
}

// Decides what the client sends on each tick.
pub struct DecisionEngine<R> {
    name: String,
    rng: R,
}

impl<R: Rng> DecisionEngine<R> {
    pub fn new(name: impl Into<String>, rng: R) -> Self {
        Self {
            name: name.into(),
            rng,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs one tick against the connection state.
    ///
    /// The greeting goes out on the first call regardless of `active`; afterwards one random
    /// command is produced per call while the game is active, and nothing otherwise.
    pub fn decide(&mut self, state: &mut GameState) -> TickDecision {
        let greeting = state.mark_greeted().then(|| OutboundCommand::Greet {
            name: self.name.clone(),
        });
        let action = state.active.then(|| random_command(&mut self.rng));
        TickDecision { greeting, action }
    }
}
