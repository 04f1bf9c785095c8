// Domain layer: connection state, notification rules and outbound commands.

pub mod classify;
pub mod command;
pub mod state;

pub use classify::{Classification, ColorTag, Status, classify};
pub use command::{Direction, OutboundCommand, Speed};
pub use state::{ClientPhase, GameState, StateMutation};
