// Use cases layer: per-tick decisions and tick scheduling.

pub mod decision;
pub mod ticker;

pub use decision::{DecisionEngine, TickDecision, random_command};
pub use ticker::TickScheduler;
