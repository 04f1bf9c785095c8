pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::client::{connect, run, run_with_config};
pub use interface_adapters::net::{SessionSettings, SessionSummary};
