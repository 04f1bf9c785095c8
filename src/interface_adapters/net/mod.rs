// Network adapter modules: line framing, command encoding and the session loop.

pub mod client;
pub mod encoder;
pub mod error;
pub mod framing;

pub use client::{SessionSettings, SessionStats, SessionSummary, run_session};
pub use encoder::OutboundEncoder;
pub use error::{NetError, ParseError};
pub use framing::FrameDecoder;
