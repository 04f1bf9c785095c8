use std::{fmt, io};

/// A single inbound line that was not valid JSON. Local to that line; never fatal.
#[derive(Debug)]
pub struct ParseError {
    pub line_len: usize,
    pub source: serde_json::Error,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed frame ({} bytes): {}", self.line_len, self.source)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Connection-level failures. Any of these ends the session.
#[derive(Debug)]
pub enum NetError {
    Transport(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Transport(err) => write!(f, "transport error: {err}"),
            NetError::Serialization(err) => write!(f, "command serialization error: {err}"),
        }
    }
}

impl std::error::Error for NetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetError::Transport(err) => Some(err),
            NetError::Serialization(err) => Some(err),
        }
    }
}

impl From<io::Error> for NetError {
    fn from(err: io::Error) -> Self {
        NetError::Transport(err)
    }
}

impl From<serde_json::Error> for NetError {
    fn from(err: serde_json::Error) -> Self {
        NetError::Serialization(err)
    }
}

impl From<NetError> for io::Error {
    fn from(err: NetError) -> Self {
        match err {
            NetError::Transport(err) => err,
            NetError::Serialization(err) => io::Error::other(err),
        }
    }
}
