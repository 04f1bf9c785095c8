// Console echo of server notifications, colored by classification tag.

use crate::domain::ColorTag;
use crate::interface_adapters::protocol::InboundMessage;
use std::io::{self, Write};
use std::net::SocketAddr;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

pub fn ansi_code(tag: ColorTag) -> &'static str {
    match tag {
        ColorTag::Green => "\x1b[92m",
        ColorTag::Orange => "\x1b[93m",
        ColorTag::Red => "\x1b[91m",
        ColorTag::Purple => "\x1b[35m",
        ColorTag::Blue => "\x1b[34m",
        ColorTag::Neutral => RESET,
    }
}

/// Receives every processed, non-suppressed notification plus connection lifecycle events.
pub trait MessageObserver: Send {
    fn connected(&mut self, _peer: Option<SocketAddr>) {}

    fn message(&mut self, tag: ColorTag, message: &InboundMessage);

    fn closed(&mut self) {}
}

/// Writes colored lines to a terminal (stdout by default).
pub struct ConsoleObserver<W = io::Stdout> {
    out: W,
}

impl ConsoleObserver {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: std::fmt::Arguments<'_>) {
        // Echo is best-effort; a closed terminal must not take the connection down.
        if let Err(error) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::debug!(%error, "console echo failed");
        }
    }
}

impl<W: Write + Send> MessageObserver for ConsoleObserver<W> {
    fn connected(&mut self, _peer: Option<SocketAddr>) {
        self.write_line(format_args!("{BOLD}CONNECTED!{RESET}"));
    }

    fn message(&mut self, tag: ColorTag, message: &InboundMessage) {
        let color = ansi_code(tag);
        self.write_line(format_args!("{color}{}{RESET}", message.body));
    }

    fn closed(&mut self) {
        self.write_line(format_args!("Connection closed"));
    }
}
