// Interface adapters: wire protocol, console echo and network handling.

pub mod display;
pub mod net;
pub mod protocol;
