use super::encoder::OutboundEncoder;
use super::error::{NetError, ParseError};
use super::framing::FrameDecoder;
use crate::domain::{ClientPhase, GameState};
use crate::interface_adapters::display::MessageObserver;
use crate::interface_adapters::protocol::InboundMessage;
use crate::use_cases::{DecisionEngine, TickScheduler};

use futures::StreamExt;
use rand::Rng;
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::FramedRead;
use tracing::{Instrument, debug, info, info_span, warn};

/// Per-connection settings for a client session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    // Identity sent in the greeting.
    pub name: String,
    // Delay between the end of one tick and the start of the next.
    pub tick_interval: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub msgs_in: u64,
    pub msgs_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub parse_errors: u64,
    pub suppressed: u64,
    pub ticks: u64,
}

/// Final state of a session that ended because the server closed the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub state: GameState,
    pub phase: ClientPhase,
    pub stats: SessionStats,
}

struct SessionCtx<W, R, O> {
    state: GameState,
    phase: ClientPhase,
    engine: DecisionEngine<R>,
    encoder: OutboundEncoder<W>,
    observer: O,
    stats: SessionStats,
}

/// Drives one connection until the server closes it or the transport fails.
///
/// Inbound frames and ticks are handled on this single task, so the game state never needs a
/// lock. Returns `Ok` on a clean end-of-stream and `Err` on any transport failure; either way
/// the session is closed and no further ticks fire.
pub async fn run_session<S, R, O>(
    stream: S,
    peer: Option<SocketAddr>,
    settings: SessionSettings,
    rng: R,
    observer: O,
) -> Result<SessionSummary, NetError>
where
    S: AsyncRead + AsyncWrite + Send,
    R: Rng + Send,
    O: MessageObserver,
{
    let span = info_span!("session", peer = ?peer, name = %settings.name);
    drive_session(stream, peer, settings, rng, observer)
        .instrument(span)
        .await
}

async fn drive_session<S, R, O>(
    stream: S,
    peer: Option<SocketAddr>,
    settings: SessionSettings,
    rng: R,
    observer: O,
) -> Result<SessionSummary, NetError>
where
    S: AsyncRead + AsyncWrite,
    R: Rng,
    O: MessageObserver,
{
    let (reader, writer) = tokio::io::split(stream);

    let mut ctx = SessionCtx {
        state: GameState::new(),
        phase: ClientPhase::Connected,
        engine: DecisionEngine::new(settings.name, rng),
        encoder: OutboundEncoder::new(writer),
        observer,
        stats: SessionStats::default(),
    };
    ctx.observer.connected(peer);
    info!(phase = ?ctx.phase, "connected");

    let mut frames = FramedRead::new(reader, FrameDecoder::new());
    let mut ticker = TickScheduler::new(settings.tick_interval);

    let outcome = loop {
        tokio::select! {
            frame = frames.next() => {
                match frame {
                    Some(Ok(frame)) => ctx.handle_frame(frame),
                    Some(Err(e)) => {
                        warn!(error = %e, "socket read failed");
                        break Err(e);
                    }
                    None => {
                        info!("server closed the connection");
                        break Ok(());
                    }
                }
            }

            _ = ticker.wait() => {
                if let Err(e) = ctx.run_tick().await {
                    warn!(error = %e, "failed to send command");
                    break Err(e);
                }
                // Re-arm only after the tick's writes finished so ticks never overlap.
                ticker.rearm();
            }
        }
    };

    // Anything still buffered was read off the socket but never formed a frame.
    ctx.stats.bytes_in = frames.decoder().consumed() + frames.read_buffer().len() as u64;
    ctx.phase = ctx.phase.close();
    if outcome.is_ok() {
        // Best-effort half close; the peer is already gone.
        if let Err(e) = ctx.encoder.shutdown().await {
            debug!(error = %e, "socket shutdown error");
        }
    }
    ctx.observer.closed();

    let SessionStats {
        msgs_in,
        msgs_out,
        bytes_in,
        bytes_out,
        parse_errors,
        suppressed,
        ticks,
    } = ctx.stats;
    debug!(
        msgs_in,
        msgs_out,
        bytes_in,
        bytes_out,
        parse_errors,
        suppressed,
        ticks,
        "connection stats"
    );
    info!(phase = ?ctx.phase, active = ctx.state.active, "client disconnected");

    outcome.map(|()| SessionSummary {
        state: ctx.state,
        phase: ctx.phase,
        stats: ctx.stats,
    })
}

impl<W, R, O> SessionCtx<W, R, O>
where
    W: AsyncWrite + Unpin,
    R: Rng,
    O: MessageObserver,
{
    fn handle_frame(&mut self, frame: Result<Value, ParseError>) {
        let body = match frame {
            Ok(body) => body,
            Err(e) => {
                // One bad line never aborts the stream.
                self.stats.parse_errors += 1;
                warn!(error = %e, "dropping malformed frame");
                return;
            }
        };

        self.stats.msgs_in += 1;
        let message = InboundMessage::from(body);
        if !message.is_well_formed() {
            debug!("message is not a JSON object; treating as neutral");
        }

        let classification = message.classify();
        if classification.suppressed {
            self.stats.suppressed += 1;
            return;
        }

        if let Some(mutation) = classification.mutation {
            if self.state.apply(mutation) {
                self.phase = self.phase.on_mutation(mutation);
                info!(phase = ?self.phase, "game state changed");
            }
        }

        self.observer.message(classification.tag, &message);
    }

    async fn run_tick(&mut self) -> Result<(), NetError> {
        self.stats.ticks += 1;
        let decision = self.engine.decide(&mut self.state);

        for command in decision.commands() {
            let bytes = self.encoder.send(&command).await?;
            self.stats.msgs_out += 1;
            self.stats.bytes_out += bytes as u64;
            if command.is_greeting() {
                info!(name = self.engine.name(), "greeting sent");
            } else {
                debug!(action = command.action(), "command sent");
            }
        }
        Ok(())
    }
}
