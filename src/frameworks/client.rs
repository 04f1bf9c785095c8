// Framework bootstrap for the client runtime.

use crate::domain::ClientPhase;
use crate::frameworks::config;
use crate::interface_adapters::display::{ConsoleObserver, MessageObserver};
use crate::interface_adapters::net::{SessionSettings, SessionSummary, run_session};

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Result;
use tokio::net::TcpStream;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    // Logs go to stderr so the colored message echo owns stdout.
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Opens the connection to the game server. There is no retry or reconnect.
pub async fn connect(host: &str, port: u16) -> Result<TcpStream> {
    let phase = ClientPhase::Connecting;
    tracing::info!(?phase, %host, port, "connecting to server");

    let stream = TcpStream::connect((host, port)).await.inspect_err(|e| {
        tracing::error!(phase = ?phase.close(), %host, port, error = %e, "failed to connect");
    })?;
    tracing::info!(phase = ?phase.connected(), %host, port, "connected to server");
    Ok(stream)
}

/// Runs one session over an already connected stream.
pub async fn run<O: MessageObserver>(
    stream: TcpStream,
    settings: SessionSettings,
    observer: O,
) -> Result<SessionSummary> {
    // Commands go out immediately; there is no batching to gain from Nagle.
    stream.set_nodelay(true)?;
    let peer = stream.peer_addr().ok();

    run_session(stream, peer, settings, StdRng::from_entropy(), observer)
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "connection lost");
        })
        .map_err(Into::into)
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let host = config::server_host();
    let port = config::server_port();
    let settings = SessionSettings {
        name: config::client_name(),
        tick_interval: config::tick_interval(),
    };
    tracing::debug!(
        name = %settings.name,
        tick_interval_ms = settings.tick_interval.as_millis(),
        "client configured"
    );

    let stream = connect(&host, port).await?;
    run(stream, settings, ConsoleObserver::stdout()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn when_server_is_listening_then_connect_returns_a_stream() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let stream = connect("127.0.0.1", addr.port()).await.expect("connect");

        assert_eq!(stream.peer_addr().expect("peer addr"), addr);
    }

    #[tokio::test]
    async fn when_nothing_is_listening_then_connect_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        assert!(connect("127.0.0.1", port).await.is_err());
    }
}
