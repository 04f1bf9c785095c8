// Shared fake game server for integration tests over real loopback TCP.
use std::{net::SocketAddr, time::Duration};

use tokio::{
    // Buffered line reads mirror how a real server frames client commands.
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines},
    net::{
        TcpListener, TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

// Upper bound for any single wait so a broken client fails the test instead of hanging it.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(5);

// Listening half of the fake server; accepts exactly one client.
pub struct FakeServer {
    listener: TcpListener,
}

// Accepted connection as seen from the server side.
pub struct ServerConn {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl FakeServer {
    // Bind to an ephemeral port to avoid collisions with local services.
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        Self { listener }
    }

    pub fn addr(&self) -> SocketAddr {
        self.listener.local_addr().expect("get local addr")
    }

    // Connect a client stream to this server.
    pub async fn connect(&self) -> TcpStream {
        TcpStream::connect(self.addr())
            .await
            .expect("connect to fake server")
    }

    pub async fn accept(&self) -> ServerConn {
        let (stream, _) = tokio::time::timeout(STEP_TIMEOUT, self.listener.accept())
            .await
            .expect("client connected in time")
            .expect("accept client");
        let (reader, writer) = stream.into_split();
        ServerConn {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }
}

impl ServerConn {
    // Push raw bytes exactly as given; callers control line termination.
    pub async fn send_raw(&mut self, raw: &str) {
        self.writer
            .write_all(raw.as_bytes())
            .await
            .expect("server write");
    }

    // Read the next command line the client sent and parse it as generic JSON.
    pub async fn next_command(&mut self) -> serde_json::Value {
        let line = tokio::time::timeout(STEP_TIMEOUT, self.lines.next_line())
            .await
            .expect("client command in time")
            .expect("server read")
            .expect("client closed unexpectedly");
        serde_json::from_str(&line).expect("client sent valid json")
    }

    // Half-close the server side; the client sees end-of-stream while its writes still land.
    pub async fn close(&mut self) {
        let _ = self.writer.shutdown().await;
    }
}
