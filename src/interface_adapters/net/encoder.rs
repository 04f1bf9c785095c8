use super::error::NetError;
use crate::domain::OutboundCommand;
use crate::interface_adapters::protocol::CommandDto;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes one command per line: a single JSON object followed by `\n`.
pub struct OutboundEncoder<W> {
    writer: W,
    // Reused between commands to avoid a fresh allocation every tick.
    buf: Vec<u8>,
}

impl<W: AsyncWrite + Unpin> OutboundEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: Vec::with_capacity(64),
        }
    }

    /// Sends one command with a single write and flushes it. Returns the bytes written.
    pub async fn send(&mut self, command: &OutboundCommand) -> Result<usize, NetError> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &CommandDto::from(command))?;
        self.buf.push(b'\n');
        self.writer.write_all(&self.buf).await?;
        self.writer.flush().await?;
        Ok(self.buf.len())
    }

    pub async fn shutdown(&mut self) -> Result<(), NetError> {
        self.writer.shutdown().await.map_err(NetError::Transport)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Speed};
    use serde_json::Value;

    // Wire bytes of a single command as the encoder would write them.
    async fn wire_bytes(command: &OutboundCommand) -> Vec<u8> {
        let mut encoder = OutboundEncoder::new(Vec::new());
        let written = encoder.send(command).await.expect("send");
        let bytes = encoder.into_inner();
        assert_eq!(written, bytes.len());
        bytes
    }

    #[tokio::test]
    async fn when_shoot_is_encoded_then_bytes_are_exact() {
        let bytes = wire_bytes(&OutboundCommand::Shoot).await;
        assert_eq!(bytes, b"{\"action\":\"shoot\"}\n");
    }

    #[tokio::test]
    async fn when_commands_are_decoded_by_a_generic_parser_then_fields_survive() {
        let commands = [
            OutboundCommand::Greet {
                name: "RUST".to_string(),
            },
            OutboundCommand::SetSpeed {
                speed: Speed::clamped(1),
            },
            OutboundCommand::Rotate {
                direction: Direction::Up,
            },
            OutboundCommand::Shoot,
        ];

        for command in commands {
            let bytes = wire_bytes(&command).await;
            assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 1);
            assert_eq!(bytes.last(), Some(&b'\n'));

            let value: Value = serde_json::from_slice(&bytes).expect("valid json");
            assert_eq!(value["action"], command.action());
            match &command {
                OutboundCommand::Greet { name } => assert_eq!(value["name"], name.as_str()),
                OutboundCommand::SetSpeed { speed } => {
                    assert_eq!(value["speed"], u64::from(speed.get()))
                }
                OutboundCommand::Rotate { direction } => {
                    assert_eq!(value["direction"], direction.as_str())
                }
                OutboundCommand::Shoot => assert_eq!(value.as_object().map(|o| o.len()), Some(1)),
            }
        }
    }

    #[tokio::test]
    async fn when_commands_are_sent_then_each_is_one_line() {
        let mut encoder = OutboundEncoder::new(Vec::new());

        let greet_len = encoder
            .send(&OutboundCommand::Greet {
                name: "TEST".to_string(),
            })
            .await
            .expect("send greet");
        encoder.send(&OutboundCommand::Shoot).await.expect("send shoot");

        let written = String::from_utf8(encoder.into_inner()).expect("utf-8");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            ["{\"action\":\"greet\",\"name\":\"TEST\"}", "{\"action\":\"shoot\"}"]
        );
        assert_eq!(greet_len, lines[0].len() + 1);
    }
}
