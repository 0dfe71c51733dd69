//! Line-delimited JSON transport over stdin/stdout.
//!
//! Each JSON-RPC message is a single line terminated by `\n`.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::trace;

use crate::error::TransportError;

/// Reads JSON-RPC messages from one stream, writes responses to another.
///
/// Generic over reader/writer for testability.
pub struct StdioTransport<R, W> {
    lines: Lines<BufReader<R>>,
    writer: W,
}

impl StdioTransport<tokio::io::Stdin, tokio::io::Stdout> {
    /// The process's own stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a new transport with the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    /// Reads the next line, trimmed. Returns `None` on EOF.
    ///
    /// Cancel safe: no input is lost if the future is dropped mid-read.
    pub async fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let line = self
            .lines
            .next_line()
            .await
            .map_err(|e| TransportError::Read(e.to_string()))?;
        Ok(line.map(|l| {
            let trimmed = l.trim().to_string();
            trace!(len = trimmed.len(), "read message");
            trimmed
        }))
    }

    /// Writes one message followed by `\n` and flushes.
    pub async fn write_line(&mut self, message: &str) -> Result<(), TransportError> {
        trace!(len = message.len(), "writing message");

        self.writer
            .write_all(message.as_bytes())
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;

        Ok(())
    }

    /// Consumes the transport, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
