//! Phase-ordered response writer.
//!
//! A [`ResponseWriter`] serializes one response onto a sink and enforces that
//! its parts are written in protocol order:
//!
//! ```text
//! StatusLine -> Headers -> Body -> Trailers -> Done
//!                          (Trailers only after write_chunked_body_done)
//! ```
//!
//! Every call checks the current [`WriterPhase`] first and fails with
//! [`SendError::WrongPhase`] without touching the writer when it does not
//! match. A call that passes the check moves the phase on before the bytes hit
//! the sink, so an I/O failure never leaves the writer stuck in its old phase.

use std::fmt;

use bytes::BytesMut;
use http::StatusCode;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;

use crate::codec::ResponseEncoder;
use crate::ensure;
use crate::protocol::{Headers, PayloadItem, ResponseItem, SendError};

const INIT_BUFFER_SIZE: usize = 4 * 1024;

/// The part of the response a [`ResponseWriter`] expects next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriterPhase {
    StatusLine,
    Headers,
    Body,
    Trailers,
    /// Trailers were written, the response is complete
    Done,
}

impl fmt::Display for WriterPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriterPhase::StatusLine => "status line",
            WriterPhase::Headers => "headers",
            WriterPhase::Body => "body",
            WriterPhase::Trailers => "trailers",
            WriterPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Writes a single HTTP/1.1 response to `W`.
///
/// One writer serves one connection and is never reused. Each call is encoded
/// into an internal buffer, then written and flushed.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    writer: W,
    buffer: BytesMut,
    encoder: ResponseEncoder,
    phase: WriterPhase,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, INIT_BUFFER_SIZE)
    }

    pub fn with_capacity(writer: W, buffer_size: usize) -> Self {
        Self { writer, buffer: BytesMut::with_capacity(buffer_size), encoder: ResponseEncoder::new(), phase: WriterPhase::StatusLine }
    }

    #[inline]
    pub fn phase(&self) -> WriterPhase {
        self.phase
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes `HTTP/1.1 <code> <reason>\r\n`, see
    /// [`reason_phrase`](crate::protocol::reason_phrase).
    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), SendError> {
        self.advance(WriterPhase::StatusLine, WriterPhase::Headers)?;
        self.send(ResponseItem::StatusLine(status)).await
    }

    /// Writes every header as `name: value\r\n`, then the blank line.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), SendError> {
        self.advance(WriterPhase::Headers, WriterPhase::Body)?;
        self.send(ResponseItem::Headers(headers)).await
    }

    /// Writes `data` verbatim, for bodies announced by `content-length`.
    ///
    /// May be called any number of times. The bytes go straight to the sink
    /// without passing through the encode buffer.
    pub async fn write_body(&mut self, data: &[u8]) -> Result<usize, SendError> {
        self.expect(WriterPhase::Body)?;
        self.writer.write_all(data).await?;
        self.writer.flush().await?;
        Ok(data.len())
    }

    /// Writes `data` as one chunk: `<hex length>\r\n<data>\r\n`.
    ///
    /// May be called any number of times. Empty input writes nothing.
    pub async fn write_chunked_body(&mut self, data: &[u8]) -> Result<usize, SendError> {
        self.expect(WriterPhase::Body)?;
        self.send(ResponseItem::Chunk(PayloadItem::Chunk(data))).await?;
        Ok(data.len())
    }

    /// Writes the last chunk `0\r\n`, after which only trailers may follow.
    pub async fn write_chunked_body_done(&mut self) -> Result<(), SendError> {
        self.advance(WriterPhase::Body, WriterPhase::Trailers)?;
        self.send(ResponseItem::Chunk(PayloadItem::Eof)).await
    }

    /// Writes the trailer fields and the blank line completing the response.
    pub async fn write_trailers(&mut self, trailers: &Headers) -> Result<(), SendError> {
        self.advance(WriterPhase::Trailers, WriterPhase::Done)?;
        self.send(ResponseItem::Trailers(trailers)).await
    }

    #[inline]
    fn expect(&self, expected: WriterPhase) -> Result<(), SendError> {
        ensure!(self.phase == expected, SendError::wrong_phase(expected, self.phase));
        Ok(())
    }

    fn advance(&mut self, expected: WriterPhase, next: WriterPhase) -> Result<(), SendError> {
        self.expect(expected)?;
        self.phase = next;
        Ok(())
    }

    async fn send(&mut self, item: ResponseItem<'_>) -> Result<(), SendError> {
        self.buffer.clear();
        self.encoder.encode(item, &mut self.buffer)?;
        if self.buffer.is_empty() {
            return Ok(());
        }

        self.writer.write_all(self.buffer.as_ref()).await?;
        Ok(self.writer.flush().await?)
    }
}
