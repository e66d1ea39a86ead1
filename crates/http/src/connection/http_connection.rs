use std::sync::Arc;

use futures::StreamExt;
use http::StatusCode;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::FramedRead;
use tracing::{error, info};

use crate::codec::RequestDecoder;
use crate::connection::ResponseWriter;
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Request, SendError, default_headers};

/// Initial capacity of the read buffer, it grows on demand
const INIT_BUFFER_SIZE: usize = 4 * 1024;

/// Reads bytes from `reader` until one complete request head was parsed.
///
/// # Errors
///
/// Any [`ParseError`] of the request line or a header line, or
/// [`ParseError::IncompleteRequest`] if `reader` reaches end of input before
/// the blank line closing the header section.
pub async fn request_from_reader<R>(reader: R) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut framed_read = FramedRead::with_capacity(reader, RequestDecoder::new(), INIT_BUFFER_SIZE);

    match framed_read.next().await {
        Some(result) => result,
        None => Err(ParseError::IncompleteRequest { state: framed_read.decoder().state().as_str() }),
    }
}

/// An HTTP connection that serves exactly one request.
///
/// `HttpConnection` handles the full lifecycle of a connection:
/// - Reading and decoding the request head
/// - Answering `400 Bad Request` with the parse error text if that fails
/// - Otherwise handing a fresh [`ResponseWriter`] and the request to the handler
///
/// Both halves are dropped when [`HttpConnection::process`] returns, which
/// closes the underlying connection.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler<W> + ?Sized,
    {
        let request = match request_from_reader(&mut self.reader).await {
            Ok(request) => request,
            Err(e) => {
                error!(cause = %e, "can't parse request, answer bad request");
                let mut response_writer = ResponseWriter::new(self.writer);
                write_error_response(&mut response_writer, StatusCode::BAD_REQUEST, &e.to_string()).await?;
                return Err(e.into());
            }
        };

        info!(method = %request.method(), path = request.target(), "receive request");
        handler.call(ResponseWriter::new(self.writer), request).await;
        Ok(())
    }
}

async fn write_error_response<W>(response_writer: &mut ResponseWriter<W>, status: StatusCode, message: &str) -> Result<(), SendError>
where
    W: AsyncWrite + Unpin,
{
    response_writer.write_status_line(status).await?;
    response_writer.write_headers(&default_headers(message.len())).await?;
    response_writer.write_body(message.as_bytes()).await?;
    Ok(())
}
