use bytes::Buf;
use http::StatusCode;

use crate::protocol::Headers;

/// One unit of an outgoing response, in the order the wire expects them.
///
/// Items borrow the data they serialize, the encoder copies it into its
/// output buffer.
#[derive(Debug, Clone, Copy)]
pub enum ResponseItem<'a> {
    /// `HTTP/1.1 <code> <reason>\r\n`
    StatusLine(StatusCode),
    /// Header lines followed by the blank line
    Headers(&'a Headers),
    /// Raw body bytes, written verbatim
    Body(&'a [u8]),
    /// A chunk of a chunked body, or the terminating zero-length chunk
    Chunk(PayloadItem<&'a [u8]>),
    /// Trailer lines followed by the blank line
    Trailers(&'a Headers),
}

/// Represents an item in a chunked payload stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadItem<Data: Buf> {
    /// A chunk of payload data
    Chunk(Data),
    /// Marks the end of the payload stream
    Eof,
}
