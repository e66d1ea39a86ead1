//! HTTP request decoder module
//!
//! This module turns an incrementally arriving byte stream into a [`Request`].
//! It is a resumable state machine, so a request may arrive split at any byte
//! boundary across any number of reads.
//!
//! # State Machine
//!
//! ```text
//! Initialized --request line--> ParsingHeaders --blank line--> Done
//! ```
//!
//! Each call consumes as many complete syntactic units (the request line, then
//! header lines) as are fully present and leaves the rest in the buffer. When
//! used through [`tokio_util::codec::FramedRead`], the read buffer grows on
//! demand and only retains the unparsed tail.
//!
//! # Example
//!
//! ```
//! use tcp_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET /path HTTP/1.1\r\nHost: x\r\n\r\n");
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.target(), "/path");
//! ```

use std::mem;

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::request_line::parse_request_line;
use crate::ensure;
use crate::protocol::{Headers, ParseError, Request, RequestLine};

/// Maximum size in bytes allowed for the request line plus the header section
pub const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Progress of a [`RequestDecoder`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseState {
    /// Waiting for the request line
    Initialized,
    /// Request line parsed, reading header lines
    ParsingHeaders,
    /// Blank line seen, the request is complete
    Done,
}

impl ParseState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseState::Initialized => "initialized",
            ParseState::ParsingHeaders => "parsing headers",
            ParseState::Done => "done",
        }
    }
}

/// A decoder for exactly one HTTP request head.
///
/// Once the request has been produced, the decoder stays in
/// [`ParseState::Done`] and any further parse attempt fails with
/// [`ParseError::AlreadyComplete`].
#[derive(Debug)]
pub struct RequestDecoder {
    state: ParseState,
    request_line: Option<RequestLine>,
    headers: Headers,
    /// bytes of the request head consumed so far
    parsed_bytes: usize,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Parses as many complete units as `data` holds.
    ///
    /// Returns the number of bytes consumed, which is zero when `data` does not
    /// hold the next unit completely yet.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        ensure!(self.state != ParseState::Done, ParseError::AlreadyComplete);

        let mut total_parsed = 0;
        while self.state != ParseState::Done {
            let parsed = self.parse_single(&data[total_parsed..])?;
            if parsed == 0 {
                break;
            }
            total_parsed += parsed;
        }

        self.parsed_bytes += total_parsed;
        Ok(total_parsed)
    }

    fn parse_single(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        match self.state {
            ParseState::Initialized => match parse_request_line(data)? {
                Some((request_line, parsed)) => {
                    trace!(method = %request_line.method(), path = request_line.target(), "parsed request line");
                    self.request_line = Some(request_line);
                    self.state = ParseState::ParsingHeaders;
                    Ok(parsed)
                }
                None => Ok(0),
            },

            ParseState::ParsingHeaders => {
                let status = self.headers.parse_line(data)?;
                if status.is_end() {
                    trace!(header_count = self.headers.len(), "parsed header section");
                    self.state = ParseState::Done;
                }
                Ok(status.consumed())
            }

            ParseState::Done => Err(ParseError::AlreadyComplete),
        }
    }

    fn take_request(&mut self) -> Result<Request, ParseError> {
        let request_line = self.request_line.take().ok_or(ParseError::AlreadyComplete)?;
        Ok(Request::new(request_line, mem::take(&mut self.headers)))
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self { state: ParseState::Initialized, request_line: None, headers: Headers::new(), parsed_bytes: 0 }
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode the request head from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: the blank line ending the header section was seen
    /// - `Ok(None)`: need more data to proceed
    /// - `Err(_)`: encountered a parsing error
    ///
    /// Consumed bytes are removed from `src`; bytes after the header section
    /// stay in it.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let parsed = self.parse(src)?;
        src.advance(parsed);

        if self.state == ParseState::Done {
            return self.take_request().map(Some);
        }

        let current_size = self.parsed_bytes + src.len();
        ensure!(current_size <= MAX_HEADER_BYTES, ParseError::too_large_header(current_size, MAX_HEADER_BYTES));
        Ok(None)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(request) => Ok(Some(request)),
            None => Err(ParseError::IncompleteRequest { state: self.state.as_str() }),
        }
    }
}
