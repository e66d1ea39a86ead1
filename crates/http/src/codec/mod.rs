//! HTTP codec module for encoding and decoding HTTP messages
//!
//! This module provides the wire-level half of the crate: turning raw bytes
//! into a [`Request`](crate::protocol::Request) and response items into raw
//! bytes.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: resumable decoder for one request head
//!   - request line parsing, header lines are parsed by
//!     [`Headers::parse_line`](crate::protocol::Headers::parse_line)
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: encodes [`ResponseItem`](crate::protocol::ResponseItem)s
//!   - status line, header and trailer encoding via the `header` module
//!   - chunked transfer encoding via the `body` module
//!
//! # Example
//!
//! ```
//! use tcp_http::codec::{RequestDecoder, ResponseEncoder};
//! use tcp_http::protocol::ResponseItem;
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//! use http::StatusCode;
//!
//! // Decode incoming request
//! let mut decoder = RequestDecoder::new();
//! let mut request_buffer = BytesMut::from("GET / HTTP/1.1\r\n\r\n");
//! let request = decoder.decode(&mut request_buffer).unwrap();
//! assert!(request.is_some());
//!
//! // Encode outgoing response
//! let mut encoder = ResponseEncoder::new();
//! let mut response_buffer = BytesMut::new();
//! encoder.encode(ResponseItem::StatusLine(StatusCode::OK), &mut response_buffer).unwrap();
//! assert_eq!(&response_buffer[..], b"HTTP/1.1 200 OK\r\n");
//! ```

mod body;
mod header;
mod request_decoder;
mod request_line;
mod response_encoder;

pub use request_decoder::MAX_HEADER_BYTES;
pub use request_decoder::ParseState;
pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
