//! HTTP connection handling module
//!
//! This module ties the request decoder and the response writer to a byte
//! stream.
//!
//! # Components
//!
//! - [`HttpConnection`]: serves one request per connection, then closes it
//! - [`ResponseWriter`]: phase-ordered writer handed to application handlers
//! - [`request_from_reader`]: parses one request head from any `AsyncRead`
//!
//! No keep-alive: every connection carries exactly one request, and the
//! request body, if any, is never read.

mod http_connection;
mod response_writer;

pub use http_connection::HttpConnection;
pub use http_connection::request_from_reader;
pub use response_writer::ResponseWriter;
pub use response_writer::WriterPhase;
