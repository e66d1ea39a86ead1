//! HTTP body encoding
//!
//! - [`ChunkedEncoder`]: implements chunked transfer encoding for bodies whose
//!   length is not known up front
//!
//! Fixed-length bodies need no framing and are written verbatim by
//! [`ResponseEncoder`](crate::codec::ResponseEncoder).

mod chunked_encoder;

pub use chunked_encoder::ChunkedEncoder;
