//! HTTP header encoding
//!
//! - [`HeaderEncoder`]: serializes status lines, header sections and trailer
//!   sections
//!
//! Header parsing lives with the store itself, see
//! [`Headers::parse_line`](crate::protocol::Headers::parse_line).

mod header_encoder;

pub use header_encoder::HeaderEncoder;
