//! Core HTTP protocol abstractions.
//!
//! This module holds the data model shared by the codecs, the connection
//! layer and application handlers.
//!
//! - **Header Store**: [`Headers`], a case-insensitive field
//!   mapping filled line by line with [`Headers::parse_line`]
//! - **Request Processing**: [`RequestLine`] and [`Request`]
//! - **Response Processing**: reason phrases and
//!   [`default_headers`]
//! - **Message Handling**: [`ResponseItem`], the wire units a
//!   response is made of, and [`PayloadItem`] for chunked bodies
//! - **Error Handling**: [`HttpError`], [`ParseError`] and
//!   [`SendError`]

mod message;
pub use message::PayloadItem;
pub use message::ResponseItem;

mod headers;
pub use headers::HeaderStatus;
pub use headers::Headers;

mod request;
pub use request::Request;
pub use request::RequestLine;

mod response;
pub use response::default_headers;
pub use response::reason_phrase;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
