use std::io;
use thiserror::Error;

use crate::connection::WriterPhase;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed header line: {reason}")]
    MalformedHeaderLine { reason: String },

    #[error("invalid header field name: {name:?}")]
    InvalidFieldName { name: String },

    #[error("malformed request line: {line:?}")]
    MalformedRequestLine { line: String },

    #[error("invalid http method: {method:?}")]
    InvalidMethod { method: String },

    #[error("invalid request target: {target:?}")]
    InvalidTarget { target: String },

    #[error("unsupported http version: {version:?}")]
    UnsupportedVersion { version: String },

    #[error("incomplete request, reached end of input in state {state}")]
    IncompleteRequest { state: &'static str },

    #[error("request is already completely parsed")]
    AlreadyComplete,

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_header_line<S: ToString>(str: S) -> Self {
        Self::MalformedHeaderLine { reason: str.to_string() }
    }

    pub fn invalid_field_name<S: ToString>(str: S) -> Self {
        Self::InvalidFieldName { name: str.to_string() }
    }

    pub fn malformed_request_line<S: ToString>(str: S) -> Self {
        Self::MalformedRequestLine { line: str.to_string() }
    }

    pub fn invalid_method<S: ToString>(str: S) -> Self {
        Self::InvalidMethod { method: str.to_string() }
    }

    pub fn invalid_target<S: ToString>(str: S) -> Self {
        Self::InvalidTarget { target: str.to_string() }
    }

    pub fn unsupported_version<S: ToString>(str: S) -> Self {
        Self::UnsupportedVersion { version: str.to_string() }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("wrong writer phase, expected {expected} but writer is in {actual}")]
    WrongPhase { expected: WriterPhase, actual: WriterPhase },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn wrong_phase(expected: WriterPhase, actual: WriterPhase) -> Self {
        Self::WrongPhase { expected, actual }
    }
}
