//! HTTP request model produced by the request decoder.
//!
//! A [`Request`] owns exactly one [`RequestLine`] and one [`Headers`] store.
//! Request bodies are not modeled: bytes following the header section are
//! never attached to a request.

use http::{Method, Version};

use crate::protocol::Headers;

/// The first line of a request: method, target and protocol version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    target: String,
    version: Version,
}

impl RequestLine {
    pub(crate) fn new(method: Method, target: String, version: Version) -> Self {
        Self { method, target, version }
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request target, always starting with `/`.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the version number as carried on the wire after `HTTP/`.
    ///
    /// The decoder accepts nothing but `HTTP/1.1`.
    pub fn http_version(&self) -> &'static str {
        debug_assert_eq!(self.version, Version::HTTP_11);
        "1.1"
    }
}

/// A fully parsed request head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    request_line: RequestLine,
    headers: Headers,
}

impl Request {
    pub(crate) fn new(request_line: RequestLine, headers: Headers) -> Self {
        Self { request_line, headers }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    pub fn method(&self) -> &Method {
        self.request_line.method()
    }

    pub fn target(&self) -> &str {
        self.request_line.target()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Consumes the request, returning its request line and header store.
    pub fn into_parts(self) -> (RequestLine, Headers) {
        (self.request_line, self.headers)
    }
}
