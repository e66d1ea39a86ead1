//! Response vocabulary for handlers: reason phrases and default headers.

use http::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderValue, StatusCode};

use crate::protocol::Headers;

const CONNECTION_CLOSE: HeaderValue = HeaderValue::from_static("close");
const TEXT_PLAIN: HeaderValue = HeaderValue::from_static("text/plain");

/// Returns the reason phrase written after `status` in the status line.
///
/// Only 200, 400 and 500 carry a phrase, every other code gets an empty one.
pub fn reason_phrase(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200 => "OK",
        400 => "Bad Request",
        500 => "Internal Server Error",
        _ => "",
    }
}

/// Builds the header set of a plain text response with a `content_len` body.
///
/// The result holds `content-length`, `connection: close` and
/// `content-type: text/plain`. Handlers overwrite entries as needed, e.g. drop
/// `content-length` and set `transfer-encoding: chunked` when streaming.
pub fn default_headers(content_len: usize) -> Headers {
    let mut headers = Headers::with_capacity(3);
    headers.insert(CONTENT_LENGTH, HeaderValue::from(content_len));
    headers.insert(CONNECTION, CONNECTION_CLOSE);
    headers.insert(CONTENT_TYPE, TEXT_PLAIN);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_reason_phrase() {
        assert_eq!(reason_phrase(StatusCode::OK), "OK");
        assert_eq!(reason_phrase(StatusCode::BAD_REQUEST), "Bad Request");
        assert_eq!(reason_phrase(StatusCode::INTERNAL_SERVER_ERROR), "Internal Server Error");
        assert_eq!(reason_phrase(StatusCode::NOT_FOUND), "");
        assert_eq!(reason_phrase(StatusCode::CREATED), "");
    }

    #[test]
    fn check_default_headers() {
        let headers = default_headers(42);

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("Content-Length"), Some("42"));
        assert_eq!(headers.get("Connection"), Some("close"));
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn default_headers_for_streaming() {
        let mut headers = default_headers(0);
        assert!(headers.remove("Content-Length"));
        headers.overwrite("Transfer-Encoding", "chunked").unwrap();
        headers.overwrite("Content-Type", "text/html").unwrap();

        assert_eq!(headers.get("content-length"), None);
        assert_eq!(headers.get("transfer-encoding"), Some("chunked"));
        assert_eq!(headers.get("content-type"), Some("text/html"));
    }
}
