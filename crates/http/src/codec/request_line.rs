//! Request-line parsing.
//!
//! ```text
//! request-line = method SP target SP "HTTP/" version CRLF
//! method       = "GET" / "POST" / "PUT" / "PATCH" / "DELETE"
//! target       = "/" *anychar
//! version      = "1.1"
//! ```

use http::{Method, Version};

use crate::ensure;
use crate::protocol::{ParseError, RequestLine};
use crate::utils::find_crlf;

const HTTP_PREFIX: &str = "HTTP/";
const SUPPORTED_VERSION: &str = "1.1";

/// Parses the request line at the front of `data`.
///
/// Returns `Ok(None)` while `data` holds no CRLF, otherwise the parsed line and
/// the number of bytes it occupied, CRLF included.
pub(crate) fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(end_index) = find_crlf(data) else {
        return Ok(None);
    };

    let line = &data[..end_index];
    let line = std::str::from_utf8(line).map_err(|_| ParseError::malformed_request_line(String::from_utf8_lossy(line)))?;

    let mut parts = line.split(' ');
    let (Some(method), Some(target), Some(version), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::malformed_request_line(line));
    };

    let method = parse_method(method)?;

    ensure!(target.starts_with('/'), ParseError::invalid_target(target));

    let version = match version.strip_prefix(HTTP_PREFIX) {
        Some(SUPPORTED_VERSION) => Version::HTTP_11,
        _ => return Err(ParseError::unsupported_version(version)),
    };

    Ok(Some((RequestLine::new(method, target.to_owned(), version), end_index + 2)))
}

fn parse_method(method: &str) -> Result<Method, ParseError> {
    match method {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        _ => Err(ParseError::invalid_method(method)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_get() {
        let (line, consumed) = parse_request_line(b"GET /coffee HTTP/1.1\r\nHost: x\r\n").unwrap().unwrap();

        assert_eq!(consumed, 22);
        assert_eq!(line.method(), &Method::GET);
        assert_eq!(line.target(), "/coffee");
        assert_eq!(line.version(), Version::HTTP_11);
        assert_eq!(line.http_version(), "1.1");
    }

    #[test]
    fn parse_all_methods() {
        for (raw, method) in
            [("GET", Method::GET), ("POST", Method::POST), ("PUT", Method::PUT), ("PATCH", Method::PATCH), ("DELETE", Method::DELETE)]
        {
            let input = format!("{raw} / HTTP/1.1\r\n");
            let (line, consumed) = parse_request_line(input.as_bytes()).unwrap().unwrap();
            assert_eq!(line.method(), &method);
            assert_eq!(consumed, input.len());
        }
    }

    #[test]
    fn need_more_data() {
        assert!(parse_request_line(b"").unwrap().is_none());
        assert!(parse_request_line(b"GET / HTTP/1.1").unwrap().is_none());
        assert!(parse_request_line(b"GET / HTTP/1.1\r").unwrap().is_none());
    }

    #[test]
    fn wrong_number_of_parts() {
        assert!(matches!(parse_request_line(b"/coffee HTTP/1.1\r\n"), Err(ParseError::MalformedRequestLine { .. })));
        assert!(matches!(parse_request_line(b"GET /coffee  HTTP/1.1\r\n"), Err(ParseError::MalformedRequestLine { .. })));
        assert!(matches!(parse_request_line(b"GET /a b HTTP/1.1\r\n"), Err(ParseError::MalformedRequestLine { .. })));
        assert!(matches!(parse_request_line(b"\r\n"), Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn invalid_method() {
        let result = parse_request_line(b"HEAD / HTTP/1.1\r\n");
        assert!(matches!(result, Err(ParseError::InvalidMethod { method }) if method == "HEAD"));

        assert!(matches!(parse_request_line(b"get / HTTP/1.1\r\n"), Err(ParseError::InvalidMethod { .. })));
    }

    #[test]
    fn invalid_target() {
        assert!(matches!(parse_request_line(b"GET coffee HTTP/1.1\r\n"), Err(ParseError::InvalidTarget { .. })));
        assert!(matches!(parse_request_line(b"GET  HTTP/1.1\r\n"), Err(ParseError::InvalidTarget { .. })));
    }

    #[test]
    fn unsupported_version() {
        assert!(matches!(parse_request_line(b"GET / HTTP/1.0\r\n"), Err(ParseError::UnsupportedVersion { .. })));
        assert!(matches!(parse_request_line(b"GET / HTTP/2\r\n"), Err(ParseError::UnsupportedVersion { .. })));
        assert!(matches!(parse_request_line(b"GET / HTTPS/1.1\r\n"), Err(ParseError::UnsupportedVersion { .. })));
    }
}
