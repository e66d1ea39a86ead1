//! Encoder for the status line and for header or trailer sections.
//!
//! ```text
//! status-line = "HTTP/1.1" SP status-code SP reason CRLF
//! header-line = field-name ":" SP field-value CRLF
//! blank-line  = CRLF
//! ```

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use http::StatusCode;
use tokio_util::codec::Encoder;

use crate::protocol::{Headers, SendError, reason_phrase};

/// Initial buffer size reserved for a header section
const INIT_HEADER_SIZE: usize = 1024;

/// Serializes status lines and header sections.
///
/// The same encoding serves response headers and trailers: every field as
/// `name: value\r\n`, in the store's iteration order, then one `\r\n`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderEncoder;

impl Encoder<StatusCode> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, status: StatusCode, dst: &mut BytesMut) -> Result<(), Self::Error> {
        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_str(), reason_phrase(status))?;
        Ok(())
    }
}

impl Encoder<&Headers> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, headers: &Headers, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INIT_HEADER_SIZE.min(headers.len() * 64 + 2));

        for (header_name, header_value) in headers {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Fast writer implementation for writing to BytesMut.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_status(status: StatusCode) -> BytesMut {
        let mut dst = BytesMut::new();
        HeaderEncoder.encode(status, &mut dst).unwrap();
        dst
    }

    #[test]
    fn status_lines() {
        assert_eq!(&encode_status(StatusCode::OK)[..], b"HTTP/1.1 200 OK\r\n");
        assert_eq!(&encode_status(StatusCode::BAD_REQUEST)[..], b"HTTP/1.1 400 Bad Request\r\n");
        assert_eq!(&encode_status(StatusCode::INTERNAL_SERVER_ERROR)[..], b"HTTP/1.1 500 Internal Server Error\r\n");
        assert_eq!(&encode_status(StatusCode::NOT_FOUND)[..], b"HTTP/1.1 404 \r\n");
    }

    #[test]
    fn empty_header_section() {
        let mut dst = BytesMut::new();
        HeaderEncoder.encode(&Headers::new(), &mut dst).unwrap();
        assert_eq!(&dst[..], b"\r\n");
    }

    #[test]
    fn header_section() {
        let mut headers = Headers::new();
        headers.overwrite("Content-Type", "text/html").unwrap();
        headers.overwrite("X-Content-Length", "12").unwrap();

        let mut dst = BytesMut::new();
        HeaderEncoder.encode(&headers, &mut dst).unwrap();

        let encoded = std::str::from_utf8(&dst).unwrap();
        assert!(encoded.ends_with("\r\n\r\n"));
        let mut lines = encoded.trim_end().split("\r\n").collect::<Vec<_>>();
        lines.sort_unstable();
        assert_eq!(lines, vec!["content-type: text/html", "x-content-length: 12"]);
    }
}
