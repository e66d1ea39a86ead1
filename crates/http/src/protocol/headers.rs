//! The header store shared by requests and responses.
//!
//! [`Headers`] keeps one value per lower-cased field name. It is filled line by
//! line while a request is decoded (see [`Headers::parse_line`]) and built by
//! handlers for response headers and trailers.
//!
//! Repeated field names are combined into a single value joined with `", "`,
//! in arrival order.

use bytes::BytesMut;
use http::header::{Entry, Iter};
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::ensure;
use crate::protocol::ParseError;
use crate::utils::find_crlf;

/// Symbols allowed in a field name besides ASCII letters and digits.
const TOKEN_SYMBOLS: &[u8] = b"!#$%&'*+-.^_`|~";

/// Separator used when a field name shows up more than once.
const VALUE_SEPARATOR: &[u8] = b", ";

/// Outcome of a successful [`Headers::parse_line`] call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HeaderStatus {
    /// No complete line in the input yet, nothing consumed.
    Partial,
    /// One field line was stored; holds the bytes consumed, CRLF included.
    Field(usize),
    /// The blank line closing the header section was consumed.
    End,
}

impl HeaderStatus {
    /// Number of input bytes consumed by the parse step.
    #[inline]
    pub fn consumed(&self) -> usize {
        match self {
            HeaderStatus::Partial => 0,
            HeaderStatus::Field(n) => *n,
            HeaderStatus::End => 2,
        }
    }

    /// Returns true if the header section is complete.
    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, HeaderStatus::End)
    }
}

/// A case-insensitive mapping from field name to a single field value.
///
/// Names are stored lower-cased. Iteration follows insertion order, a removal
/// may move the last inserted field into the removed slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HeaderMap,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { inner: HeaderMap::with_capacity(capacity) }
    }

    /// Parses at most one header line from the front of `data`.
    ///
    /// # Returns
    ///
    /// - `Ok(HeaderStatus::Partial)` if `data` holds no CRLF yet
    /// - `Ok(HeaderStatus::End)` if `data` starts with the blank line
    /// - `Ok(HeaderStatus::Field(n))` if a field line of `n` bytes was stored
    ///
    /// # Errors
    ///
    /// - [`ParseError::MalformedHeaderLine`] if the line has no colon, has
    ///   whitespace between the field name and the colon, or carries a value
    ///   with control characters other than horizontal tab (NUL, bare CR, DEL)
    /// - [`ParseError::InvalidFieldName`] if the field name is empty or contains
    ///   characters outside letters, digits and `` !#$%&'*+-.^_`|~ ``
    ///
    /// On error the store is left untouched and no bytes count as consumed.
    pub fn parse_line(&mut self, data: &[u8]) -> Result<HeaderStatus, ParseError> {
        let Some(end_index) = find_crlf(data) else {
            return Ok(HeaderStatus::Partial);
        };

        if end_index == 0 {
            return Ok(HeaderStatus::End);
        }

        let line = data[..end_index].trim_ascii();
        let Some(colon_index) = line.iter().position(|b| *b == b':') else {
            return Err(ParseError::malformed_header_line("colon not detected"));
        };

        let (name, value) = (&line[..colon_index], &line[colon_index + 1..]);
        ensure!(
            !name.iter().any(u8::is_ascii_whitespace),
            ParseError::malformed_header_line("contains spaces between field name and colon")
        );

        let name = parse_field_name(name)?;
        let value = parse_field_value(value)?;
        self.combine(name, value)?;

        Ok(HeaderStatus::Field(end_index + 2))
    }

    /// Returns the value stored for `name`, looked up case-insensitively.
    ///
    /// Any UTF-8 value is returned as is. Values that are not valid UTF-8 are
    /// only reachable through [`Headers::get_bytes`].
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_bytes(name).and_then(|value| std::str::from_utf8(value).ok())
    }

    pub fn get_bytes(&self, name: &str) -> Option<&[u8]> {
        self.inner.get(name).map(HeaderValue::as_bytes)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Adds `value` under `name`, joining it onto an existing value with `", "`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ParseError> {
        let name = parse_field_name(name.as_bytes())?;
        let value = parse_field_value(value.as_bytes())?;
        self.combine(name, value)
    }

    /// Stores `value` under `name`, replacing whatever was there.
    pub fn overwrite(&mut self, name: &str, value: &str) -> Result<(), ParseError> {
        let name = parse_field_name(name.as_bytes())?;
        let value = parse_field_value(value.as_bytes())?;
        self.inner.insert(name, value);
        Ok(())
    }

    /// Removes `name`, returning true if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.inner.remove(name).is_some()
    }

    pub(crate) fn insert(&mut self, name: HeaderName, value: HeaderValue) {
        self.inner.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, HeaderValue> {
        self.inner.iter()
    }

    fn combine(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), ParseError> {
        match self.inner.entry(name) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get().as_bytes();
                let mut joined = BytesMut::with_capacity(existing.len() + VALUE_SEPARATOR.len() + value.len());
                joined.extend_from_slice(existing);
                joined.extend_from_slice(VALUE_SEPARATOR);
                joined.extend_from_slice(value.as_bytes());

                let joined = HeaderValue::from_maybe_shared(joined.freeze())
                    .map_err(|e| ParseError::malformed_header_line(format!("can't combine field values: {e}")))?;
                entry.insert(joined);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a HeaderName, &'a HeaderValue);
    type IntoIter = Iter<'a, HeaderValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[inline]
fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || TOKEN_SYMBOLS.contains(&b)
}

fn parse_field_name(name: &[u8]) -> Result<HeaderName, ParseError> {
    let invalid = || ParseError::invalid_field_name(String::from_utf8_lossy(name));

    ensure!(!name.is_empty() && name.iter().copied().all(is_token_char), invalid());
    // lower-cases the name
    HeaderName::from_bytes(name).map_err(|_| invalid())
}

fn parse_field_value(value: &[u8]) -> Result<HeaderValue, ParseError> {
    let value = value.trim_ascii();
    let value = value.strip_suffix(b";").unwrap_or(value).trim_ascii_end();

    HeaderValue::from_bytes(value).map_err(|_| ParseError::malformed_header_line("field value contains invalid characters"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_single_header() {
        let mut headers = Headers::new();
        let status = headers.parse_line(b"Host: localhost:42069\r\n\r\n").unwrap();

        assert_eq!(status, HeaderStatus::Field(23));
        assert_eq!(status.consumed(), 23);
        assert!(!status.is_end());
        assert_eq!(headers.get("host"), Some("localhost:42069"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn invalid_spacing_header() {
        let mut headers = Headers::new();
        let result = headers.parse_line(b"       Host : localhost:42069       \r\n\r\n");

        assert!(matches!(result, Err(ParseError::MalformedHeaderLine { .. })));
        assert!(headers.is_empty());
    }

    #[test]
    fn capital_letters_in_field_name() {
        let mut headers = Headers::new();
        let status = headers.parse_line(b"  HOST: localhost:42069  \r\n\r\n").unwrap();

        assert_eq!(status, HeaderStatus::Field(27));
        assert_eq!(headers.get("host"), Some("localhost:42069"));
        assert_eq!(headers.get("HoSt"), Some("localhost:42069"));
    }

    #[test]
    fn invalid_character_in_field_name() {
        let mut headers = Headers::new();
        let result = headers.parse_line("  H\u{00c2}\u{00a9}ST: localhost:42069\r\n\r\n".as_bytes());

        assert!(matches!(result, Err(ParseError::InvalidFieldName { .. })));
        assert!(headers.is_empty());

        let result = headers.parse_line(b"Ho(st: localhost\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidFieldName { name }) if name == "Ho(st"));
    }

    #[test]
    fn symbols_in_field_name() {
        let mut headers = Headers::new();
        let status = headers.parse_line(b"X-Odd!#$%&'*+.^_`|~: yes\r\n").unwrap();

        assert_eq!(status.consumed(), 26);
        assert_eq!(headers.get("x-odd!#$%&'*+.^_`|~"), Some("yes"));
    }

    #[test]
    fn missing_colon() {
        let mut headers = Headers::new();
        let result = headers.parse_line(b"Host localhost\r\n\r\n");

        assert!(matches!(result, Err(ParseError::MalformedHeaderLine { .. })));
    }

    #[test]
    fn empty_field_name() {
        let mut headers = Headers::new();
        let result = headers.parse_line(b": value\r\n\r\n");

        assert!(matches!(result, Err(ParseError::InvalidFieldName { .. })));
    }

    #[test]
    fn need_more_data() {
        let mut headers = Headers::new();

        assert_eq!(headers.parse_line(b"").unwrap(), HeaderStatus::Partial);
        assert_eq!(headers.parse_line(b"Host: local").unwrap(), HeaderStatus::Partial);
        assert_eq!(headers.parse_line(b"Host: localhost\r").unwrap(), HeaderStatus::Partial);
        assert_eq!(HeaderStatus::Partial.consumed(), 0);
        assert!(headers.is_empty());
    }

    #[test]
    fn blank_line_ends_section() {
        let mut headers = Headers::new();
        let status = headers.parse_line(b"\r\nignored").unwrap();

        assert!(status.is_end());
        assert_eq!(status.consumed(), 2);
        assert!(headers.is_empty());
    }

    #[test]
    fn repeated_field_names_are_combined() {
        let mut headers = Headers::new();

        let status = headers.parse_line(b"Set-Person: lane-loves-go;\r\n").unwrap();
        assert_eq!(status, HeaderStatus::Field(28));

        let status = headers.parse_line(b"Set-Person: prime-loves-zig;\r\n").unwrap();
        assert_eq!(status, HeaderStatus::Field(30));

        let status = headers.parse_line(b"Set-Person: tj-loves-ocaml;\r\n\r\n").unwrap();
        assert_eq!(status, HeaderStatus::Field(29));

        assert_eq!(headers.parse_line(b"\r\n").unwrap(), HeaderStatus::End);
        assert_eq!(headers.get("set-person"), Some("lane-loves-go, prime-loves-zig, tj-loves-ocaml"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn control_characters_in_value() {
        let mut headers = Headers::new();

        let lines: [&[u8]; 4] = [b"Host: local\x01host\r\n", b"Host: local\x00host\r\n", b"Host: local\rhost\r\n", b"Host: local\x7fhost\r\n"];
        for line in lines {
            let result = headers.parse_line(line);
            assert!(matches!(result, Err(ParseError::MalformedHeaderLine { .. })), "accepted {line:?}");
        }
        assert!(headers.is_empty());

        let status = headers.parse_line(b"X-Tabbed: a\tb\r\n").unwrap();
        assert_eq!(status.consumed(), 15);
        assert_eq!(headers.get("x-tabbed"), Some("a\tb"));
    }

    #[test]
    fn non_ascii_value() {
        let mut headers = Headers::new();
        let status = headers.parse_line("X-Name:  café \r\n".as_bytes()).unwrap();

        assert_eq!(status.consumed(), 17);
        assert_eq!(headers.get("x-name"), Some("café"));
        assert_eq!(headers.get_bytes("x-name"), Some("café".as_bytes()));

        headers.parse_line("X-Name: naïve\r\n".as_bytes()).unwrap();
        assert_eq!(headers.get("X-NAME"), Some("café, naïve"));
    }

    #[test]
    fn non_utf8_value_only_as_bytes() {
        let mut headers = Headers::new();
        headers.parse_line(b"X-Raw: \xff\xfe\r\n").unwrap();

        assert!(headers.contains("x-raw"));
        assert_eq!(headers.get("x-raw"), None);
        assert_eq!(headers.get_bytes("x-raw"), Some(&b"\xff\xfe"[..]));
    }

    #[test]
    fn builder_helpers() {
        let mut headers = Headers::new();
        headers.set("Accept", "text/html").unwrap();
        headers.set("accept", "text/plain").unwrap();
        assert_eq!(headers.get("ACCEPT"), Some("text/html, text/plain"));

        headers.overwrite("Accept", "*/*").unwrap();
        assert_eq!(headers.get("accept"), Some("*/*"));

        assert!(headers.contains("accept"));
        assert!(headers.remove("Accept"));
        assert!(!headers.remove("Accept"));
        assert!(headers.is_empty());

        assert!(matches!(headers.overwrite("Bad Name", "x"), Err(ParseError::InvalidFieldName { .. })));
        assert!(matches!(headers.set("X-Ok", "line\r\nbreak"), Err(ParseError::MalformedHeaderLine { .. })));
    }

    #[test]
    fn iterates_in_insertion_order() {
        let mut headers = Headers::new();
        headers.overwrite("B-Field", "2").unwrap();
        headers.overwrite("A-Field", "1").unwrap();

        let names = headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["b-field", "a-field"]);
    }
}
