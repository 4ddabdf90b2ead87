//! Response parser.
//!
//! Turns the raw bytes of one response into a [`ParsedResponse`]. The input is split
//! once on the first CRLFCRLF: everything before is the head, everything after is
//! the body, returned as a zero-copy slice of the input.
//!
//! Header parsing is lenient. A line without a colon is skipped instead of failing
//! the whole response; only the status line is strict.

use bytes::Bytes;
use tracing::trace;

use crate::ensure;
use crate::protocol::{Headers, ParseError, ParsedResponse};

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Parses a raw response into status line, headers and body.
///
/// Input without a CRLFCRLF is treated as a head with an empty body.
///
/// # Errors
///
/// Returns [`ParseError`] if:
/// - the head is not valid UTF-8
/// - the status line doesn't split into version, status code and reason
/// - the status code is not a three digit number
pub fn parse<B: Into<Bytes>>(raw: B) -> Result<ParsedResponse, ParseError> {
    let raw = raw.into();
    let (head, body) = match raw.windows(HEAD_TERMINATOR.len()).position(|w| w == HEAD_TERMINATOR) {
        Some(offset) => (raw.slice(..offset), raw.slice(offset + HEAD_TERMINATOR.len()..)),
        None => (raw.clone(), Bytes::new()),
    };

    let head = std::str::from_utf8(&head).map_err(|_e| ParseError::InvalidEncoding)?;
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or_default();
    let (version, status, reason) = parse_status_line(status_line)?;

    let mut headers = Headers::with_capacity(16);
    for line in lines {
        match line.split_once(':') {
            Some((name, value)) => {
                headers.insert(name, value.trim());
            }
            None if line.is_empty() => {}
            None => trace!(line, "skip header line without colon"),
        }
    }

    Ok(ParsedResponse::new(version.to_string(), status, reason.to_string(), headers, body))
}

/// Splits `<version> <status-code> <reason...>` on its first two spaces.
pub(crate) fn parse_status_line(line: &str) -> Result<(&str, u16, &str), ParseError> {
    let mut parts = line.splitn(3, ' ');
    let (Some(version), Some(code), Some(reason)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::invalid_status_line(line));
    };
    ensure!(!version.is_empty(), ParseError::invalid_status_line(line));

    ensure!(code.len() == 3 && code.bytes().all(|b| b.is_ascii_digit()), ParseError::invalid_status_code(code));
    let status = code.parse::<u16>().map_err(|_e| ParseError::invalid_status_code(code))?;

    Ok((version, status, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn crlf(s: &str) -> Bytes {
        Bytes::from(s.replace('\n', "\r\n"))
    }

    /// Serializes a response the way a server would put it on the wire.
    fn serialize_response(status: u16, headers: &[(&str, &str)], body: &[u8]) -> Bytes {
        let mut raw = format!("HTTP/1.1 {status} Reason Phrase\r\n").into_bytes();
        for (name, value) in headers {
            raw.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }
        raw.extend_from_slice(b"\r\n");
        raw.extend_from_slice(body);
        Bytes::from(raw)
    }

    #[test]
    fn from_server() {
        let raw = crlf(indoc! {r#"
            HTTP/1.1 200 OK
            Content-Type: application/json
            Content-Length: 14
            Server: nginx

            {"ip":"1.2.3"}"#});

        let response = parse(raw).unwrap();

        assert_eq!(response.version(), "HTTP/1.1");
        assert_eq!(response.status(), 200);
        assert_eq!(response.reason(), "OK");
        assert_eq!(response.headers().len(), 3);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.headers().get("server"), Some("nginx"));
        assert_eq!(&response.body()[..], br#"{"ip":"1.2.3"}"#);
    }

    #[test]
    fn reason_with_spaces() {
        let response = parse(&b"HTTP/1.1 404 Not Found Here\r\n\r\n"[..]).unwrap();

        assert_eq!(response.status(), 404);
        assert_eq!(response.reason(), "Not Found Here");
        assert!(response.body().is_empty());
    }

    #[test]
    fn body_may_contain_terminator() {
        let response = parse(&b"HTTP/1.1 200 OK\r\n\r\nline\r\n\r\nmore"[..]).unwrap();

        assert_eq!(&response.body()[..], b"line\r\n\r\nmore");
    }

    #[test]
    fn header_values_are_trimmed_and_casing_kept() {
        let raw = crlf("HTTP/1.1 200 OK\nX-Custom-Header:   spaced out  \nx-url: http://a:1/b\n\n");
        let response = parse(raw).unwrap();

        let fields: Vec<_> = response.headers().iter().collect();
        assert_eq!(fields, vec![("X-Custom-Header", "spaced out"), ("x-url", "http://a:1/b")]);
    }

    #[test]
    fn duplicate_headers_last_wins() {
        let response = parse(crlf("HTTP/1.1 200 OK\nSet-Thing: a\nset-thing: b\n\n")).unwrap();

        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers().get("SET-THING"), Some("b"));
    }

    #[test]
    fn lines_without_colon_are_skipped() {
        let response = parse(crlf("HTTP/1.1 200 OK\ngarbage line\nContent-Length: 0\n\n")).unwrap();

        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.content_length(), Some(0));
    }

    #[test]
    fn malformed_status_line() {
        assert!(matches!(parse(&b"HTTP/1.1 200\r\n\r\n"[..]), Err(ParseError::InvalidStatusLine { .. })));
        assert!(matches!(parse(&b"garbage\r\n\r\n"[..]), Err(ParseError::InvalidStatusLine { .. })));
        assert!(matches!(parse(Bytes::new()), Err(ParseError::InvalidStatusLine { .. })));
        assert!(matches!(parse(&b"HTTP/1.1 abc OK\r\n\r\n"[..]), Err(ParseError::InvalidStatusCode { .. })));
        assert!(matches!(parse(&b"HTTP/1.1 +20 OK\r\n\r\n"[..]), Err(ParseError::InvalidStatusCode { .. })));
    }

    #[test]
    fn head_must_be_utf8() {
        assert!(matches!(parse(&b"HTTP/1.1 200 \xff\r\n\r\n"[..]), Err(ParseError::InvalidEncoding)));
    }

    #[test]
    fn serialized_responses_parse_back() {
        let bodies: [&[u8]; 3] = [b"", b"ok", b"\x00\xff binary \r\n\r\n tail"];
        let headers = [("Content-Type", "text/plain"), ("X-Id", "7"), ("ETag", "\"abc\"")];

        for status in [100, 200, 204, 301, 404, 500, 599] {
            for body in bodies {
                let response = parse(serialize_response(status, &headers, body)).unwrap();

                assert_eq!(response.status(), status);
                assert_eq!(&response.body()[..], body);
                let fields: Vec<_> = response.headers().iter().collect();
                assert_eq!(fields, headers.to_vec());
            }
        }
    }
}
