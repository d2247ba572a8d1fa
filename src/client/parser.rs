use std::str::from_utf8;

use buffer::{Buf, find_substr};

use super::HEADERS_END;
use super::error::ResponseError;
use super::response::Response;


/// Parses a status line and headers at the start of the buffer
///
/// The response is reset first, so nothing from the previous message on the
/// connection survives. On success everything up to and including the
/// empty line is consumed, the bytes after it (usually the beginning of the
/// body) stay in the buffer. On error the buffer is left untouched.
pub fn parse_headers(buffer: &mut Buf, response: &mut Response)
    -> Result<(), ResponseError>
{
    response.reset();

    let end = match find_substr(&buffer[..], HEADERS_END) {
        Some(end) => end,
        None => return Err(ResponseError::NoHeaderEnd),
    };
    {
        let head = from_utf8(&buffer[..end])?;
        let mut lines = head.split("\r\n");
        let status_line = match lines.next() {
            Some(line) if !line.is_empty() => line,
            _ => return Err(ResponseError::EmptyHead),
        };
        parse_status_line(status_line, response)?;
        for line in lines {
            let colon = match line.find(':') {
                Some(colon) => colon,
                // Not a header, but not worth dropping the response either
                None => continue,
            };
            response.set_header(line[..colon].trim(), line[colon+1..].trim());
        }
    }
    buffer.consume(end + HEADERS_END.len());
    Ok(())
}

// Proto StatusCode [StatusMessage]
fn parse_status_line(line: &str, response: &mut Response)
    -> Result<(), ResponseError>
{
    let mut fields = line.splitn(3, ' ');
    let proto = fields.next().unwrap_or("");
    let code = match fields.next() {
        Some(code) if !proto.is_empty() => code,
        _ => return Err(ResponseError::BadStatusLine(line.to_string())),
    };
    // u16 parsing would also take a sign
    if code.starts_with('+') {
        return Err(ResponseError::BadStatusLine(line.to_string()));
    }
    let code = code.parse::<u16>().map_err(ResponseError::BadStatusCode)?;
    response.set_proto(proto);
    response.set_status_code(code);
    match fields.next() {
        Some(message) if !message.is_empty() => {
            response.set_status_message(message);
        }
        _ => {}
    }
    Ok(())
}

/// Moves exactly `content_length` bytes from the buffer into the body
pub fn parse_body(buffer: &mut Buf, response: &mut Response)
    -> Result<(), ResponseError>
{
    let len = response.content_length();
    if buffer.len() < len {
        return Err(ResponseError::ShortBody(len, buffer.len()));
    }
    response.write(&buffer[..len]);
    buffer.consume(len);
    Ok(())
}

#[cfg(test)]
mod test {
    use buffer::Buf;
    use client::error::ResponseError;
    use client::response::Response;
    use super::{parse_headers, parse_body};

    fn buf(data: &[u8]) -> Buf {
        let mut buf = Buf::new();
        buf.extend(data);
        buf
    }

    fn parse(data: &[u8]) -> Result<Response, ResponseError> {
        let mut resp = Response::new();
        parse_headers(&mut buf(data), &mut resp).map(|()| resp)
    }

    #[test]
    fn status_line() {
        let resp = parse(b"HTTP/1.1 200 OK\r\n\r\n").unwrap();
        assert_eq!(resp.proto(), "HTTP/1.1");
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.status_message(), Some("OK"));
        assert!(resp.headers().is_empty());
    }

    #[test]
    fn status_message_absent() {
        let resp = parse(b"HTTP/1.1 200\r\n\r\n").unwrap();
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.status_message(), None);
        let resp = parse(b"HTTP/1.1 204 \r\n\r\n").unwrap();
        assert_eq!(resp.status_message(), None);
    }

    #[test]
    fn status_message_with_spaces() {
        let resp = parse(b"HTTP/1.0 404 Not Found\r\n\r\n").unwrap();
        assert_eq!(resp.proto(), "HTTP/1.0");
        assert_eq!(resp.status_code(), 404);
        assert_eq!(resp.status_message(), Some("Not Found"));
    }

    #[test]
    fn bad_status_line() {
        assert_matches!(parse(b"HTTP/1.1\r\n\r\n"),
                        Err(ResponseError::BadStatusLine(_)));
        assert_matches!(parse(b"\r\n\r\n"), Err(ResponseError::EmptyHead));
        assert_matches!(parse(b" 200 OK\r\n\r\n"),
                        Err(ResponseError::BadStatusLine(_)));
    }

    #[test]
    fn bad_status_code() {
        assert_matches!(parse(b"HTTP/1.1 OK 200\r\n\r\n"),
                        Err(ResponseError::BadStatusCode(_)));
        assert_matches!(parse(b"HTTP/1.1 2x0 OK\r\n\r\n"),
                        Err(ResponseError::BadStatusCode(_)));
        assert_matches!(parse(b"HTTP/1.1 70000 Big\r\n\r\n"),
                        Err(ResponseError::BadStatusCode(_)));
        assert_matches!(parse(b"HTTP/1.1  200 OK\r\n\r\n"),
                        Err(ResponseError::BadStatusCode(_)));
    }

    #[test]
    fn signed_status_code() {
        assert_matches!(parse(b"HTTP/1.1 +200 OK\r\n\r\n"),
                        Err(ResponseError::BadStatusLine(_)));
        assert_matches!(parse(b"HTTP/1.1 -200 OK\r\n\r\n"),
                        Err(ResponseError::BadStatusCode(_)));
    }

    #[test]
    fn no_terminator() {
        let mut data = buf(b"HTTP/1.1 200 OK\r\nHost: x\r\n");
        let mut resp = Response::new();
        assert_matches!(parse_headers(&mut data, &mut resp),
                        Err(ResponseError::NoHeaderEnd));
        assert_eq!(data.len(), 26);
    }

    #[test]
    fn bad_utf8() {
        assert_matches!(parse(b"HTTP/1.1 200 \xff\r\n\r\n"),
                        Err(ResponseError::BadUtf8(_)));
    }

    #[test]
    fn headers() {
        let resp = parse(b"HTTP/1.1 200 OK\r\n\
            Content-Type:text/plain\r\n\
            X-Spaces:    padded value  \r\n\
            X-Time: 12:30:00\r\n\
            \r\n").unwrap();
        assert_eq!(resp.header("Content-Type"), Some("text/plain"));
        assert_eq!(resp.header("X-Spaces"), Some("padded value"));
        assert_eq!(resp.header("X-Time"), Some("12:30:00"));
        assert_eq!(resp.headers().len(), 3);
    }

    #[test]
    fn lines_without_colon_skipped() {
        let resp = parse(b"HTTP/1.1 200 OK\r\n\
            garbage line\r\n\
            X-Ok: yes\r\n\
            \r\n").unwrap();
        assert_eq!(resp.headers().len(), 1);
        assert_eq!(resp.header("X-Ok"), Some("yes"));
    }

    #[test]
    fn duplicate_header_last_wins() {
        let resp = parse(b"HTTP/1.1 200 OK\r\n\
            Set-Cookie: a=1\r\n\
            Set-Cookie: b=2\r\n\
            \r\n").unwrap();
        assert_eq!(resp.header("Set-Cookie"), Some("b=2"));
    }

    #[test]
    fn consumes_only_head() {
        let mut data = buf(b"HTTP/1.1 200 OK\r\n\
            Content-Length: 5\r\n\
            \r\n\
            hel");
        let mut resp = Response::new();
        parse_headers(&mut data, &mut resp).unwrap();
        assert_eq!(&data[..], b"hel");
        assert_eq!(resp.content_length(), 5);
    }

    #[test]
    fn reparse_resets_response() {
        let mut resp = Response::new();
        parse_headers(&mut buf(b"HTTP/1.1 200 OK\r\nX-First: 1\r\n\r\n"),
                      &mut resp).unwrap();
        resp.write(b"old body");
        parse_headers(&mut buf(b"HTTP/1.1 304\r\nX-Second: 2\r\n\r\n"),
                      &mut resp).unwrap();
        assert_eq!(resp.header("X-First"), None);
        assert_eq!(resp.header("X-Second"), Some("2"));
        assert_eq!(resp.status_message(), None);
        assert!(resp.body().is_empty());
    }

    #[test]
    fn failed_parse_leaves_buffer() {
        let mut data = buf(b"HTTP/1.1 abc\r\n\r\nbody");
        let mut resp = Response::new();
        assert!(parse_headers(&mut data, &mut resp).is_err());
        assert_eq!(data.len(), 20);
    }

    #[test]
    fn body() {
        let mut data = buf(b"helloEXTRA");
        let mut resp = Response::new();
        resp.set_header("Content-Length", "5");
        parse_body(&mut data, &mut resp).unwrap();
        assert_eq!(resp.body(), b"hello");
        assert_eq!(&data[..], b"EXTRA");
    }

    #[test]
    fn short_body() {
        let mut data = buf(b"hel");
        let mut resp = Response::new();
        resp.set_header("Content-Length", "5");
        assert_matches!(parse_body(&mut data, &mut resp),
                        Err(ResponseError::ShortBody(5, 3)));
        assert_eq!(data.len(), 3);
    }
}
