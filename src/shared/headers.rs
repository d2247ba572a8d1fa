//! Header name and value checks used when building requests

#[inline(always)]
fn is_name(val: &str, lowercase: &str) -> bool {
    if val.len() != lowercase.len() {
        return false;
    }
    val.bytes().zip(lowercase.bytes())
        .all(|(ch, expected)| ch.to_ascii_lowercase() == expected)
}

#[inline(always)]
pub fn is_transfer_encoding(val: &str) -> bool {
    is_name(val, "transfer-encoding")
}

#[inline(always)]
pub fn is_content_length(val: &str) -> bool {
    is_name(val, "content-length")
}

#[inline(always)]
// Header lines are CRLF-delimited on the wire, so neither a name nor
// a value may smuggle in a line break of its own
pub fn has_line_break(val: &str) -> bool {
    val.bytes().any(|ch| ch == b'\r' || ch == b'\n')
}

#[inline(always)]
// RFC7230 token characters, which is all a header name may contain
pub fn is_token(val: &str) -> bool {
    !val.is_empty() && val.bytes().all(|ch| match ch {
        b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' => true,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' |
        b'.' | b'^' | b'_' | b'`' | b'|' | b'~' => true,
        _ => false,
    })
}

#[cfg(test)]
mod test {
    use super::{is_content_length, is_transfer_encoding};
    use super::{has_line_break, is_token};

    #[test]
    fn test_content_len() {
        assert!(is_content_length("Content-Length"));
        assert!(is_content_length("content-length"));
        assert!(is_content_length("CONTENT-length"));
        assert!(is_content_length("CONTENT-LENGTH"));
        assert!(!is_content_length("Content-Lengths"));
        assert!(!is_content_length("Content-Type"));
    }

    #[test]
    fn test_transfer_encoding() {
        assert!(is_transfer_encoding("Transfer-Encoding"));
        assert!(is_transfer_encoding("transfer-ENCODING"));
        assert!(is_transfer_encoding("TRANSFER-Encoding"));
        assert!(is_transfer_encoding("TRANSFER-ENCODING"));
        assert!(!is_transfer_encoding("Content-Encoding"));
    }

    #[test]
    fn test_line_break() {
        assert!(has_line_break("a\r\nInjected: yes"));
        assert!(has_line_break("\n"));
        assert!(!has_line_break("text/plain; charset=utf-8"));
    }

    #[test]
    fn test_token() {
        assert!(is_token("X-Request-Id"));
        assert!(is_token("Accept"));
        assert!(!is_token(""));
        assert!(!is_token("Bad Name"));
        assert!(!is_token("Colon:"));
    }
}
