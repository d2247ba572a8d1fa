use std::collections::HashMap;

use shared::Version;


/// A parsed HTTP response
///
/// One instance lives inside each `Connection` and is reused for every
/// request sent over it. The response callback only borrows it, so copy out
/// (or `clone()`) whatever you need after the callback returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    proto: String,
    status_code: u16,
    status_message: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Response {
    pub fn new() -> Response {
        Response::default()
    }

    /// Clears everything, keeps allocated capacity
    pub fn reset(&mut self) {
        self.proto.clear();
        self.status_code = 0;
        self.status_message = None;
        self.headers.clear();
        self.body.clear();
    }

    pub fn set_proto(&mut self, proto: &str) {
        self.proto.clear();
        self.proto.push_str(proto);
    }

    pub fn set_status_code(&mut self, code: u16) {
        self.status_code = code;
    }

    pub fn set_status_message(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// Inserts a header, replacing the previous value with the same name
    ///
    /// Names are stored exactly as received, no case folding is done.
    pub fn set_header(&mut self, key: &str, value: &str) {
        self.headers.insert(key.to_string(), value.to_string());
    }

    /// Replaces the body with `data`
    pub fn write(&mut self, data: &[u8]) {
        self.body.clear();
        self.body.extend_from_slice(data);
    }

    /// Protocol token of the status line, e.g. `HTTP/1.1`
    pub fn proto(&self) -> &str {
        &self.proto
    }

    /// The protocol token as a known version, if it is one
    pub fn version(&self) -> Option<Version> {
        Version::from_token(&self.proto)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|x| &x[..])
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Value of the header, the name is matched case-sensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|x| &x[..])
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Length of the body announced by the `Content-Length` header
    ///
    /// The header is looked up case-sensitively. Missing header and a value
    /// which is not a decimal number are both treated as zero, so such
    /// response is considered complete right after its headers.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(parse_length)
            .unwrap_or(0)
    }

    /// Returns true when `Content-Length` is present but isn't a number
    ///
    /// `content_length()` reports zero for such responses, which may hide
    /// a body the server actually sent.
    pub fn has_malformed_content_length(&self) -> bool {
        self.header("Content-Length")
            .map_or(false, |x| parse_length(x).is_none())
    }
}

// Digits only, `usize::from_str` alone would accept a leading `+`
fn parse_length(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod test {
    use shared::Version;
    use super::Response;

    fn sample() -> Response {
        let mut resp = Response::new();
        resp.set_proto("HTTP/1.1");
        resp.set_status_code(404);
        resp.set_status_message("Not Found");
        resp.set_header("Content-Length", "3");
        resp.set_header("X-Trace", "abc");
        resp.write(b"nop");
        resp
    }

    #[test]
    fn accessors() {
        let resp = sample();
        assert_eq!(resp.proto(), "HTTP/1.1");
        assert_eq!(resp.version(), Some(Version::Http11));
        assert_eq!(resp.status_code(), 404);
        assert_eq!(resp.status_message(), Some("Not Found"));
        assert_eq!(resp.header("X-Trace"), Some("abc"));
        assert_eq!(resp.headers().len(), 2);
        assert_eq!(resp.content_length(), 3);
        assert_eq!(resp.body(), b"nop");
    }

    #[test]
    fn reset_clears_everything() {
        let mut resp = sample();
        resp.reset();
        assert_eq!(resp, Response::new());
        assert_eq!(resp.status_message(), None);
        assert_eq!(resp.content_length(), 0);
        assert!(resp.body().is_empty());
    }

    #[test]
    fn last_header_wins() {
        let mut resp = Response::new();
        resp.set_header("X-Dup", "1");
        resp.set_header("X-Dup", "2");
        assert_eq!(resp.header("X-Dup"), Some("2"));
        assert_eq!(resp.headers().len(), 1);
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let mut resp = Response::new();
        resp.set_header("content-length", "10");
        assert_eq!(resp.header("Content-Length"), None);
        // Only the exact `Content-Length` spelling counts
        assert_eq!(resp.content_length(), 0);
    }

    #[test]
    fn malformed_content_length_is_zero() {
        let mut resp = Response::new();
        resp.set_header("Content-Length", "ten");
        assert_eq!(resp.content_length(), 0);
        assert!(resp.has_malformed_content_length());
        resp.set_header("Content-Length", "-1");
        assert_eq!(resp.content_length(), 0);
        assert!(resp.has_malformed_content_length());
        resp.set_header("Content-Length", "10");
        assert!(!resp.has_malformed_content_length());
    }

    #[test]
    fn signed_content_length_is_malformed() {
        let mut resp = Response::new();
        resp.set_header("Content-Length", "+5");
        assert_eq!(resp.content_length(), 0);
        assert!(resp.has_malformed_content_length());
        resp.set_header("Content-Length", "");
        assert_eq!(resp.content_length(), 0);
        assert!(resp.has_malformed_content_length());
    }

    #[test]
    fn write_replaces_body() {
        let mut resp = Response::new();
        resp.write(b"first");
        resp.write(b"2nd");
        assert_eq!(resp.body(), b"2nd");
    }
}
