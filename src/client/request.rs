use buffer::Buf;
use shared::Version;
use shared::headers;

use super::error::HeaderError;


/// An HTTP request to be sent by `Connection::send_request`
///
/// The request is a plain value, it's serialized at the moment it is sent,
/// so the same request may be sent over several connections.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    version: Version,
    headers: Vec<(String, String)>,
    content_length: bool,
    body: Vec<u8>,
}

impl Request {
    /// Creates an HTTP/1.1 request with no headers and empty body
    ///
    /// # Panics
    ///
    /// In debug builds, when method is not a token or path contains
    /// whitespace, it's expected that both are constants or were
    /// validated by the caller.
    pub fn new(method: &str, path: &str) -> Request {
        debug_assert!(headers::is_token(method),
            "bad method {:?}", method);
        debug_assert!(!path.is_empty() &&
            !path.bytes().any(|x| x == b' ' || x == b'\r' || x == b'\n'),
            "bad path {:?}", path);
        Request {
            method: method.to_string(),
            path: path.to_string(),
            version: Version::Http11,
            headers: Vec::new(),
            content_length: false,
            body: Vec::new(),
        }
    }

    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Add header to the request
    ///
    /// Fails when header would break message framing. Note we don't
    /// validate all the headers but only the framing-related ones:
    /// double content-length, any transfer-encoding (the body is always
    /// sent with a fixed length) and line breaks.
    pub fn add_header(&mut self, name: &str, value: &str)
        -> Result<(), HeaderError>
    {
        if !headers::is_token(name) {
            return Err(HeaderError::InvalidName(name.to_string()));
        }
        if headers::has_line_break(value) {
            return Err(HeaderError::LineBreak(name.to_string()));
        }
        if headers::is_transfer_encoding(name) {
            return Err(HeaderError::TransferEncoding);
        }
        if headers::is_content_length(name) {
            if self.content_length {
                return Err(HeaderError::DuplicateContentLength);
            }
            self.content_length = true;
        }
        self.headers.push((name.to_string(), value.to_string()));
        Ok(())
    }

    /// Sets request body
    ///
    /// Unless `Content-Length` was added explicitly, it's generated from
    /// the length of the body.
    pub fn set_body(&mut self, body: &[u8]) {
        self.body.clear();
        self.body.extend_from_slice(body);
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    fn needs_content_length(&self) -> bool {
        if self.content_length {
            return false;
        }
        if !self.body.is_empty() {
            return true;
        }
        // Servers may refuse these without a length even when empty
        match &self.method[..] {
            "POST" | "PUT" | "PATCH" => true,
            _ => false,
        }
    }

    /// Writes the whole request into the buffer
    pub fn write_to(&self, out: &mut Buf) {
        out.extend(self.method.as_bytes());
        out.extend(b" ");
        out.extend(self.path.as_bytes());
        out.extend(b" ");
        out.extend(self.version.to_string().as_bytes());
        out.extend(b"\r\n");
        for &(ref name, ref value) in &self.headers {
            out.extend(name.as_bytes());
            out.extend(b": ");
            out.extend(value.as_bytes());
            out.extend(b"\r\n");
        }
        if self.needs_content_length() {
            out.extend(format!("Content-Length: {}\r\n", self.body.len())
                       .as_bytes());
        }
        out.extend(b"\r\n");
        out.extend(&self.body);
    }

    /// Serializes the request into the bytes sent over the wire
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Buf::new();
        self.write_to(&mut buf);
        buf[..].to_vec()
    }
}
