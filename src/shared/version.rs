use std::fmt::{self, Display};

/// Represents a version of the HTTP spec.
///
/// HTTP/0.9 is only of historic importance. It is not supported and
/// requests for it are never produced. HTTP/2 is listed so that a status
/// line carrying it can be recognized, but the connection only speaks the
/// HTTP/1.x text framing.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Version {
    /// HTTP/1.0 protocol version.
    Http10,
    /// HTTP/1.1 protocol version as described in RFC7230 and others.
    Http11,
    /// HTTP/2 protocol version as described in RFC7540.
    Http20,
}

impl Version {
    /// Maps a protocol token from a status line to a version
    ///
    /// Returns `None` for anything that is not a known version token. The
    /// match is exact, as servers are required to send the token uppercase.
    pub fn from_token(token: &str) -> Option<Version> {
        use self::Version::*;
        match token {
            "HTTP/1.0" => Some(Http10),
            "HTTP/1.1" => Some(Http11),
            "HTTP/2" | "HTTP/2.0" => Some(Http20),
            _ => None,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Version::*;
        f.write_str(match *self {
            Http10 => "HTTP/1.0",
            Http11 => "HTTP/1.1",
            Http20 => "HTTP/2",
        })
    }
}
