//! HTTP Client implementation
//!
//! Only HTTP/1.x with fixed-length (`Content-Length`) bodies is supported.
//! A `Connection` runs a single request at a time over any `Transport`;
//! there is no pipelining, pooling, redirects or TLS here.
//!
//! There are no timeouts either. To limit the time a request takes, set up
//! a timer in your event loop and `close()` the connection when it fires:
//! the request is then finished with no response, like on any other
//! disconnect.

mod connection;
mod error;
mod parser;
mod request;
mod response;

pub use self::connection::{Connection, ResponseCallback, ConnectionCallback};
pub use self::error::{ResponseError, SendError, HeaderError};
pub use self::parser::{parse_headers, parse_body};
pub use self::request::Request;
pub use self::response::Response;

/// The empty line which terminates the response head
pub const HEADERS_END: &'static [u8] = b"\r\n\r\n";
