//! Event-driven HTTP/1.x client connection
//!
//! The crate doesn't poll sockets itself. It drives a `Transport`, a
//! non-blocking stream owned by your event loop, which calls back when
//! enough input is buffered. See `client::Connection` for the entry point
//! and `pipe::Pipe` for an in-memory transport.

extern crate netbuf;
#[macro_use] extern crate log;
#[macro_use] extern crate quick_error;
#[macro_use] extern crate matches;
#[cfg(test)] extern crate httparse;

pub mod buffer;
pub mod client;
pub mod pipe;
pub mod transport;
mod shared;

pub use shared::Version;
pub use buffer::Buf;
pub use transport::Transport;
