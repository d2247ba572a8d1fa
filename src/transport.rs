//! The contract between an HTTP connection and the stream it runs on
//!
//! A transport owns the socket, its input buffer and the registration in
//! the event loop. The HTTP layer never reads from the socket itself: it
//! asks for "the next chunk of input" in one of two shapes and is called
//! back once the input buffer satisfies the request.
//!
//! Reads are one-shot. Arming a read replaces the previously armed one,
//! and a protocol arms the next read from inside the handler of the
//! current one. Handlers are never invoked synchronously from inside
//! `read_until` or `read_bytes`, only from a later dispatch turn of the
//! event loop.
use std::io;

use buffer::Buf;


/// Completion of a one-shot read, receives the transport and its input
pub type ReadHandler<T> = Box<dyn FnOnce(&T, &mut Buf)>;
/// Invoked once an outgoing connection is established or has failed
pub type ConnectHandler<T> = Box<dyn FnMut(&T, &io::Result<()>)>;
/// Invoked once when the stream is closed by either side
pub type DisconnectHandler<T> = Box<dyn FnMut(&T)>;


/// A live, non-blocking byte stream
///
/// Methods take `&self` because the transport is shared between the event
/// loop (which keeps it registered) and the protocol objects driving it,
/// everything runs on the loop's thread.
///
/// When the stream is torn down the transport must invoke the disconnect
/// handler and then drop every registered handler and the armed read.
/// Handlers routinely hold strong references to the protocol object that
/// in turn holds the transport, so dropping them is what breaks the cycle.
pub trait Transport: Sized + 'static {
    /// Numeric identity used in log messages
    fn id(&self) -> u64;

    /// Queues bytes for sending
    ///
    /// Returns `false` if the transport can't accept them right now (closed
    /// stream or output buffer is full). Nothing is queued in this case.
    fn write(&self, data: &[u8]) -> bool;

    /// Arms a read which completes when `delimiter` is found in the input
    ///
    /// The delimiter is left in the buffer, the handler consumes it.
    fn read_until(&self, delimiter: &'static [u8], handler: ReadHandler<Self>);

    /// Arms a read which completes when at least `bytes` are buffered
    fn read_bytes(&self, bytes: usize, handler: ReadHandler<Self>);

    fn set_connect_callback(&self, handler: ConnectHandler<Self>);

    fn set_disconnect_callback(&self, handler: DisconnectHandler<Self>);

    /// Closes the stream
    ///
    /// The disconnect handler runs as part of the teardown, which may happen
    /// later if close is requested from inside a read handler.
    fn close(&self);
}
