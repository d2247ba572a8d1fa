//! In-process transport over memory buffers
//!
//! `Pipe` implements the whole `Transport` contract without a socket: the
//! owner pushes "received" bytes with `feed()` and drains "sent" bytes
//! with `take_output()`. It's what the tests of this crate run on, and it
//! may be used to drive a connection from a loop the crate knows nothing
//! about, by feeding it whatever was read from the real socket.
use std::cell::{Cell, RefCell};
use std::io;
use std::mem;
use std::rc::Rc;

use buffer::{Buf, find_substr};
use transport::{Transport, ReadHandler, ConnectHandler, DisconnectHandler};


enum Expectation {
    Delimiter(&'static [u8], ReadHandler<Pipe>),
    Bytes(usize, ReadHandler<Pipe>),
}

impl Expectation {
    fn is_satisfied(&self, input: &[u8]) -> bool {
        match *self {
            Expectation::Delimiter(delimiter, _) => {
                find_substr(input, delimiter).is_some()
            }
            Expectation::Bytes(bytes, _) => input.len() >= bytes,
        }
    }
    fn into_handler(self) -> ReadHandler<Pipe> {
        match self {
            Expectation::Delimiter(_, handler) => handler,
            Expectation::Bytes(_, handler) => handler,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    /// Close requested from a read handler, teardown when it returns
    Closing,
    Closed,
}

pub struct Pipe {
    id: u64,
    state: Cell<State>,
    dispatching: Cell<bool>,
    writable: Cell<bool>,
    input: RefCell<Buf>,
    output: RefCell<Buf>,
    expectation: RefCell<Option<Expectation>>,
    on_connect: RefCell<Option<ConnectHandler<Pipe>>>,
    on_disconnect: RefCell<Option<DisconnectHandler<Pipe>>>,
}

impl Pipe {
    /// Creates an open pipe
    pub fn new(id: u64) -> Rc<Pipe> {
        Rc::new(Pipe {
            id: id,
            state: Cell::new(State::Open),
            dispatching: Cell::new(false),
            writable: Cell::new(true),
            input: RefCell::new(Buf::new()),
            output: RefCell::new(Buf::new()),
            expectation: RefCell::new(None),
            on_connect: RefCell::new(None),
            on_disconnect: RefCell::new(None),
        })
    }

    /// Appends received bytes to the input buffer and dispatches the
    /// armed read if it's satisfied now
    ///
    /// When called from inside a read handler the bytes are queued after
    /// the ones the handler is working on and dispatched once it returns.
    /// Bytes fed into a closed pipe are dropped.
    pub fn feed(&self, data: &[u8]) {
        if self.state.get() != State::Open {
            debug!("pipe[{}] dropping {} bytes fed after close",
                self.id, data.len());
            return;
        }
        self.input.borrow_mut().extend(data);
        self.poll();
    }

    /// Runs armed reads while the input buffer satisfies them
    ///
    /// Each handler normally arms the next read, so a single call may run
    /// several handlers (e.g. headers and body that arrived together).
    pub fn poll(&self) {
        if self.dispatching.get() {
            return;
        }
        self.dispatching.set(true);
        while self.state.get() == State::Open {
            let expectation = match self.expectation.borrow_mut().take() {
                Some(expectation) => expectation,
                None => break,
            };
            let ready = expectation.is_satisfied(&self.input.borrow()[..]);
            if !ready {
                *self.expectation.borrow_mut() = Some(expectation);
                break;
            }
            let handler = expectation.into_handler();
            // The handler owns the input while it runs, bytes fed meanwhile
            // land in the empty placeholder and are appended afterwards
            let mut input = mem::replace(&mut *self.input.borrow_mut(),
                                         Buf::new());
            handler(self, &mut input);
            let mut slot = self.input.borrow_mut();
            if slot.len() > 0 {
                input.extend(&slot[..]);
            }
            *slot = input;
        }
        self.dispatching.set(false);
        if self.state.get() == State::Closing {
            self.teardown();
        }
    }

    /// Reports the outcome of connection establishment
    ///
    /// A failed connect tears the pipe down afterwards, so the disconnect
    /// handler runs too.
    pub fn connect_finished(&self, result: io::Result<()>) {
        let handler = self.on_connect.borrow_mut().take();
        if let Some(mut handler) = handler {
            handler(self, &result);
            let mut slot = self.on_connect.borrow_mut();
            if slot.is_none() && self.state.get() == State::Open {
                *slot = Some(handler);
            }
        }
        if result.is_err() {
            self.close();
        }
    }

    /// Simulates the peer closing the stream
    pub fn hangup(&self) {
        debug!("pipe[{}] peer hung up", self.id);
        self.close();
    }

    /// Drains the bytes written so far
    pub fn take_output(&self) -> Vec<u8> {
        let mut output = self.output.borrow_mut();
        let data = output[..].to_vec();
        let len = output.len();
        output.consume(len);
        data
    }

    /// When set to false all writes are refused as if the output buffer
    /// was full
    pub fn set_writable(&self, writable: bool) {
        self.writable.set(writable);
    }

    /// Number of received bytes no handler has consumed yet
    ///
    /// Inside a read handler this excludes the buffer handed to it.
    pub fn pending_input(&self) -> usize {
        self.input.borrow().len()
    }

    /// Returns true if a read is armed and waits for input
    pub fn is_reading(&self) -> bool {
        self.expectation.borrow().is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.state.get() != State::Open
    }

    fn teardown(&self) {
        self.state.set(State::Closed);
        let handler = self.on_disconnect.borrow_mut().take();
        if let Some(mut handler) = handler {
            handler(self);
        }
        // Handlers own references to whatever drives this pipe
        let expectation = self.expectation.borrow_mut().take();
        let on_connect = self.on_connect.borrow_mut().take();
        drop(expectation);
        drop(on_connect);
    }
}

impl Transport for Pipe {
    fn id(&self) -> u64 {
        self.id
    }
    fn write(&self, data: &[u8]) -> bool {
        if self.state.get() != State::Open || !self.writable.get() {
            return false;
        }
        self.output.borrow_mut().extend(data);
        true
    }
    fn read_until(&self, delimiter: &'static [u8], handler: ReadHandler<Self>)
    {
        if self.state.get() == State::Closed {
            return;
        }
        *self.expectation.borrow_mut() =
            Some(Expectation::Delimiter(delimiter, handler));
    }
    fn read_bytes(&self, bytes: usize, handler: ReadHandler<Self>) {
        if self.state.get() == State::Closed {
            return;
        }
        *self.expectation.borrow_mut() =
            Some(Expectation::Bytes(bytes, handler));
    }
    fn set_connect_callback(&self, handler: ConnectHandler<Self>) {
        *self.on_connect.borrow_mut() = Some(handler);
    }
    fn set_disconnect_callback(&self, handler: DisconnectHandler<Self>) {
        *self.on_disconnect.borrow_mut() = Some(handler);
    }
    fn close(&self) {
        match self.state.get() {
            State::Open if self.dispatching.get() => {
                self.state.set(State::Closing);
            }
            State::Open => self.teardown(),
            State::Closing | State::Closed => {}
        }
    }
}
