use std::cell::RefCell;
use std::io;
use std::mem;
use std::rc::Rc;

use buffer::Buf;
use transport::Transport;

use super::HEADERS_END;
use super::error::SendError;
use super::parser::{parse_headers, parse_body};
use super::request::Request;
use super::response::Response;


/// Completion of a single request
///
/// Receives `Some(response)` when the response is read completely and
/// `None` when the connection was lost (or the response was malformed)
/// before that. The response is only borrowed for the duration of the call.
pub type ResponseCallback<T> =
    Box<dyn FnOnce(&Rc<Connection<T>>, Option<&Response>)>;

/// Connection-level notification, fired when the transport disconnects
pub type ConnectionCallback<T> = Box<dyn FnOnce(&Rc<Connection<T>>)>;


/// Progress of the request on the connection
///
/// The response callback is stored inside the in-flight states, so it's
/// there exactly when a request is in flight, and the only way to get it out
/// is to leave those states. Both delivery and disconnect do so by replacing
/// the state, whichever runs first gets the callback.
enum State<T: Transport> {
    Idle,
    AwaitingHeaders(ResponseCallback<T>),
    AwaitingBody(ResponseCallback<T>),
    Closed,
}

impl<T: Transport> State<T> {
    fn name(&self) -> &'static str {
        match *self {
            State::Idle => "idle",
            State::AwaitingHeaders(_) => "awaiting headers",
            State::AwaitingBody(_) => "awaiting body",
            State::Closed => "closed",
        }
    }
}

/// An HTTP/1.x client connection
///
/// Sends one request at a time over the transport and parses the response
/// as bytes arrive. Every accepted request gets exactly one call of its
/// callback: with the response, or with `None` if the connection goes away
/// first. Malformed responses close the transport, so they are reported
/// the same way as a lost connection.
///
/// The connection is always used through `Rc`. The transport's registered
/// handlers keep it alive too, until the transport is torn down.
pub struct Connection<T: Transport> {
    transport: Rc<T>,
    state: RefCell<State<T>>,
    response: RefCell<Response>,
    disconnect_callback: RefCell<Option<ConnectionCallback<T>>>,
}

impl<T: Transport> Connection<T> {
    /// Wraps an established (or establishing) transport
    pub fn new(transport: Rc<T>) -> Rc<Connection<T>> {
        let conn = Rc::new(Connection {
            transport: transport.clone(),
            state: RefCell::new(State::Idle),
            response: RefCell::new(Response::new()),
            disconnect_callback: RefCell::new(None),
        });
        let me = conn.clone();
        transport.set_connect_callback(Box::new(
            move |transport: &T, result: &io::Result<()>| {
                me.on_connect(transport, result)
            }));
        let me = conn.clone();
        transport.set_disconnect_callback(Box::new(move |transport: &T| {
            me.on_disconnect(transport)
        }));
        conn
    }

    /// Sends a request
    ///
    /// On success the callback will be called exactly once, later, from
    /// the event loop. On error nothing is sent and the callback is
    /// dropped without being called.
    ///
    /// Only one request may be in flight, sending another one before the
    /// callback of the previous one has been called returns
    /// `SendError::Busy`. It's fine to send the next request from inside
    /// the callback.
    pub fn send_request<F>(self: &Rc<Self>, request: &Request, callback: F)
        -> Result<(), SendError>
        where F: FnOnce(&Rc<Connection<T>>, Option<&Response>) + 'static
    {
        match *self.state.borrow() {
            State::Idle => {}
            State::AwaitingHeaders(_) | State::AwaitingBody(_) => {
                return Err(SendError::Busy);
            }
            State::Closed => return Err(SendError::Closed),
        }
        if !self.transport.write(&request.to_bytes()) {
            warn!("conn[{}] send request failed", self.transport.id());
            return Err(SendError::WriteFailed);
        }
        debug!("conn[{}] sent {} {}", self.transport.id(),
            request.method(), request.path());
        *self.state.borrow_mut() = State::AwaitingHeaders(Box::new(callback));
        let me = self.clone();
        self.transport.read_until(HEADERS_END, Box::new(
            move |transport: &T, buffer: &mut Buf| {
                me.on_headers(transport, buffer)
            }));
        Ok(())
    }

    /// Sets the callback fired once when the transport disconnects
    ///
    /// It's fired whether a request is in flight or not, after the callback
    /// of the request (if any).
    pub fn set_disconnect_callback<F>(&self, callback: F)
        where F: FnOnce(&Rc<Connection<T>>) + 'static
    {
        *self.disconnect_callback.borrow_mut() = Some(Box::new(callback));
    }

    /// Returns true if a request is sent and its callback not called yet
    pub fn is_requesting(&self) -> bool {
        matches!(*self.state.borrow(),
                 State::AwaitingHeaders(_) | State::AwaitingBody(_))
    }

    /// Returns true once disconnect has been handled
    pub fn is_closed(&self) -> bool {
        matches!(*self.state.borrow(), State::Closed)
    }

    pub fn id(&self) -> u64 {
        self.transport.id()
    }

    pub fn transport(&self) -> &Rc<T> {
        &self.transport
    }

    /// Closes the transport
    ///
    /// A request in flight is finished with no response, through the
    /// regular disconnect handling. Useful for timeouts.
    pub fn close(&self) {
        self.transport.close();
    }

    fn on_connect(&self, transport: &T, result: &io::Result<()>) {
        match *result {
            Ok(()) => debug!("conn[{}] connected", transport.id()),
            Err(ref e) => warn!("conn[{}] connect failed: {}",
                                transport.id(), e),
        }
    }

    fn on_headers(self: &Rc<Self>, transport: &T, buffer: &mut Buf) {
        debug_assert!(matches!(*self.state.borrow(), State::AwaitingHeaders(_)),
            "headers received in state {}", self.state.borrow().name());
        let result = parse_headers(buffer, &mut self.response.borrow_mut());
        if let Err(e) = result {
            error!("conn[{}] parse headers failed: {}", transport.id(), e);
            // Callback is fired by the disconnect
            transport.close();
            return;
        }
        let body_len = {
            let response = self.response.borrow();
            if response.has_malformed_content_length() {
                warn!("conn[{}] bad Content-Length {:?}, assuming empty body",
                    transport.id(), response.header("Content-Length"));
            }
            response.content_length()
        };
        if body_len == 0 {
            self.deliver();
            return;
        }
        {
            let mut state = self.state.borrow_mut();
            *state = match mem::replace(&mut *state, State::Idle) {
                State::AwaitingHeaders(callback) => {
                    State::AwaitingBody(callback)
                }
                other => other,
            };
        }
        let me = self.clone();
        transport.read_bytes(body_len, Box::new(
            move |transport: &T, buffer: &mut Buf| {
                me.on_body(transport, buffer)
            }));
    }

    fn on_body(self: &Rc<Self>, transport: &T, buffer: &mut Buf) {
        let result = parse_body(buffer, &mut self.response.borrow_mut());
        if let Err(e) = result {
            error!("conn[{}] read body failed: {}", transport.id(), e);
            transport.close();
            return;
        }
        self.deliver();
    }

    fn deliver(self: &Rc<Self>) {
        let callback = {
            let mut state = self.state.borrow_mut();
            match mem::replace(&mut *state, State::Idle) {
                State::AwaitingHeaders(callback)
                | State::AwaitingBody(callback) => callback,
                other => {
                    error!("conn[{}] response complete in state {}",
                        self.transport.id(), other.name());
                    *state = other;
                    return;
                }
            }
        };
        let response = self.response.borrow();
        debug!("conn[{}] response {} with {} bytes of body",
            self.transport.id(), response.status_code(),
            response.body().len());
        callback(self, Some(&*response));
    }

    fn on_disconnect(self: &Rc<Self>, transport: &T) {
        let previous = mem::replace(&mut *self.state.borrow_mut(),
                                    State::Closed);
        match previous {
            State::AwaitingHeaders(callback)
            | State::AwaitingBody(callback) => {
                debug!("conn[{}] disconnected with request in flight",
                    transport.id());
                callback(self, None);
            }
            State::Idle | State::Closed => {
                debug!("conn[{}] disconnected", transport.id());
            }
        }
        let callback = self.disconnect_callback.borrow_mut().take();
        if let Some(callback) = callback {
            callback(self);
        }
    }
}

impl<T: Transport> Drop for Connection<T> {
    fn drop(&mut self) {
        debug!("conn[{}] dropped", self.transport.id());
    }
}
