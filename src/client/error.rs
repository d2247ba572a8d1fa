use std::num::ParseIntError;
use std::str::Utf8Error;


quick_error!{
    /// Error of parsing response headers
    ///
    /// This is primarily for better debugging. Could also be used for putting
    /// into the logs. The response callback never sees it: any of these
    /// closes the connection and the request fails with no response.
    ///
    /// Note, you should not match the enum values and/or make an exhaustive
    /// match over the enum. More errors will be added at will.
    #[derive(Debug)]
    pub enum ResponseError {
        NoHeaderEnd {
            description("end of headers not found in the buffer")
        }
        EmptyHead {
            description("response head is empty")
        }
        BadStatusLine(line: String) {
            description("malformed status line")
            display("malformed status line: {:?}", line)
        }
        BadStatusCode(err: ParseIntError) {
            description("error parsing status code")
            display("error parsing status code: {}", err)
            cause(err)
        }
        BadUtf8(err: Utf8Error) {
            from()
            description("response head is not valid utf-8")
            display("response head is not valid utf-8: {}", err)
            cause(err)
        }
        ShortBody(expected: usize, available: usize) {
            description("fewer body bytes than Content-Length")
            display("expected {} bytes of body, only {} available",
                    expected, available)
        }
    }
}

quick_error!{
    /// Error returned by `Connection::send_request`
    ///
    /// In every case nothing is written and the callback is dropped without
    /// being called, so the request is still the caller's to retry.
    #[derive(Debug, PartialEq, Eq)]
    pub enum SendError {
        /// Previous request on this connection is not finished yet
        ///
        /// Only one request may be in flight per connection. This is a bug
        /// in the calling code rather than a network condition.
        Busy {
            description("request is already in flight on this connection")
        }
        /// Connection has been disconnected
        Closed {
            description("connection is closed")
        }
        /// Transport refused the request bytes
        WriteFailed {
            description("transport can't accept request right now")
        }
    }
}

quick_error!{
    /// Error adding a header to a request
    ///
    /// Only headers which break message framing are rejected. In the
    /// application code it's okay to unwrap the result and to get
    /// a meaningful panic (that is basically an assertion).
    #[derive(Debug, PartialEq, Eq)]
    pub enum HeaderError {
        DuplicateContentLength {
            description("Content-Length is added twice")
        }
        TransferEncoding {
            description("Transfer-Encoding is not supported, \
                         body is always sent with Content-Length")
        }
        InvalidName(name: String) {
            description("header name is not a valid token")
            display("header name {:?} is not a valid token", name)
        }
        LineBreak(name: String) {
            description("header value contains a line break")
            display("value of header {:?} contains a line break", name)
        }
    }
}
